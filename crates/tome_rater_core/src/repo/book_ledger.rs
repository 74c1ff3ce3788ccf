//! Insertion-ordered book storage with per-book read counts.

use crate::model::book::{Book, BookKey};
use std::collections::HashMap;

/// One cataloged book and how often it was read.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub book: Book,
    pub read_count: u32,
}

/// In-memory book store preserving first-read order.
#[derive(Debug, Default)]
pub struct BookLedger {
    entries: Vec<LedgerEntry>,
    index: HashMap<BookKey, usize>,
}

impl BookLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `book`, cloning it in with a zero count on first sight.
    ///
    /// An existing entry keeps its stored copy even when `book` differs in kind.
    pub fn entry_for(&mut self, book: &Book) -> &mut LedgerEntry {
        let key = book.key();
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(LedgerEntry {
                    book: book.clone(),
                    read_count: 0,
                });
                self.index.insert(key, slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    pub fn get(&self, key: &BookKey) -> Option<&LedgerEntry> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    /// Entries in first-read order.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::BookLedger;
    use crate::model::book::Book;

    #[test]
    fn same_identity_shares_one_entry() {
        let mut ledger = BookLedger::new();
        let novel = Book::fiction("Dune", "Herbert", "001");
        let plain = Book::new("Dune", "001");

        ledger.entry_for(&novel).read_count += 1;
        ledger.entry_for(&plain).read_count += 1;

        assert_eq!(ledger.len(), 1);
        let entry = ledger.get(&plain.key()).expect("shared entry");
        assert_eq!(entry.read_count, 2);
        assert_eq!(entry.book.author(), Some("Herbert"));
    }
}
