//! Catalog use-case service.
//!
//! # Responsibility
//! - Build books and register users under the catalog's uniqueness rules.
//! - Link readers to books and keep per-book read counts.
//! - Answer the most-read / highest-rated / most-positive queries.
//!
//! # Invariants
//! - Every registered user has a unique email.
//! - Issued ISBNs are recorded once each, in first-issue order.
//! - Aggregate queries scan in insertion order and resolve ties through
//!   `CatalogConfig::tie_break`.
//! - Every rejection logs a `warn` event and returns `Err`; nothing panics.

use crate::config::{CatalogConfig, DuplicateIsbnPolicy};
use crate::model::book::{Book, BookKey, BookKind};
use crate::model::user::User;
use crate::repo::book_ledger::BookLedger;
use crate::repo::user_registry::{RegistryError, UserRegistry};
use crate::service::ranking::select_best;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Accepts any email holding an `@` somewhere before a `.org|.com|.edu` tail.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)@.*\.(?:org|com|edu)\z").expect("valid email regex"));

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog operation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Email failed the registration format check.
    InvalidEmail(String),
    /// Email already belongs to a registered user.
    DuplicateUser(String),
    /// No user is registered under this email.
    UnknownUser(String),
    /// ISBN already issued while `DuplicateIsbnPolicy::Reject` is active.
    DuplicateIsbn(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "email {email} is not a valid email"),
            Self::DuplicateUser(email) => write!(f, "user already exists: {email}"),
            Self::UnknownUser(email) => write!(f, "no user with email {email}"),
            Self::DuplicateIsbn(isbn) => write!(f, "ISBN already exists: {isbn}"),
        }
    }
}

impl Error for CatalogError {}

impl From<RegistryError> for CatalogError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::DuplicateKey(email) => Self::DuplicateUser(email),
            RegistryError::MissingKey(email) => Self::UnknownUser(email),
        }
    }
}

/// Result of linking one reader to one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Catalog read count for the book after this read.
    pub read_count: u32,
    /// Whether the book accepted the rating into its shared list.
    pub rating_accepted: bool,
}

/// Registry of readers and books for one session.
#[derive(Debug, Default)]
pub struct Catalog {
    config: CatalogConfig,
    users: UserRegistry,
    books: BookLedger,
    issued_isbns: Vec<String>,
}

impl Catalog {
    /// Creates an empty catalog with default policies.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Creates a plain book after ISBN duplicate detection.
    pub fn create_book(
        &mut self,
        title: impl Into<String>,
        isbn: impl Into<String>,
    ) -> CatalogResult<Book> {
        self.issue_book(title.into(), isbn.into(), BookKind::Plain)
    }

    /// Creates a fiction book after ISBN duplicate detection.
    pub fn create_novel(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> CatalogResult<Book> {
        let kind = BookKind::Fiction {
            author: author.into(),
        };
        self.issue_book(title.into(), isbn.into(), kind)
    }

    /// Creates a non-fiction book after ISBN duplicate detection.
    pub fn create_non_fiction(
        &mut self,
        title: impl Into<String>,
        subject: impl Into<String>,
        level: impl Into<String>,
        isbn: impl Into<String>,
    ) -> CatalogResult<Book> {
        let kind = BookKind::NonFiction {
            subject: subject.into(),
            level: level.into(),
        };
        self.issue_book(title.into(), isbn.into(), kind)
    }

    fn issue_book(&mut self, title: String, isbn: String, kind: BookKind) -> CatalogResult<Book> {
        self.check_duplicate_isbn(&isbn)?;
        Ok(Book::with_kind(title, isbn, kind))
    }

    fn check_duplicate_isbn(&mut self, isbn: &str) -> CatalogResult<()> {
        if !self.issued_isbns.iter().any(|issued| issued == isbn) {
            self.issued_isbns.push(isbn.to_string());
            return Ok(());
        }

        match self.config.duplicate_isbn {
            DuplicateIsbnPolicy::Warn => {
                warn!("event=duplicate_isbn module=catalog status=warn isbn={isbn} action=allow");
                Ok(())
            }
            DuplicateIsbnPolicy::Reject => {
                warn!("event=duplicate_isbn module=catalog status=warn isbn={isbn} action=reject");
                Err(CatalogError::DuplicateIsbn(isbn.to_string()))
            }
        }
    }

    /// Registers a reader and links any initial books without ratings.
    ///
    /// # Errors
    /// - `InvalidEmail` when `valid_email` fails; nothing is registered.
    /// - `DuplicateUser` when the email is taken; the existing user is untouched.
    pub fn add_user(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        initial_books: &[Book],
    ) -> CatalogResult<()> {
        let email = email.into();
        if !self.valid_email(&email) {
            return Err(CatalogError::InvalidEmail(email));
        }
        if self.users.contains(&email) {
            warn!("event=user_add module=catalog status=warn reason=duplicate email={email}");
            return Err(CatalogError::DuplicateUser(email));
        }

        self.users.insert(User::new(name, email.as_str()))?;
        info!("event=user_add module=catalog status=ok email={email}");

        for book in initial_books {
            self.add_book_to_user(book, &email, None)?;
        }
        Ok(())
    }

    /// Records that `email` read `book`, optionally with a rating.
    ///
    /// The user's record and the read count are updated even when the book
    /// rejects the rating.
    ///
    /// # Errors
    /// - `UnknownUser` when `email` is not registered; nothing changes.
    pub fn add_book_to_user(
        &mut self,
        book: &Book,
        email: &str,
        rating: Option<i32>,
    ) -> CatalogResult<ReadOutcome> {
        let Some(user) = self.users.get_mut(email) else {
            warn!("event=book_read module=catalog status=warn reason=unknown_user email={email}");
            return Err(CatalogError::UnknownUser(email.to_string()));
        };
        user.read_book(book.key(), rating);

        let entry = self.books.entry_for(book);
        let rating_accepted = entry.book.add_rating(rating).is_ok();
        entry.read_count += 1;

        info!(
            "event=book_read module=catalog status=ok email={} isbn={} read_count={} rating_accepted={}",
            email,
            book.isbn(),
            entry.read_count,
            rating_accepted
        );
        Ok(ReadOutcome {
            read_count: entry.read_count,
            rating_accepted,
        })
    }

    /// Moves a registered user to a new email without format validation.
    ///
    /// # Errors
    /// - `UnknownUser` when `current` is not registered.
    /// - `DuplicateUser` when `new_email` is already taken.
    pub fn change_user_email(&mut self, current: &str, new_email: &str) -> CatalogResult<()> {
        self.users.rekey(current, new_email).map_err(|err| {
            let err = CatalogError::from(err);
            warn!("event=user_email_change module=catalog status=warn reason=\"{err}\"");
            err
        })
    }

    /// Narrow heuristic: needs an `@` and a `.org`, `.com` or `.edu` ending.
    pub fn valid_email(&self, email: &str) -> bool {
        let valid = is_valid_email(email);
        if !valid {
            warn!("event=email_check module=catalog status=warn email={email} valid=false");
        }
        valid
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    /// Users in registration order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Catalog copy of a book, carrying the ratings of every reader.
    pub fn book(&self, key: &BookKey) -> Option<&Book> {
        self.books.get(key).map(|entry| &entry.book)
    }

    /// Books in first-read order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().map(|entry| &entry.book)
    }

    pub fn read_count(&self, key: &BookKey) -> Option<u32> {
        self.books.get(key).map(|entry| entry.read_count)
    }

    pub fn issued_isbns(&self) -> &[String] {
        &self.issued_isbns
    }

    pub fn write_catalog<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for book in self.books() {
            writeln!(out, "{book}")?;
        }
        Ok(())
    }

    pub fn write_users<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for user in self.users() {
            writeln!(out, "{user}")?;
        }
        Ok(())
    }

    pub fn print_catalog(&self) -> io::Result<()> {
        self.write_catalog(&mut io::stdout().lock())
    }

    pub fn print_users(&self) -> io::Result<()> {
        self.write_users(&mut io::stdout().lock())
    }

    /// Book with the highest read count; `None` before any read.
    pub fn most_read_book(&self) -> Option<&Book> {
        let scored = self
            .books
            .iter()
            .map(|entry| (&entry.book, f64::from(entry.read_count)));
        select_best(scored, self.config.tie_break)
    }

    /// Book with the highest average rating; unrated books are skipped.
    pub fn highest_rated_book(&self) -> Option<&Book> {
        let scored = self
            .books()
            .filter_map(|book| book.average_rating().map(|avg| (book, avg)));
        select_best(scored, self.config.tie_break)
    }

    /// User with the highest personal average; `None` without users.
    pub fn most_positive_user(&self) -> Option<&User> {
        let scored = self.users().map(|user| (user, user.average_rating()));
        select_best(scored, self.config.tie_break)
    }
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
