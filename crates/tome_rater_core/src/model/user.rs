//! Reader domain model.
//!
//! # Responsibility
//! - Track one reader's identity and personal reading record.
//!
//! # Invariants
//! - At most one record entry per `BookKey`; re-reads overwrite.
//! - Ratings are stored raw; range checks belong to `Book::add_rating`.

use crate::model::book::BookKey;
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Registered reader.
#[derive(Debug, Clone)]
pub struct User {
    name: String,
    email: String,
    books: HashMap<BookKey, Option<i32>>,
}

/// Serializable display projection of a reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub books_read: usize,
    pub average_rating: f64,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            books: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replaces the email without format validation.
    pub fn change_email(&mut self, new_email: impl Into<String>) {
        let new_email = new_email.into();
        info!(
            "event=user_email_changed module=model status=ok name={} old_email={} new_email={}",
            self.name, self.email, new_email
        );
        self.email = new_email;
    }

    /// Records a read, replacing any earlier rating for the same book.
    pub fn read_book(&mut self, book: BookKey, rating: Option<i32>) {
        self.books.insert(book, rating);
    }

    /// Number of distinct books read, rated or not.
    pub fn books_read(&self) -> usize {
        self.books.len()
    }

    pub fn has_read(&self, book: &BookKey) -> bool {
        self.books.contains_key(book)
    }

    /// Returns the stored rating, `Some(None)` for an unrated read.
    pub fn rating_for(&self, book: &BookKey) -> Option<Option<i32>> {
        self.books.get(book).copied()
    }

    /// Mean of non-null personal ratings.
    ///
    /// Returns `0.0` both for readers without books and for readers whose
    /// reads are all unrated.
    pub fn average_rating(&self) -> f64 {
        let (total, count) = self
            .books
            .values()
            .flatten()
            .fold((0_i64, 0_usize), |(total, count), &rating| {
                (total + i64::from(rating), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            name: self.name.clone(),
            email: self.email.clone(),
            books_read: self.books_read(),
            average_rating: self.average_rating(),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.email == other.email
    }
}

impl Eq for User {}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User {}, email: {}, number of books read: {}",
            self.name,
            self.email,
            self.books.len()
        )
    }
}
