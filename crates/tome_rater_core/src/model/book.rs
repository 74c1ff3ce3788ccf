//! Book domain model.
//!
//! # Responsibility
//! - Define the book record shared by plain, fiction and non-fiction kinds.
//! - Own the accumulated rating list contributed by every reader.
//!
//! # Invariants
//! - Identity is the `(title, isbn)` pair; `kind` never takes part in
//!   equality or hashing.
//! - Every stored rating is within `MIN_RATING..=MAX_RATING`.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Lowest accepted rating value.
pub const MIN_RATING: i32 = 0;
/// Highest accepted rating value.
pub const MAX_RATING: i32 = 4;

/// Identity pair used to key books in maps and ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookKey {
    pub title: String,
    pub isbn: String,
}

impl BookKey {
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            isbn: isbn.into(),
        }
    }
}

impl Display for BookKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.title, self.isbn)
    }
}

/// Closed set of book kinds with their kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookKind {
    /// Book without extra metadata.
    Plain,
    /// Novel written by `author`.
    Fiction { author: String },
    /// Manual on `subject` aimed at readers of `level`.
    NonFiction { subject: String, level: String },
}

/// Rating rejection reasons for [`Book::add_rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    Missing,
    OutOfRange(i32),
}

impl Display for RatingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "rating is missing"),
            Self::OutOfRange(value) => write!(
                f,
                "rating {value} is outside {MIN_RATING}..={MAX_RATING}"
            ),
        }
    }
}

impl Error for RatingError {}

/// Book record with its shared rating history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BookRecord")]
pub struct Book {
    title: String,
    isbn: String,
    #[serde(flatten)]
    kind: BookKind,
    ratings: Vec<u8>,
}

/// Unchecked wire shape; converted into `Book` only when every rating is in range.
#[derive(Deserialize)]
struct BookRecord {
    title: String,
    isbn: String,
    #[serde(flatten)]
    kind: BookKind,
    #[serde(default)]
    ratings: Vec<u8>,
}

impl TryFrom<BookRecord> for Book {
    type Error = RatingError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        if let Some(&bad) = record
            .ratings
            .iter()
            .find(|&&r| i32::from(r) > MAX_RATING)
        {
            return Err(RatingError::OutOfRange(i32::from(bad)));
        }
        Ok(Self {
            title: record.title,
            isbn: record.isbn,
            kind: record.kind,
            ratings: record.ratings,
        })
    }
}

impl Book {
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self::with_kind(title, isbn, BookKind::Plain)
    }

    pub fn fiction(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            isbn,
            BookKind::Fiction {
                author: author.into(),
            },
        )
    }

    pub fn non_fiction(
        title: impl Into<String>,
        subject: impl Into<String>,
        level: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            isbn,
            BookKind::NonFiction {
                subject: subject.into(),
                level: level.into(),
            },
        )
    }

    pub fn with_kind(title: impl Into<String>, isbn: impl Into<String>, kind: BookKind) -> Self {
        Self {
            title: title.into(),
            isbn: isbn.into(),
            kind,
            ratings: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn kind(&self) -> &BookKind {
        &self.kind
    }

    /// Returns an owned copy of the identity pair.
    pub fn key(&self) -> BookKey {
        BookKey::new(self.title.as_str(), self.isbn.as_str())
    }

    /// Replaces the ISBN without any uniqueness check.
    ///
    /// Changing the ISBN changes the book identity, so this is meant for
    /// books that have not been linked to a catalog yet.
    pub fn set_isbn(&mut self, new_isbn: impl Into<String>) {
        let new_isbn = new_isbn.into();
        info!(
            "event=book_isbn_changed module=model status=ok title={} old_isbn={} new_isbn={}",
            self.title, self.isbn, new_isbn
        );
        self.isbn = new_isbn;
    }

    pub fn author(&self) -> Option<&str> {
        match &self.kind {
            BookKind::Fiction { author } => Some(author),
            _ => None,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        match &self.kind {
            BookKind::NonFiction { subject, .. } => Some(subject),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<&str> {
        match &self.kind {
            BookKind::NonFiction { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Appends one rating from a reader.
    ///
    /// # Errors
    /// - `RatingError::Missing` when `rating` is `None`.
    /// - `RatingError::OutOfRange` when outside `MIN_RATING..=MAX_RATING`.
    ///
    /// The rating list is unchanged on error.
    pub fn add_rating(&mut self, rating: Option<i32>) -> Result<(), RatingError> {
        let result = match rating {
            None => Err(RatingError::Missing),
            Some(value) if !(MIN_RATING..=MAX_RATING).contains(&value) => {
                Err(RatingError::OutOfRange(value))
            }
            Some(value) => {
                // Range check above keeps the value within u8.
                self.ratings.push(value as u8);
                Ok(())
            }
        };

        if let Err(err) = &result {
            warn!(
                "event=rating_rejected module=model status=warn title={} isbn={} reason=\"{}\"",
                self.title, self.isbn, err
            );
        }
        result
    }

    pub fn ratings(&self) -> &[u8] {
        &self.ratings
    }

    /// Arithmetic mean of accepted ratings, or `None` when nobody rated it.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let total: u32 = self.ratings.iter().map(|&r| u32::from(r)).sum();
        Some(f64::from(total) / self.ratings.len() as f64)
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.isbn.hash(state);
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            BookKind::Plain => write!(f, "{} (ISBN {})", self.title, self.isbn),
            BookKind::Fiction { author } => write!(f, "{} by {}", self.title, author),
            BookKind::NonFiction { subject, level } => {
                write!(f, "{}, a {} manual on {}", self.title, level, subject)
            }
        }
    }
}
