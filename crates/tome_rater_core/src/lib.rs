//! Core domain logic for TomeRater.
//! This crate owns the reader/book catalog and its aggregate queries.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CatalogConfig, DuplicateIsbnPolicy, LoggingConfig, TieBreak};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookKey, BookKind, RatingError, MAX_RATING, MIN_RATING};
pub use model::user::{User, UserSummary};
pub use service::catalog::{Catalog, CatalogError, CatalogResult, ReadOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
