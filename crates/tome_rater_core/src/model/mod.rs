//! Domain model for readers and books.
//!
//! # Responsibility
//! - Define the entities the catalog coordinates.
//! - Keep entity-local rules (rating range, equality) next to the data.
//!
//! # Invariants
//! - Books are identified by `(title, isbn)` regardless of kind.
//! - Users are compared by `(name, email)`.

pub mod book;
pub mod user;
