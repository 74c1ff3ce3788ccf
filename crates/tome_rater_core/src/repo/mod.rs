//! In-memory storage backing the catalog service.
//!
//! # Responsibility
//! - Keep unique-key collections in insertion order.
//! - Leave validation and logging to the service layer.
//!
//! # Invariants
//! - Each key maps to exactly one slot; slots are never removed.

pub mod book_ledger;
pub mod user_registry;
