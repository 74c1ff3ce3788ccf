//! Core use-case services.
//!
//! # Responsibility
//! - Coordinate model entities and in-memory storage into catalog use-cases.
//! - Keep callers decoupled from storage layout.

pub mod catalog;
pub mod ranking;
