//! Catalog and logging configuration.
//!
//! # Responsibility
//! - Hold the policy knobs the catalog consults at runtime.
//! - Provide defaults that reproduce the historical behavior.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reaction to a factory call that reuses an issued ISBN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIsbnPolicy {
    /// Log a warning and create the book anyway.
    #[default]
    Warn,
    /// Refuse to create the book.
    Reject,
}

/// Winner selection among candidates sharing the maximal score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earliest candidate in insertion order wins.
    FirstSeen,
    /// Latest candidate in insertion order wins.
    #[default]
    LastSeen,
}

/// Runtime policies for one catalog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub duplicate_isbn: DuplicateIsbnPolicy,
    pub tie_break: TieBreak,
}

/// Logging backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory for rotating log files; stderr when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}
