//! CLI demo driver.
//!
//! # Responsibility
//! - Seed a small catalog through the public core API.
//! - Print the catalog, its readers and the aggregate answers.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use tome_rater_core::{
    default_log_level, init_logging, Catalog, CatalogConfig, DuplicateIsbnPolicy, LoggingConfig,
    TieBreak,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    First,
    Last,
}

impl From<TieBreakArg> for TieBreak {
    fn from(value: TieBreakArg) -> Self {
        match value {
            TieBreakArg::First => TieBreak::FirstSeen,
            TieBreakArg::Last => TieBreak::LastSeen,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tome_rater", version, about = "In-memory reader and rating catalog demo")]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rotating log files (stderr when omitted).
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Winner among tied aggregate candidates.
    #[arg(long, value_enum, default_value_t = TieBreakArg::Last)]
    tie_break: TieBreakArg,

    /// Refuse to create books whose ISBN was already issued.
    #[arg(long)]
    reject_duplicate_isbn: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    })
    .context("failed to initialize logging")?;

    let config = CatalogConfig {
        duplicate_isbn: if cli.reject_duplicate_isbn {
            DuplicateIsbnPolicy::Reject
        } else {
            DuplicateIsbnPolicy::Warn
        },
        tie_break: cli.tie_break.into(),
    };
    info!(
        "event=cli_start module=cli status=ok version={} config={:?}",
        tome_rater_core::core_version(),
        config
    );

    let catalog = seed_catalog(config)?;
    report(&catalog)
}

fn seed_catalog(config: CatalogConfig) -> Result<Catalog> {
    let mut catalog = Catalog::with_config(config);

    let society_of_mind =
        catalog.create_non_fiction("Society of Mind", "AI", "beginner", "12345678")?;
    let alice = catalog.create_novel("Alice In Wonderland", "Lewis Carroll", "12345")?;
    let cryptography =
        catalog.create_non_fiction("Applied Cryptography", "Cryptography", "advanced", "1111")?;
    let algorithms = catalog.create_book("Algorithms", "9780262033848")?;
    let oryx = catalog.create_novel("Oryx and Crake", "Margaret Atwood", "9780385721677")?;

    catalog.add_user("Alan Turing", "alan@turing.com", &[])?;
    catalog.add_user("David Marr", "david@computation.org", &[])?;
    catalog.add_user(
        "Marvin Minsky",
        "marvin@mit.edu",
        &[society_of_mind.clone(), algorithms.clone()],
    )?;

    catalog.add_book_to_user(&society_of_mind, "alan@turing.com", Some(1))?;
    catalog.add_book_to_user(&alice, "alan@turing.com", Some(3))?;
    catalog.add_book_to_user(&cryptography, "alan@turing.com", None)?;
    catalog.add_book_to_user(&algorithms, "david@computation.org", Some(4))?;
    catalog.add_book_to_user(&alice, "david@computation.org", Some(4))?;
    catalog.add_book_to_user(&oryx, "david@computation.org", Some(2))?;

    Ok(catalog)
}

fn report(catalog: &Catalog) -> Result<()> {
    println!("Catalog:");
    catalog.print_catalog()?;
    println!();
    println!("Users:");
    catalog.print_users()?;
    println!();

    match catalog.most_read_book() {
        Some(book) => println!("Most read book: {book}"),
        None => println!("Most read book: none"),
    }
    match catalog.highest_rated_book() {
        Some(book) => println!("Highest rated book: {book}"),
        None => println!("Highest rated book: none"),
    }
    match catalog.most_positive_user() {
        Some(user) => println!("Most positive user: {user}"),
        None => println!("Most positive user: none"),
    }
    Ok(())
}
