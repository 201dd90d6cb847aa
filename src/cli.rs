//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::resolver::DEFAULT_AMBIGUITY_THRESHOLD;

/// Top-level CLI entry point for the library reconciliation engine.
#[derive(Parser, Debug)]
#[command(
    name = "steamshelf",
    about = "Steam library reconciliation engine",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Catalog JSON file (app-list shape or a flat array)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Lookup table JSON file carried over from prior runs
    #[arg(long, global = true)]
    pub lookup: Option<PathBuf>,

    /// Owned-app id JSON file used to pre-filter the catalog
    #[arg(long, global = true)]
    pub owned: Option<PathBuf>,

    /// Library root directory (repeatable)
    #[arg(short, long = "library", global = true)]
    pub libraries: Vec<PathBuf>,

    /// Maximum distinct matches a strategy may propose per folder
    #[arg(long, global = true, default_value_t = DEFAULT_AMBIGUITY_THRESHOLD)]
    pub threshold: usize,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve unmatched library folders and report candidates
    Scan,
    /// Resolve folders and write install records for confirmed matches
    Adopt,
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Adopt => "adopt",
            Self::Version => "version",
        }
    }
}
