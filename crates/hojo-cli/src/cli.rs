//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Hojo - Score subsidy business plans against the review rubric
#[derive(Parser)]
#[command(name = "hojo")]
#[command(about = "Business-plan rubric scorer for small-business subsidy applications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to ~/.config/hojo/config.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Strictness override; settings decide when neither flag is given
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct StrictnessArgs {
    /// Apply strict-mode penalties
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Disable strict-mode penalties
    #[arg(long)]
    pub lenient: bool,
}

impl StrictnessArgs {
    /// Flag override, if any
    pub fn resolve(&self) -> Option<bool> {
        if self.strict {
            Some(true)
        } else if self.lenient {
            Some(false)
        } else {
            None
        }
    }
}

/// Breakdown override; settings decide when neither flag is given
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DetailsArgs {
    /// Show sub-criterion breakdowns and improvement details
    #[arg(long, conflicts_with = "no_details")]
    pub details: bool,

    /// Hide sub-criterion breakdowns and improvement details
    #[arg(long)]
    pub no_details: bool,
}

impl DetailsArgs {
    /// Flag override, if any
    pub fn resolve(&self) -> Option<bool> {
        if self.details {
            Some(true)
        } else if self.no_details {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a business plan
    Score {
        /// Plan file (plain text or PDF), or - for stdin
        file: PathBuf,

        #[command(flatten)]
        strictness: StrictnessArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        details: DetailsArgs,
    },

    /// Print the extracted document fields as JSON
    Extract {
        /// Plan file (plain text or PDF), or - for stdin
        file: PathBuf,
    },

    /// Export a scoring result to JSON or CSV
    Export {
        /// Plan file (plain text or PDF), or - for stdin
        file: PathBuf,

        /// What to export: report, improvements, scores
        #[arg(short, long, default_value = "report")]
        kind: String,

        /// Output path (defaults to a timestamped name in the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        strictness: StrictnessArgs,
    },

    /// Show the rubric criteria and bonus tables
    Criteria,
}
