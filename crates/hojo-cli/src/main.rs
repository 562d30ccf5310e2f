//! Hojo CLI - Business-plan rubric scorer
//!
//! Usage:
//!   hojo score plan.txt               Score a plan (terminal report)
//!   hojo score plan.txt --json        Score a plan (JSON)
//!   hojo score plan.pdf --no-details  Score a PDF plan, summary only
//!   hojo extract plan.txt             Show extracted fields
//!   hojo export plan.txt --kind scores  Write scores CSV
//!   hojo criteria                     Show rubric and bonus tables

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Score {
            file,
            strictness,
            json,
            details,
        } => {
            let settings = commands::load_settings(config)?;
            commands::cmd_score(
                &settings,
                &file,
                strictness.resolve(),
                json,
                details.resolve(),
            )
        }
        Commands::Extract { file } => commands::cmd_extract(&file),
        Commands::Export {
            file,
            kind,
            out,
            strictness,
        } => {
            let settings = commands::load_settings(config)?;
            let kind: hojo_core::ExportKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_export(&settings, &file, kind, out, strictness.resolve())
        }
        Commands::Criteria => commands::cmd_criteria(),
    }
}
