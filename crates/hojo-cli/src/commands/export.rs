//! Export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use hojo_core::export::{default_file_name, write_export};
use hojo_core::{ExportKind, ScoringEngine, Settings};

use super::{load_document, scoring_options};

pub fn cmd_export(
    settings: &Settings,
    file: &Path,
    kind: ExportKind,
    out: Option<PathBuf>,
    strict_override: Option<bool>,
) -> Result<()> {
    let doc = load_document(file)?;
    let options = scoring_options(settings, strict_override);
    let result = ScoringEngine::with_options(options).score_document(&doc);

    let path = out.unwrap_or_else(|| PathBuf::from(default_file_name(kind, &Local::now())));
    write_export(kind, &result, &path)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;

    println!("✅ Exported {} to {}", kind, path.display());
    Ok(())
}
