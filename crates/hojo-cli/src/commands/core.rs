//! Shared command utilities
//!
//! This module contains:
//! - `load_settings` - Resolve settings from --config, the user file or defaults
//! - `read_input` - Read plan bytes from a file or stdin
//! - `load_document` - Convert and extract a plan (text or PDF), failing on conversion errors
//! - `scoring_options` - Merge settings with command-line overrides
//! - `show_details` - Merge the details setting with its command-line override

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use hojo_core::{analyze_bytes, source_for, ExtractedDocument, ScoringOptions, Settings};
use tracing::debug;

pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let settings = Settings::load(config).context("Failed to load settings")?;
    debug!(
        strict = settings.scoring.strict,
        show_details = settings.output.show_details,
        json = settings.output.json,
        "Settings resolved"
    );
    Ok(settings)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read raw bytes from `path`, or from stdin when `path` is "-"
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdin(path) {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Convert input bytes to text and extract the document
pub fn load_document(path: &Path) -> Result<ExtractedDocument> {
    let bytes = read_input(path)?;
    let name = if is_stdin(path) { None } else { Some(path) };
    let source = source_for(name, &bytes);
    debug!(source = source.name(), bytes = bytes.len(), "Converting input");
    let analysis = analyze_bytes(source, &bytes);

    match analysis.document {
        Some(doc) if analysis.success => Ok(doc),
        _ => anyhow::bail!(
            "Could not read {}: {}",
            path.display(),
            analysis.error.unwrap_or_default()
        ),
    }
}

/// Settings value unless a command-line flag overrides it
pub fn scoring_options(settings: &Settings, strict_override: Option<bool>) -> ScoringOptions {
    match strict_override {
        Some(strict) => ScoringOptions { strict },
        None => settings.scoring_options(),
    }
}

/// Settings value unless `--details` or `--no-details` overrides it
pub fn show_details(settings: &Settings, details_override: Option<bool>) -> bool {
    details_override.unwrap_or(settings.output.show_details)
}
