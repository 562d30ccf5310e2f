//! Extract command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::load_document;

/// Print the extracted document as JSON
pub fn cmd_extract(file: &Path) -> Result<()> {
    let doc = load_document(file)?;
    let out = serde_json::to_string_pretty(&doc).context("Failed to serialize document")?;
    println!("{}", out);
    Ok(())
}
