//! Document-to-text sources
//!
//! A [`TextSource`] turns the bytes of an uploaded document into a single
//! text string, or fails with [`Error::Conversion`]. Plain UTF-8 text and PDF
//! are supported; [`source_for`] picks one from the file name or the leading
//! bytes.
//!
//! [`analyze_bytes`] wraps a source and the extractor into the
//! success/failure envelope shown to users. When conversion fails the
//! extractor and scorer are never run.

use std::panic;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::extract::extract;
use crate::models::ExtractedDocument;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Shown when a document converts to nothing but whitespace
pub const NO_TEXT_MESSAGE: &str = "テキストを抽出できませんでした";

/// Shown when a PDF has no text layer (e.g. a scanned image)
pub const PDF_NO_TEXT_MESSAGE: &str = "PDFからテキストを抽出できませんでした";

/// Converts raw document bytes to text
pub trait TextSource {
    /// Short name for logs (e.g. "text")
    fn name(&self) -> &str;

    /// Convert document bytes into a single string
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

/// UTF-8 plain text, with or without a byte-order mark
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn name(&self) -> &str {
        "text"
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Conversion(format!("input is not valid UTF-8: {}", e)))?;

        if text.trim().is_empty() {
            return Err(Error::Conversion(NO_TEXT_MESSAGE.to_string()));
        }

        Ok(text.to_string())
    }
}

/// PDF documents with a text layer
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed files instead of returning an error
        let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| {
                Error::Conversion("PDFテキスト抽出エラー: unreadable document structure".to_string())
            })?
            .map_err(|e| Error::Conversion(format!("PDFテキスト抽出エラー: {}", e)))?;

        if text.trim().is_empty() {
            return Err(Error::Conversion(PDF_NO_TEXT_MESSAGE.to_string()));
        }

        debug!(chars = text.chars().count(), "Extracted PDF text");
        Ok(text)
    }
}

/// Pick a source by file extension, falling back to the PDF signature for
/// input without a usable name (stdin)
pub fn source_for(path: Option<&Path>, bytes: &[u8]) -> &'static dyn TextSource {
    let extension = path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => &PdfTextSource,
        Some(_) => &PlainTextSource,
        None if bytes.starts_with(PDF_MAGIC) => &PdfTextSource,
        None => &PlainTextSource,
    }
}

/// Outcome of converting and extracting one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Empty when conversion failed
    pub text_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<ExtractedDocument>,
}

impl DocumentAnalysis {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            text_content: String::new(),
            document: None,
        }
    }
}

/// Convert bytes with `source` and run the extractor on the result
pub fn analyze_bytes(source: &dyn TextSource, bytes: &[u8]) -> DocumentAnalysis {
    match source.extract_text(bytes) {
        Ok(text) => {
            let document = extract(&text);
            debug!(
                source = source.name(),
                length = document.extracted_length,
                "Document converted"
            );
            DocumentAnalysis {
                success: true,
                error: None,
                text_content: document.text_content.clone(),
                document: Some(document),
            }
        }
        Err(Error::Conversion(message)) => {
            warn!(source = source.name(), error = %message, "Conversion failed");
            DocumentAnalysis::failed(message)
        }
        Err(e) => {
            warn!(source = source.name(), error = %e, "Conversion failed");
            DocumentAnalysis::failed(format!("文書解析中にエラーが発生しました: {}", e))
        }
    }
}
