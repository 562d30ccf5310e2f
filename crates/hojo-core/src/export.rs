//! Export of scoring results
//!
//! Supports:
//! - Pretty-printed JSON report of the full [`ScoringResult`]
//! - Improvement list as CSV
//! - Per-criterion scores as CSV
//!
//! CSV output starts with a UTF-8 byte-order mark so spreadsheet software
//! detects the encoding of the Japanese headers.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::ScoringResult;

const BOM: char = '\u{feff}';

const IMPROVEMENT_HEADERS: [&str; 5] = ["項目", "優先度", "現状の課題", "改善方法", "記載例"];
const SCORE_HEADERS: [&str; 4] = ["評価項目", "得点", "満点", "達成率"];

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Report,
    Improvements,
    Scores,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Report => "report",
            ExportKind::Improvements => "improvements",
            ExportKind::Scores => "scores",
        }
    }

    /// File name prefix used by [`default_file_name`]
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ExportKind::Report => "scoring_report",
            ExportKind::Improvements => "improvements",
            ExportKind::Scores => "scores",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Report => "json",
            ExportKind::Improvements | ExportKind::Scores => "csv",
        }
    }

    pub fn all() -> &'static [ExportKind] {
        &[ExportKind::Report, ExportKind::Improvements, ExportKind::Scores]
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" | "json" => Ok(ExportKind::Report),
            "improvements" => Ok(ExportKind::Improvements),
            "scores" => Ok(ExportKind::Scores),
            _ => Err(format!(
                "Unknown export kind: {}. Valid options: report, improvements, scores",
                s
            )),
        }
    }
}

/// Timestamped file name, e.g. `scoring_report_20250101_093000.json`
pub fn default_file_name<Tz: TimeZone>(kind: ExportKind, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "{}_{}.{}",
        kind.file_prefix(),
        now.format("%Y%m%d_%H%M%S"),
        kind.extension()
    )
}

/// Render one export kind to a string
pub fn render(kind: ExportKind, result: &ScoringResult) -> Result<String> {
    match kind {
        ExportKind::Report => report_json(result),
        ExportKind::Improvements => improvements_csv(result),
        ExportKind::Scores => scores_csv(result),
    }
}

/// Full result as pretty-printed JSON (non-ASCII kept as-is)
pub fn report_json(result: &ScoringResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn improvements_csv(result: &ScoringResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(IMPROVEMENT_HEADERS)?;

    for improvement in &result.improvements {
        writer.write_record([
            improvement.item.as_str(),
            improvement.priority.label(),
            improvement.current_issue.as_str(),
            improvement.improvement_method.as_str(),
            improvement.example.as_str(),
        ])?;
    }

    finish_csv(writer)
}

/// Criterion scores in declaration order; achievement rate in percent
pub fn scores_csv(result: &ScoringResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(SCORE_HEADERS)?;

    for score in result.detailed_scores.values() {
        writer.write_record([
            score.criterion.label().to_string(),
            format!("{:.1}", score.score),
            format!("{:.1}", score.max_score),
            format!("{:.1}", score.achievement_rate()),
        ])?;
    }

    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    let body = String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))?;

    let mut out = String::with_capacity(body.len() + BOM.len_utf8());
    out.push(BOM);
    out.push_str(&body);
    Ok(out)
}

/// Render and write one export kind to `path`
pub fn write_export(kind: ExportKind, result: &ScoringResult, path: &Path) -> Result<()> {
    let content = render(kind, result)?;
    fs::write(path, content.as_bytes())?;
    info!(kind = kind.as_str(), path = %path.display(), "Export written");
    Ok(())
}
