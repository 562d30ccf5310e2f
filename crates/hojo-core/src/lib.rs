//! Hojo Core Library
//!
//! Rubric scoring for small-business subsidy business plans:
//! - Pattern-based feature extraction from plan text
//! - Weighted four-criterion rubric with strict mode
//! - Keyword-triggered bonus points
//! - Templated improvement recommendations
//! - Scoring orchestration with a basic-requirements gate
//! - Pluggable document-to-text sources (plain text, PDF)
//! - JSON and CSV export
//! - TOML settings with embedded defaults

pub mod bonus;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod recommend;
pub mod rubric;
pub mod settings;
pub mod source;

pub use bonus::analyze_bonuses;
pub use engine::{score_text, ScoringEngine, ScoringOptions};
pub use error::{Error, Result};
pub use export::ExportKind;
pub use extract::extract;
pub use models::{
    Amount, AmountUnit, BonusAnalysis, BonusItem, Criterion, CriterionScore, EvaluationLevel,
    ExtractedDocument, Improvement, Priority, ScoringResult, SubCriterionScore,
};
pub use rubric::RubricScorer;
pub use settings::Settings;
pub use source::{
    analyze_bytes, source_for, DocumentAnalysis, PdfTextSource, PlainTextSource, TextSource,
};
