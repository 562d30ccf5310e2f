//! Scoring orchestrator
//!
//! Runs the full pipeline over one document:
//!
//! ```text
//! raw text ──> extract ──> basic-requirements gate ──┬─ fail ──> disqualified result
//!                                                    │
//!                                                    └─ pass ──> rubric ──> bonus ──> total
//!                                                                   │                   │
//!                                                                   │        strict adjustment
//!                                                                   │                   │
//!                                                                   └──> recommendations ┴──> ScoringResult
//! ```
//!
//! Gate failure is a normal outcome. Internal faults (an invalid rubric
//! table, a non-finite score) are caught here and returned as a result with
//! level [`EvaluationLevel::Error`]; scoring never returns `Err` to callers.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::bonus::analyze_bonuses;
use crate::config;
use crate::error::{Error, Result};
use crate::extract::{contains_any, extract};
use crate::models::{
    BonusAnalysis, EvaluationLevel, ExtractedDocument, Improvement, Priority, ScoringResult,
};
use crate::recommend;
use crate::rubric::{round1, RubricScorer};

/// Message attached to results that fail the basic-requirements gate
pub const GATE_FAILURE_MESSAGE: &str = "基礎審査で必須要件を満たしていません";

/// Runtime options for a scoring run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    /// Apply the harsher-reviewer penalties
    pub strict: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Scores business-plan documents
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    options: ScoringOptions,
    rubric: RubricScorer,
}

impl ScoringEngine {
    /// Engine over the built-in rubric with default options (strict)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ScoringOptions) -> Self {
        Self {
            options,
            rubric: RubricScorer::new(),
        }
    }

    /// Engine over a custom rubric table
    pub fn with_rubric(options: ScoringOptions, rubric: RubricScorer) -> Self {
        Self { options, rubric }
    }

    pub fn options(&self) -> ScoringOptions {
        self.options
    }

    /// Extract and score raw text
    pub fn score_text(&self, text: &str) -> ScoringResult {
        let doc = extract(text);
        self.score_document(&doc)
    }

    /// Score an already-extracted document
    pub fn score_document(&self, doc: &ExtractedDocument) -> ScoringResult {
        match self.try_score(doc) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Scoring failed");
                self.error_result(doc, &e)
            }
        }
    }

    fn try_score(&self, doc: &ExtractedDocument) -> Result<ScoringResult> {
        config::validate_criteria(self.rubric.criteria())
            .map_err(|errors| Error::InvalidConfig(errors.join("; ")))?;

        let strict = self.options.strict;
        let text = doc.text_content.as_str();
        let document_hash = document_hash(text);

        let missing = check_basic_requirements(text);
        if !missing.is_empty() {
            warn!(missing = missing.len(), "Basic requirements not met");
            return Ok(ScoringResult {
                total_score: 0.0,
                evaluation_level: EvaluationLevel::Disqualified,
                adoption_probability: 0.0,
                basic_requirements_passed: false,
                strict_mode: strict,
                detailed_scores: BTreeMap::new(),
                improvements: missing,
                bonus_points: 0,
                bonus_analysis: BonusAnalysis::default(),
                document_hash,
                error: Some(GATE_FAILURE_MESSAGE.to_string()),
                analyzed_at: Utc::now(),
            });
        }

        let detailed_scores = self.rubric.score(doc, strict);
        let bonus_analysis = analyze_bonuses(text);
        let bonus_points = bonus_analysis.total_points;

        let base_score: f64 = detailed_scores.values().map(|s| s.score).sum();
        let mut total = (base_score + f64::from(bonus_points)).min(config::MAX_TOTAL_SCORE);
        if strict {
            total = apply_strict_adjustment(total, text);
        }
        let total_score = round1(total);

        if !total_score.is_finite() {
            return Err(Error::InvalidData(format!(
                "total score is not finite: {}",
                total_score
            )));
        }

        debug!(base_score, bonus_points, total_score, strict, "Totals computed");

        let evaluation_level = EvaluationLevel::from_score(total_score);
        let adoption_probability = adoption_probability(total_score, bonus_points);
        let improvements = recommend::generate(&detailed_scores, text);

        info!(
            total_score,
            level = evaluation_level.as_str(),
            adoption_probability,
            improvements = improvements.len(),
            "Scoring complete"
        );

        Ok(ScoringResult {
            total_score,
            evaluation_level,
            adoption_probability,
            basic_requirements_passed: true,
            strict_mode: strict,
            detailed_scores,
            improvements,
            bonus_points,
            bonus_analysis,
            document_hash,
            error: None,
            analyzed_at: Utc::now(),
        })
    }

    fn error_result(&self, doc: &ExtractedDocument, error: &Error) -> ScoringResult {
        ScoringResult {
            total_score: 0.0,
            evaluation_level: EvaluationLevel::Error,
            adoption_probability: 0.0,
            basic_requirements_passed: false,
            strict_mode: self.options.strict,
            detailed_scores: BTreeMap::new(),
            improvements: Vec::new(),
            bonus_points: 0,
            bonus_analysis: BonusAnalysis::default(),
            document_hash: document_hash(&doc.text_content),
            error: Some(format!("採点処理でエラーが発生しました: {}", error)),
            analyzed_at: Utc::now(),
        }
    }
}

/// Score raw text with the built-in rubric
pub fn score_text(text: &str, strict: bool) -> ScoringResult {
    ScoringEngine::with_options(ScoringOptions { strict }).score_text(text)
}

/// One urgent improvement per gate group with no keyword hit.
/// An empty list means the gate passed.
pub fn check_basic_requirements(text: &str) -> Vec<Improvement> {
    let lower = text.to_lowercase();
    config::GATE_GROUPS
        .iter()
        .filter(|group| !contains_any(&lower, group.keywords))
        .map(|group| Improvement {
            item: format!("{}の記載不足", group.name),
            priority: Priority::Urgent,
            current_issue: format!("{}に関する記載が見つかりません", group.name),
            improvement_method: format!("{}の詳細な記載を追加してください", group.name),
            example: format!("{}について具体的な内容を記載する必要があります", group.name),
        })
        .collect()
}

/// Strict-mode penalties for short documents and documents without figures.
/// Never increases the score; rounding is left to the caller.
pub fn apply_strict_adjustment(score: f64, text: &str) -> f64 {
    let length = text.chars().count();
    let mut adjusted = score;

    if let Some((_, factor)) = config::STRICT_LENGTH_PENALTIES
        .iter()
        .find(|(min_length, _)| length < *min_length)
    {
        adjusted *= factor;
    }

    if !config::AMOUNT_OR_HEADCOUNT_RE.is_match(&text.to_lowercase()) {
        adjusted *= config::STRICT_NO_FIGURES_FACTOR;
    }

    adjusted
}

/// Adoption likelihood in percent from the final score and bonus points
pub fn adoption_probability(score: f64, bonus_points: u32) -> f64 {
    let base = config::ADOPTION_LADDER
        .iter()
        .find(|(min_score, _)| score >= *min_score)
        .map(|(_, probability)| *probability)
        .unwrap_or(config::ADOPTION_FLOOR);

    let adjusted = base + f64::from(bonus_points) * config::ADOPTION_PER_BONUS_POINT;
    round1(adjusted.min(config::ADOPTION_CAP))
}

/// SHA-256 fingerprint of the normalized text, hex encoded
pub fn document_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
