//! Weighted rubric scoring
//!
//! Each criterion is the weighted sum of its sub-criteria, scaled to the
//! criterion's maximum. A sub-criterion blends three normalized components:
//!
//! - keyword coverage of its own keyword list
//! - document quality (length, numeric data, concrete phrasing)
//! - specificity (presence of date, amount, headcount, percentage and count shapes)
//!
//! Quality and specificity only look at the document, so every sub-criterion
//! of a run sees the same values for them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{self, CriterionDef, SubCriterionDef};
use crate::extract::contains_keyword;
use crate::models::{Criterion, CriterionScore, ExtractedDocument, SubCriterionScore};

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scores documents against a set of criterion tables
#[derive(Debug, Clone, Copy)]
pub struct RubricScorer {
    criteria: &'static [CriterionDef],
}

impl Default for RubricScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RubricScorer {
    /// Scorer over the built-in rubric
    pub fn new() -> Self {
        Self {
            criteria: config::CRITERIA,
        }
    }

    pub fn with_criteria(criteria: &'static [CriterionDef]) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &'static [CriterionDef] {
        self.criteria
    }

    /// Score every criterion. Deterministic for identical inputs.
    pub fn score(&self, doc: &ExtractedDocument, strict: bool) -> BTreeMap<Criterion, CriterionScore> {
        let text_lower = doc.text_content.to_lowercase();
        let quality = quality_score(&text_lower);
        let specificity = specificity_score(&text_lower);

        self.criteria
            .iter()
            .map(|def| {
                let score = score_criterion(def, &text_lower, quality, specificity, strict);
                debug!(
                    criterion = def.criterion.as_str(),
                    score = score.score,
                    max = score.max_score,
                    "Criterion scored"
                );
                (def.criterion, score)
            })
            .collect()
    }
}

fn score_criterion(
    def: &CriterionDef,
    text_lower: &str,
    quality: f64,
    specificity: f64,
    strict: bool,
) -> CriterionScore {
    let max_score = def.criterion.max_score();
    let sub_scores: Vec<SubCriterionScore> = def
        .sub_criteria
        .iter()
        .map(|sub| score_sub_criterion(sub, text_lower, quality, specificity))
        .collect();

    let mut raw = sub_scores.iter().map(|s| s.contribution).sum::<f64>() * max_score;
    if strict {
        raw *= config::STRICT_CRITERION_FACTOR;
    }

    CriterionScore {
        criterion: def.criterion,
        score: round1(raw.clamp(0.0, max_score)),
        max_score,
        sub_scores,
    }
}

fn score_sub_criterion(
    sub: &SubCriterionDef,
    text_lower: &str,
    quality: f64,
    specificity: f64,
) -> SubCriterionScore {
    let coverage = keyword_coverage(text_lower, sub.keywords);
    let contribution = (coverage * config::COVERAGE_WEIGHT
        + quality * config::QUALITY_WEIGHT
        + specificity * config::SPECIFICITY_WEIGHT)
        * sub.weight;

    SubCriterionScore {
        name: sub.name.to_string(),
        weight: sub.weight,
        coverage,
        quality,
        specificity,
        contribution,
    }
}

/// Share of keywords present, scaled by 1.5 and capped at 1.0
pub fn keyword_coverage(text_lower: &str, keywords: &[&str]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let hits = keywords
        .iter()
        .filter(|k| contains_keyword(text_lower, k))
        .count();
    (hits as f64 / keywords.len() as f64 * config::COVERAGE_SCALE).min(1.0)
}

/// Length steps, numeric data and concrete phrasing, capped at 1.0
pub fn quality_score(text: &str) -> f64 {
    let length = text.chars().count();
    let mut score = 0.0;

    for (min_length, credit) in config::QUALITY_LENGTH_STEPS {
        if length > *min_length {
            score += credit;
        }
    }

    if config::QUALITY_NUMERIC_RE.is_match(text) {
        score += config::QUALITY_NUMERIC_CREDIT;
    }

    let phrases = config::QUALITY_CONCRETE_PHRASES;
    let concrete = phrases.iter().filter(|p| text.contains(*p)).count();
    score += (concrete as f64 / phrases.len() as f64).min(config::QUALITY_CONCRETE_CAP);

    score.min(1.0)
}

/// 0.2 for each numeric shape present, capped at 1.0
pub fn specificity_score(text: &str) -> f64 {
    let present = config::SPECIFICITY_RES
        .iter()
        .filter(|re| re.is_match(text))
        .count();
    (present as f64 * config::SPECIFICITY_STEP).min(1.0)
}
