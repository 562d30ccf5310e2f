//! Improvement recommendations
//!
//! Criterion templates come first, in criterion order, followed by the two
//! document-wide checks (numeric data, then content volume).

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{self, ImprovementTemplate};
use crate::models::{Criterion, CriterionScore, Improvement, Priority};

impl ImprovementTemplate {
    /// Instantiate this template with a priority
    pub fn to_improvement(&self, priority: Priority) -> Improvement {
        Improvement {
            item: self.item.to_string(),
            priority,
            current_issue: self.current_issue.to_string(),
            improvement_method: self.improvement_method.to_string(),
            example: self.example.to_string(),
        }
    }
}

/// Build the improvement list for a set of criterion scores and the scored text
pub fn generate(scores: &BTreeMap<Criterion, CriterionScore>, text: &str) -> Vec<Improvement> {
    let mut improvements = Vec::new();

    for set in config::IMPROVEMENT_TEMPLATES {
        let Some(score) = scores.get(&set.criterion) else {
            continue;
        };
        if score.score >= set.low_threshold {
            continue;
        }

        let priority = if score.score < set.low_threshold * config::IMPORTANT_THRESHOLD_RATIO {
            Priority::Important
        } else {
            Priority::Recommended
        };
        debug!(
            criterion = set.criterion.as_str(),
            score = score.score,
            threshold = set.low_threshold,
            priority = priority.as_str(),
            "Criterion below threshold"
        );

        improvements.extend(set.templates.iter().map(|t| t.to_improvement(priority)));
    }

    let text_lower = text.to_lowercase();

    if !config::CURRENCY_AMOUNT_RE.is_match(&text_lower) {
        improvements.push(config::NUMERIC_DATA_IMPROVEMENT.to_improvement(Priority::Important));
    }

    if text_lower.chars().count() < config::MIN_CONTENT_LENGTH {
        improvements.push(config::CONTENT_VOLUME_IMPROVEMENT.to_improvement(Priority::Recommended));
    }

    improvements
}
