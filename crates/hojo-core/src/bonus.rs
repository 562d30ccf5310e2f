//! Bonus point analysis
//!
//! Two fixed tables (priority and policy bonuses) award points when any of
//! their keywords appear in the text. Bonuses stack without interaction.

use tracing::debug;

use crate::config::{self, BonusDef};
use crate::extract::{contains_any, normalize_text};
use crate::models::{BonusAnalysis, BonusItem};

/// Evaluate both bonus tables against raw text
pub fn analyze_bonuses(text: &str) -> BonusAnalysis {
    let lower = normalize_text(text).to_lowercase();

    let priority_bonuses = evaluate_table(&lower, config::PRIORITY_BONUSES);
    let policy_bonuses = evaluate_table(&lower, config::POLICY_BONUSES);

    let total_points: u32 = priority_bonuses
        .iter()
        .chain(policy_bonuses.iter())
        .map(|b| b.points)
        .sum();

    debug!(total_points, "Bonus analysis complete");

    BonusAnalysis {
        total_points,
        priority_bonuses,
        policy_bonuses,
    }
}

fn evaluate_table(text_lower: &str, table: &[BonusDef]) -> Vec<BonusItem> {
    table
        .iter()
        .map(|def| {
            let eligible = contains_any(text_lower, def.keywords);
            if eligible {
                debug!(bonus = def.name, points = def.points, "Bonus eligible");
            }
            BonusItem {
                name: def.name.to_string(),
                eligible,
                points: if eligible { def.points } else { 0 },
                requirements: requirement_text(def),
            }
        })
        .collect()
}

/// Human-readable requirement, e.g. "以下のキーワードに関する記載: 赤字, 賃上げ"
fn requirement_text(def: &BonusDef) -> String {
    format!("以下のキーワードに関する記載: {}", def.keywords.join(", "))
}
