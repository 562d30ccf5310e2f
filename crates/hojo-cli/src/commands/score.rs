//! Score command implementation

use std::path::Path;

use anyhow::{Context, Result};
use hojo_core::{BonusItem, EvaluationLevel, ScoringEngine, ScoringResult, Settings};
use tracing::warn;

use super::{load_document, scoring_options, show_details};

pub fn cmd_score(
    settings: &Settings,
    file: &Path,
    strict_override: Option<bool>,
    json: bool,
    details_override: Option<bool>,
) -> Result<()> {
    let doc = load_document(file)?;
    let options = scoring_options(settings, strict_override);
    let result = ScoringEngine::with_options(options).score_document(&doc);

    if json || settings.output.json {
        let out = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", out);
    } else {
        print_report(&result, show_details(settings, details_override));
    }

    if result.evaluation_level == EvaluationLevel::Error {
        warn!(
            hash = %result.document_hash,
            error = result.error.as_deref().unwrap_or_default(),
            "Scoring returned an error result"
        );
        anyhow::bail!(
            "Scoring failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

fn level_icon(level: EvaluationLevel) -> &'static str {
    match level {
        EvaluationLevel::Excellent => "🏆",
        EvaluationLevel::Good => "✅",
        EvaluationLevel::Fair => "🟡",
        EvaluationLevel::Insufficient => "⚠️ ",
        EvaluationLevel::Disqualified => "❌",
        EvaluationLevel::Error => "💥",
    }
}

/// Terminal report for one scoring result
pub fn print_report(result: &ScoringResult, details: bool) {
    println!();
    println!("📊 採点結果");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {} 総合スコア: {:.1} / 100 ({})",
        level_icon(result.evaluation_level),
        result.total_score,
        result.evaluation_level.label()
    );
    println!("   採択可能性: {:.1}%", result.adoption_probability);
    println!("   加点: {}点", result.bonus_points);
    println!(
        "   モード: {}",
        if result.strict_mode { "厳格" } else { "標準" }
    );

    if let Some(error) = &result.error {
        println!();
        println!("   ❌ {}", error);
    }

    if !result.detailed_scores.is_empty() {
        println!();
        println!("   項目別得点:");
        for score in result.detailed_scores.values() {
            println!(
                "     {:<24} {:>5.1} / {:>4.1}  ({:.1}%)",
                score.criterion.label(),
                score.score,
                score.max_score,
                score.achievement_rate()
            );
            if details {
                for sub in &score.sub_scores {
                    println!(
                        "        - {} (重み {:.2}): 網羅 {:.2} / 品質 {:.2} / 具体性 {:.2}",
                        sub.name, sub.weight, sub.coverage, sub.quality, sub.specificity
                    );
                }
            }
        }
    }

    print_bonus_table("優先政策加点", &result.bonus_analysis.priority_bonuses);
    print_bonus_table("政策加点", &result.bonus_analysis.policy_bonuses);

    if !result.improvements.is_empty() {
        println!();
        println!("   改善提案 ({}件):", result.improvements.len());
        for improvement in &result.improvements {
            println!(
                "     [{}] {}",
                improvement.priority.label(),
                improvement.item
            );
            if details {
                println!("        課題: {}", improvement.current_issue);
                println!("        方法: {}", improvement.improvement_method);
                println!("        例:   {}", improvement.example);
            }
        }
    }

    println!();
}

fn print_bonus_table(title: &str, items: &[BonusItem]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("   {}:", title);
    for line in bonus_lines(items) {
        println!("{}", line);
    }
}

/// Every bonus with its status; ineligible ones show what would qualify
pub fn bonus_lines(items: &[BonusItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for bonus in items {
        if bonus.eligible {
            lines.push(format!("     ✅ {} ({}点) 該当", bonus.name, bonus.points));
        } else {
            lines.push(format!("     ・ {} 非該当", bonus.name));
            lines.push(format!("        要件: {}", bonus.requirements));
        }
    }
    lines
}
