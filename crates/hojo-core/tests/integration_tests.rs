//! Integration tests for hojo-core
//!
//! These tests exercise the full text → extract → score → recommend workflow.

use hojo_core::{
    analyze_bonuses, analyze_bytes, config, extract,
    extract::normalize_text,
    models::{AmountUnit, Criterion, EvaluationLevel, Priority},
    rubric::round1,
    score_text, PlainTextSource, ScoringEngine, ScoringOptions,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Text containing every sub-criterion keyword, every numeric shape and
/// enough filler to pass 1200 characters
fn full_marks_plan() -> String {
    let mut text = String::from("株式会社サンプル商店\n代表者：佐藤花子\n\n");
    for def in config::CRITERIA {
        for sub in def.sub_criteria {
            text.push_str(&format!("{}: {}\n", sub.name, sub.keywords.join("、")));
        }
    }
    text.push_str("\n具体的に2024年4月から実施し、詳細は明確により記載について示す。\n");
    text.push_str("売上1,200万円、来店客数1万人、前年比15%増、説明会を年4回開催する。\n");
    while text.chars().count() < 1200 {
        text.push_str("地元の顧客に向けて丁寧な接客を続ける。");
    }
    text
}

/// Passes the basic-requirements gate with no amounts or headcounts
const MINIMAL_PLAN: &str = "事業内容は小売業。売上は横ばい。今後の方針として補助事業の内容を検討する。";

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_scenario_a_gate_failure() {
    let result = score_text("今日は天気が良いので散歩に出かけた。", true);

    assert!(!result.basic_requirements_passed);
    assert_eq!(result.total_score, 0.0);
    assert_eq!(result.evaluation_level, EvaluationLevel::Disqualified);
    assert_eq!(result.adoption_probability, 0.0);
    assert!(result.detailed_scores.is_empty());
    assert_eq!(result.improvements.len(), 4);
    assert!(result
        .improvements
        .iter()
        .all(|i| i.priority == Priority::Urgent));
}

#[test]
fn test_scenario_b_full_marks() {
    let plan = full_marks_plan();
    let result = score_text(&plan, false);

    assert!(result.basic_requirements_passed);
    let achieved: Vec<(Criterion, f64)> = result
        .detailed_scores
        .iter()
        .map(|(c, s)| (*c, s.score))
        .collect();
    assert_eq!(
        achieved,
        vec![
            (Criterion::SituationAnalysis, 25.0),
            (Criterion::PolicyAndGoals, 25.0),
            (Criterion::SubsidyPlan, 30.0),
            (Criterion::CostEstimate, 20.0),
        ]
    );
    assert_eq!(result.base_score(), 100.0);
    assert_eq!(result.total_score, 100.0);
    assert_eq!(result.evaluation_level, EvaluationLevel::Excellent);
    assert!(result.improvements.is_empty());
}

#[test]
fn test_scenario_c_bonus_total() {
    let text = "長年の赤字から脱却するため、地域資源を使った新商品を開発する。";
    let analysis = analyze_bonuses(text);

    assert_eq!(analysis.total_points, 8);
    let eligible: Vec<&str> = analysis.eligible().map(|b| b.name.as_str()).collect();
    assert_eq!(eligible, vec!["赤字賃上げ加点", "地方創生型加点"]);
    for item in analysis
        .priority_bonuses
        .iter()
        .chain(analysis.policy_bonuses.iter())
        .filter(|b| !b.eligible)
    {
        assert_eq!(item.points, 0, "{} should award nothing", item.name);
    }
}

#[test]
fn test_scenario_c_bonus_flows_into_total() {
    let text = format!("{}赤字が続く中、地域資源を活用する。", MINIMAL_PLAN);
    let result = score_text(&text, false);

    assert_eq!(result.bonus_points, 8);
    assert_eq!(result.bonus_analysis.total_points, 8);
    assert_eq!(
        result.total_score,
        round1((result.base_score() + 8.0).min(100.0))
    );
}

#[test]
fn test_scenario_d_strict_short_document() {
    let mut text = MINIMAL_PLAN.to_string();
    while text.chars().count() < 300 {
        text.push('あ');
    }
    assert_eq!(text.chars().count(), 300);

    let result = score_text(&text, true);
    assert!(result.basic_requirements_passed);
    assert!(result.strict_mode);

    let capped = (result.base_score() + f64::from(result.bonus_points)).min(100.0);
    assert_eq!(result.total_score, round1(capped * 0.7 * 0.9));
}

#[test]
fn test_amount_with_separator_keeps_unit() {
    let doc = extract("2023年度の売上は1,234万円でした。");

    let sale = &doc.company_info.sales[0];
    assert_eq!(sale.amount, 1234);
    assert_eq!(sale.unit, AmountUnit::TenThousandYen);
    assert_eq!(sale.unit.as_str(), "万円");
    assert_eq!(sale.year, Some(2023));
}

// =============================================================================
// Workflow Tests
// =============================================================================

#[test]
fn test_idempotent_scoring() {
    let plan = full_marks_plan();
    let engine = ScoringEngine::with_options(ScoringOptions { strict: true });

    let first = engine.score_text(&plan);
    let second = engine.score_text(&plan);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first.detailed_scores).unwrap(),
        serde_json::to_value(&second.detailed_scores).unwrap()
    );
}

#[test]
fn test_bytes_to_result() {
    let bytes = format!("\u{feff}{}", MINIMAL_PLAN).into_bytes();
    let analysis = analyze_bytes(&PlainTextSource, &bytes);
    assert!(analysis.success);

    let doc = analysis.document.expect("document extracted");
    let result = ScoringEngine::with_options(ScoringOptions { strict: false }).score_document(&doc);
    assert!(result.basic_requirements_passed);
    assert_eq!(result, score_text(MINIMAL_PLAN, false));
}

#[test]
fn test_minimal_plan_recommendations() {
    let result = score_text(MINIMAL_PLAN, true);

    let items: Vec<&str> = result.improvements.iter().map(|i| i.item.as_str()).collect();
    // Every criterion is far below its threshold
    assert_eq!(items.len(), 3 + 2 + 3 + 2 + 2);
    assert_eq!(items[0], "企業概要の詳細化");
    assert_eq!(items[items.len() - 2], "数値データの充実");
    assert_eq!(items[items.len() - 1], "記載内容の充実");
    assert!(result.improvements[..10]
        .iter()
        .all(|i| i.priority == Priority::Important));
}

#[test]
fn test_document_hash_tracks_normalized_text() {
    let a = score_text(MINIMAL_PLAN, true);
    let b = score_text(&format!("  {}\r\n", MINIMAL_PLAN), true);
    assert_eq!(a.document_hash, b.document_hash);
    assert_eq!(a.document_hash.len(), 64);
}

// =============================================================================
// Property Tests
// =============================================================================

const FRAGMENTS: &[&str] = &[
    "事業内容", "売上", "利益", "従業員5人", "1,234万円", "方針", "目標", "計画", "補助事業",
    "内容", "市場", "競合", "強み", "弱み", "ホームページ", "SNS", "DX", "2024年4月", "20%",
    "3回", "具体的に", "詳細", "合計 500,000円", "赤字", "地域資源", "事業承継", "。", "、",
    "\n", "\n\n", " ", "あいうえお", "経費", "内訳",
];

fn plan_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(FRAGMENTS.to_vec()), 0..60)
        .prop_map(|parts| parts.concat())
}

proptest! {
    /// Completeness is the share of six topic groups present, two decimals
    #[test]
    fn completeness_matches_group_share(text in plan_text()) {
        let doc = extract(&text);
        let lower = doc.text_content.to_lowercase();
        let present = config::COMPLETENESS_GROUPS
            .iter()
            .filter(|g| g.keywords.iter().any(|k| lower.contains(&k.to_lowercase())))
            .count();
        let expected = (present as f64 / 6.0 * 100.0).round() / 100.0;

        prop_assert!((0.0..=1.0).contains(&doc.completeness_score));
        prop_assert_eq!(doc.completeness_score, expected);
    }

    /// Criterion scores stay within [0, max] and the maxima are fixed
    #[test]
    fn criterion_scores_bounded(text in plan_text(), strict in any::<bool>()) {
        let result = score_text(&text, strict);
        for (criterion, score) in &result.detailed_scores {
            prop_assert!(score.score >= 0.0);
            prop_assert!(score.score <= score.max_score);
            prop_assert_eq!(score.max_score, criterion.max_score());
        }
        prop_assert!((0.0..=100.0).contains(&result.total_score));
        prop_assert!((0.0..=95.0).contains(&result.adoption_probability));
    }

    /// Lenient total is the capped sum of criterion scores and bonus points
    #[test]
    fn lenient_total_formula(text in plan_text()) {
        let result = score_text(&text, false);
        if result.basic_requirements_passed {
            let expected = round1((result.base_score() + f64::from(result.bonus_points)).min(100.0));
            prop_assert_eq!(result.total_score, expected);
        }
    }

    /// Strict mode never raises the total
    #[test]
    fn strict_never_increases(text in plan_text()) {
        let lenient = score_text(&text, false);
        let strict = score_text(&text, true);
        prop_assert!(strict.total_score <= lenient.total_score);
        prop_assert_eq!(strict.basic_requirements_passed, lenient.basic_requirements_passed);
    }

    /// Gate failure is exactly: zero score, disqualified, no criterion scores
    #[test]
    fn gate_failure_equivalence(text in plan_text(), strict in any::<bool>()) {
        let result = score_text(&text, strict);
        if result.basic_requirements_passed {
            prop_assert_eq!(result.detailed_scores.len(), 4);
            prop_assert!(result.error.is_none());
        } else {
            prop_assert_eq!(result.total_score, 0.0);
            prop_assert_eq!(result.evaluation_level, EvaluationLevel::Disqualified);
            prop_assert!(result.detailed_scores.is_empty());
            prop_assert!(!result.improvements.is_empty());
        }
    }

    /// Scoring the same text twice gives equal results
    #[test]
    fn scoring_is_idempotent(text in plan_text(), strict in any::<bool>()) {
        prop_assert_eq!(score_text(&text, strict), score_text(&text, strict));
    }

    /// Normalization is stable and arbitrary input never panics
    #[test]
    fn normalization_is_idempotent(text in "\\PC{0,200}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
        let doc = extract(&text);
        prop_assert_eq!(doc.text_content, once);
    }
}
