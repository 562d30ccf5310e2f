//! Data models for hojo
//!
//! Everything the extractor produces and everything the scoring engine
//! returns is a typed record here. The presentation layer only ever sees
//! [`ScoringResult`] and [`ExtractedDocument`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ========== Amounts ==========

/// Currency unit attached to an extracted amount.
///
/// Units are carried through exactly as written; `1,234万円` and `1,234千円`
/// are different values that are never rescaled against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountUnit {
    #[serde(rename = "円")]
    Yen,
    #[serde(rename = "千円")]
    ThousandYen,
    #[serde(rename = "万円")]
    TenThousandYen,
    #[serde(rename = "億円")]
    HundredMillionYen,
    #[serde(rename = "兆円")]
    TrillionYen,
}

impl AmountUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountUnit::Yen => "円",
            AmountUnit::ThousandYen => "千円",
            AmountUnit::TenThousandYen => "万円",
            AmountUnit::HundredMillionYen => "億円",
            AmountUnit::TrillionYen => "兆円",
        }
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AmountUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "円" => Ok(AmountUnit::Yen),
            "千円" => Ok(AmountUnit::ThousandYen),
            "万円" => Ok(AmountUnit::TenThousandYen),
            "億円" => Ok(AmountUnit::HundredMillionYen),
            "兆円" => Ok(AmountUnit::TrillionYen),
            _ => Err(format!("Unknown amount unit: {}", s)),
        }
    }
}

/// An amount with its unit as written in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: u64,
    pub unit: AmountUnit,
}

/// Parse an amount numeral such as `1,234` or `１，２３４` into its value.
///
/// Thousands separators (ASCII or full-width) are stripped and full-width
/// digits count like their ASCII forms. Returns `None` for anything that is
/// not a plain non-negative integer or does not fit in a `u64`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let mut value: u64 = 0;
    let mut seen_digit = false;
    for c in raw.chars() {
        if matches!(c, ',' | '，') {
            continue;
        }
        let digit = digit_value(c)?;
        value = value.checked_mul(10)?.checked_add(u64::from(digit))?;
        seen_digit = true;
    }
    seen_digit.then_some(value)
}

/// Like [`parse_amount`], for fields that must fit in a `u32`
pub fn parse_count(raw: &str) -> Option<u32> {
    parse_amount(raw).and_then(|v| u32::try_from(v).ok())
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => None,
    }
}

// ========== Extracted document ==========

/// A sales figure, optionally tied to a fiscal year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesMention {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    pub amount: u64,
    pub unit: AmountUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_name: Option<String>,
    pub representative: Option<String>,
    pub employees: Option<u32>,
    /// Capital in 万円, as written
    pub capital: Option<u64>,
    pub established: Option<u32>,
    pub sales: Vec<SalesMention>,
}

/// Qualifier in front of a growth-rate percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthKind {
    /// 前年比
    YearOverYear,
    /// 増加
    Increase,
    /// 減少
    Decrease,
    /// 成長
    Growth,
}

impl GrowthKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthKind::YearOverYear => "前年比",
            GrowthKind::Increase => "増加",
            GrowthKind::Decrease => "減少",
            GrowthKind::Growth => "成長",
        }
    }
}

impl FromStr for GrowthKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "前年比" => Ok(GrowthKind::YearOverYear),
            "増加" => Ok(GrowthKind::Increase),
            "減少" => Ok(GrowthKind::Decrease),
            "成長" => Ok(GrowthKind::Growth),
            _ => Err(format!("Unknown growth qualifier: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRate {
    pub kind: GrowthKind,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub sales_history: Vec<SalesMention>,
    pub profits: Vec<Amount>,
    pub growth_rates: Vec<GrowthRate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSignals {
    pub keyword_matches: Vec<String>,
    pub market_size_mentions: Vec<Amount>,
    pub competitor_analysis: bool,
    pub customer_needs: bool,
    pub market_trends: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthWeaknessSignals {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub differentiation: bool,
    pub competitive_advantage: bool,
}

/// A numeric goal such as `売上 ... 3000万円` or `集客 ... 200人`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericalTarget {
    pub metric: String,
    pub value: u64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPlanSignals {
    pub goals: Vec<String>,
    pub numerical_targets: Vec<NumericalTarget>,
    /// Timeline tokens as written (`2025年`, `4月`, `3年後`)
    pub timeline: Vec<String>,
    pub implementation_plan: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedEffect {
    pub value: u64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyPlanSignals {
    pub subsidy_items: Vec<String>,
    pub sales_development: bool,
    pub efficiency_improvement: bool,
    pub digital_utilization: bool,
    pub expected_effects: Vec<ExpectedEffect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostItem {
    pub label: String,
    pub amount: u64,
}

/// Cost figures, all in plain 円 as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total_cost: Option<u64>,
    pub subsidy_amount: Option<u64>,
    pub self_funding: Option<u64>,
    pub items: Vec<CostItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSignals {
    pub detected: Vec<String>,
    pub priority_eligible: bool,
    pub policy_eligible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentQuality {
    pub text_length: usize,
    pub paragraph_count: usize,
    pub numeric_token_count: usize,
    pub concrete_expressions: usize,
    /// 0.0 - 1.0
    pub quality_score: f64,
}

/// Structured view of a plan document produced by [`crate::extract::extract`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Normalized text every scoring phase reads from
    pub text_content: String,
    /// Length of the normalized text in characters
    pub extracted_length: usize,
    pub company_info: CompanyInfo,
    pub financial_data: FinancialData,
    pub market_signals: MarketSignals,
    pub strength_weakness_signals: StrengthWeaknessSignals,
    pub business_plan_signals: BusinessPlanSignals,
    pub subsidy_plan_signals: SubsidyPlanSignals,
    pub cost_breakdown: CostBreakdown,
    pub bonus_signals: BonusSignals,
    pub content_quality: ContentQuality,
    /// Fraction of the six required topic groups present, two decimals
    pub completeness_score: f64,
}

// ========== Rubric ==========

/// The four top-level rubric axes, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// 経営状況分析の妥当性
    SituationAnalysis,
    /// 経営方針・目標の適切性
    PolicyAndGoals,
    /// 補助事業計画の有効性
    SubsidyPlan,
    /// 積算の透明・適切性
    CostEstimate,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::SituationAnalysis => "situation_analysis",
            Criterion::PolicyAndGoals => "policy_and_goals",
            Criterion::SubsidyPlan => "subsidy_plan",
            Criterion::CostEstimate => "cost_estimate",
        }
    }

    /// Display name used on the official review sheet
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::SituationAnalysis => "経営状況分析の妥当性",
            Criterion::PolicyAndGoals => "経営方針・目標の適切性",
            Criterion::SubsidyPlan => "補助事業計画の有効性",
            Criterion::CostEstimate => "積算の透明・適切性",
        }
    }

    pub fn max_score(&self) -> f64 {
        match self {
            Criterion::SituationAnalysis => 25.0,
            Criterion::PolicyAndGoals => 25.0,
            Criterion::SubsidyPlan => 30.0,
            Criterion::CostEstimate => 20.0,
        }
    }

    pub fn all() -> &'static [Criterion] {
        &[
            Criterion::SituationAnalysis,
            Criterion::PolicyAndGoals,
            Criterion::SubsidyPlan,
            Criterion::CostEstimate,
        ]
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "situation_analysis" => Ok(Criterion::SituationAnalysis),
            "policy_and_goals" => Ok(Criterion::PolicyAndGoals),
            "subsidy_plan" => Ok(Criterion::SubsidyPlan),
            "cost_estimate" => Ok(Criterion::CostEstimate),
            _ => Err(format!("Unknown criterion: {}", s)),
        }
    }
}

/// One weighted component of a criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCriterionScore {
    pub name: String,
    pub weight: f64,
    pub coverage: f64,
    pub quality: f64,
    pub specificity: f64,
    /// (0.4 coverage + 0.3 quality + 0.3 specificity) x weight
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub score: f64,
    pub max_score: f64,
    pub sub_scores: Vec<SubCriterionScore>,
}

impl CriterionScore {
    /// Achieved share of the maximum, in percent
    pub fn achievement_rate(&self) -> f64 {
        if self.max_score <= 0.0 {
            return 0.0;
        }
        self.score / self.max_score * 100.0
    }
}

// ========== Bonus ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusItem {
    pub name: String,
    pub eligible: bool,
    pub points: u32,
    pub requirements: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusAnalysis {
    pub total_points: u32,
    pub priority_bonuses: Vec<BonusItem>,
    pub policy_bonuses: Vec<BonusItem>,
}

impl BonusAnalysis {
    /// Eligible items across both tables
    pub fn eligible(&self) -> impl Iterator<Item = &BonusItem> {
        self.priority_bonuses
            .iter()
            .chain(self.policy_bonuses.iter())
            .filter(|b| b.eligible)
    }
}

// ========== Improvements ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    Important,
    Recommended,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Important => "important",
            Priority::Recommended => "recommended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "緊急",
            Priority::Important => "重要",
            Priority::Recommended => "推奨",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Priority::Urgent),
            "important" => Ok(Priority::Important),
            "recommended" => Ok(Priority::Recommended),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub item: String,
    pub priority: Priority,
    pub current_issue: String,
    pub improvement_method: String,
    pub example: String,
}

// ========== Result ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationLevel {
    Excellent,
    Good,
    Fair,
    Insufficient,
    Disqualified,
    /// Scoring itself failed; distinct from a disqualified document
    Error,
}

impl EvaluationLevel {
    /// Band for a final score
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            EvaluationLevel::Excellent
        } else if score >= 65.0 {
            EvaluationLevel::Good
        } else if score >= 50.0 {
            EvaluationLevel::Fair
        } else if score >= 35.0 {
            EvaluationLevel::Insufficient
        } else {
            EvaluationLevel::Disqualified
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationLevel::Excellent => "excellent",
            EvaluationLevel::Good => "good",
            EvaluationLevel::Fair => "fair",
            EvaluationLevel::Insufficient => "insufficient",
            EvaluationLevel::Disqualified => "disqualified",
            EvaluationLevel::Error => "error",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EvaluationLevel::Excellent => "優秀",
            EvaluationLevel::Good => "良好",
            EvaluationLevel::Fair => "普通",
            EvaluationLevel::Insufficient => "不十分",
            EvaluationLevel::Disqualified => "不適格",
            EvaluationLevel::Error => "エラー",
        }
    }
}

impl fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final output of a scoring run
///
/// Equality ignores `analyzed_at` so that two runs over the same text
/// compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    pub total_score: f64,
    pub evaluation_level: EvaluationLevel,
    pub adoption_probability: f64,
    pub basic_requirements_passed: bool,
    pub strict_mode: bool,
    /// Criterion scores in declaration order; empty when the gate failed
    pub detailed_scores: BTreeMap<Criterion, CriterionScore>,
    pub improvements: Vec<Improvement>,
    pub bonus_points: u32,
    pub bonus_analysis: BonusAnalysis,
    /// SHA-256 of the normalized text
    pub document_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl ScoringResult {
    /// Sum of criterion scores before bonus points and strict adjustment
    pub fn base_score(&self) -> f64 {
        self.detailed_scores.values().map(|s| s.score).sum()
    }
}

impl PartialEq for ScoringResult {
    fn eq(&self, other: &Self) -> bool {
        self.total_score == other.total_score
            && self.evaluation_level == other.evaluation_level
            && self.adoption_probability == other.adoption_probability
            && self.basic_requirements_passed == other.basic_requirements_passed
            && self.strict_mode == other.strict_mode
            && self.detailed_scores == other.detailed_scores
            && self.improvements == other.improvements
            && self.bonus_points == other.bonus_points
            && self.bonus_analysis == other.bonus_analysis
            && self.document_hash == other.document_hash
            && self.error == other.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_separators() {
        assert_eq!(parse_amount("1,234"), Some(1234));
        assert_eq!(parse_amount("12,345,678"), Some(12_345_678));
        assert_eq!(parse_amount("500"), Some(500));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_amount_full_width() {
        assert_eq!(parse_amount("１，２３４"), Some(1234));
        assert_eq!(parse_amount("１９９８"), Some(1998));
        assert_eq!(parse_amount("3,０００"), Some(3000));
        assert_eq!(parse_amount("١٢"), None);
    }

    #[test]
    fn test_parse_count_bounds() {
        assert_eq!(parse_count("１２"), Some(12));
        assert_eq!(parse_count("4294967296"), None);
    }

    #[test]
    fn test_amount_unit_roundtrip() {
        for unit in [
            AmountUnit::Yen,
            AmountUnit::ThousandYen,
            AmountUnit::TenThousandYen,
            AmountUnit::HundredMillionYen,
            AmountUnit::TrillionYen,
        ] {
            assert_eq!(unit.as_str().parse::<AmountUnit>().unwrap(), unit);
        }
        assert!("ドル".parse::<AmountUnit>().is_err());
    }

    #[test]
    fn test_amount_unit_serializes_as_written() {
        let amount = Amount {
            value: 1234,
            unit: AmountUnit::TenThousandYen,
        };
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, r#"{"value":1234,"unit":"万円"}"#);
    }

    #[test]
    fn test_criterion_max_scores_sum_to_100() {
        let total: f64 = Criterion::all().iter().map(|c| c.max_score()).sum();
        assert_eq!(total, 100.0);
        let maxes: Vec<f64> = Criterion::all().iter().map(|c| c.max_score()).collect();
        assert_eq!(maxes, vec![25.0, 25.0, 30.0, 20.0]);
    }

    #[test]
    fn test_criterion_ordering_follows_declaration() {
        let mut sorted = vec![
            Criterion::CostEstimate,
            Criterion::SituationAnalysis,
            Criterion::SubsidyPlan,
            Criterion::PolicyAndGoals,
        ];
        sorted.sort();
        assert_eq!(sorted, Criterion::all());
    }

    #[test]
    fn test_criterion_from_str() {
        for c in Criterion::all() {
            assert_eq!(c.as_str().parse::<Criterion>().unwrap(), *c);
        }
        assert!("unknown".parse::<Criterion>().is_err());
    }

    #[test]
    fn test_evaluation_level_bands() {
        assert_eq!(EvaluationLevel::from_score(100.0), EvaluationLevel::Excellent);
        assert_eq!(EvaluationLevel::from_score(80.0), EvaluationLevel::Excellent);
        assert_eq!(EvaluationLevel::from_score(79.9), EvaluationLevel::Good);
        assert_eq!(EvaluationLevel::from_score(65.0), EvaluationLevel::Good);
        assert_eq!(EvaluationLevel::from_score(64.9), EvaluationLevel::Fair);
        assert_eq!(EvaluationLevel::from_score(50.0), EvaluationLevel::Fair);
        assert_eq!(EvaluationLevel::from_score(49.9), EvaluationLevel::Insufficient);
        assert_eq!(EvaluationLevel::from_score(35.0), EvaluationLevel::Insufficient);
        assert_eq!(EvaluationLevel::from_score(34.9), EvaluationLevel::Disqualified);
        assert_eq!(EvaluationLevel::from_score(0.0), EvaluationLevel::Disqualified);
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("important".parse::<Priority>().unwrap(), Priority::Important);
        assert_eq!(
            "recommended".parse::<Priority>().unwrap(),
            Priority::Recommended
        );
        assert!("later".parse::<Priority>().is_err());
    }

    #[test]
    fn test_achievement_rate() {
        let score = CriterionScore {
            criterion: Criterion::CostEstimate,
            score: 15.0,
            max_score: 20.0,
            sub_scores: vec![],
        };
        assert_eq!(score.achievement_rate(), 75.0);
    }
}
