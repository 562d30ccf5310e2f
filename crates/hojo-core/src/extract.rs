//! Feature extraction from plan text
//!
//! Turns raw extracted text into an [`ExtractedDocument`]. Each field group
//! scans the full normalized text independently, so the same substring may
//! feed several groups. Nothing here fails: text without a match simply
//! leaves the corresponding field absent or empty.

use regex::Regex;
use tracing::debug;

use crate::config::{self, KeywordGroup};
use crate::models::{
    parse_amount, parse_count, Amount, AmountUnit, BonusSignals, BusinessPlanSignals, CompanyInfo,
    ContentQuality, CostBreakdown, CostItem, ExpectedEffect, ExtractedDocument, FinancialData,
    GrowthRate, MarketSignals, NumericalTarget, SalesMention, StrengthWeaknessSignals,
    SubsidyPlanSignals,
};

/// Normalize raw text before extraction.
///
/// Line endings become `\n`, control characters are dropped, runs of spaces
/// and tabs collapse to one space, spaces around line breaks are removed and
/// more than one blank line collapses to a single paragraph break.
pub fn normalize_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = config::CONTROL_CHARS_RE.replace_all(&text, "");
    let text = config::SPACE_RUN_RE.replace_all(&text, " ");
    let text = config::LINE_EDGE_RE.replace_all(&text, "\n");
    let text = config::BLANK_LINES_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Case-insensitive containment test against an already-lowercased text
pub fn contains_keyword(text_lower: &str, keyword: &str) -> bool {
    text_lower.contains(&keyword.to_lowercase())
}

/// True if any keyword occurs in the lowercased text
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_keyword(text_lower, k))
}

/// Keywords (as configured) that occur in the lowercased text, in list order
pub fn matched_keywords(text_lower: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| contains_keyword(text_lower, k))
        .map(|k| k.to_string())
        .collect()
}

/// Extract every field group from raw text
pub fn extract(raw: &str) -> ExtractedDocument {
    let text = normalize_text(raw);
    if text.is_empty() {
        debug!("Empty input, returning zeroed document");
        return ExtractedDocument::default();
    }

    let lower = text.to_lowercase();
    let doc = ExtractedDocument {
        extracted_length: text.chars().count(),
        company_info: extract_company_info(&text),
        financial_data: extract_financial_data(&text),
        market_signals: analyze_market(&text, &lower),
        strength_weakness_signals: analyze_strengths_weaknesses(&lower),
        business_plan_signals: analyze_business_plan(&text, &lower),
        subsidy_plan_signals: analyze_subsidy_plan(&text, &lower),
        cost_breakdown: extract_cost_breakdown(&text),
        bonus_signals: detect_bonus_signals(&lower),
        content_quality: assess_content_quality(&text),
        completeness_score: completeness_score(&lower),
        text_content: text,
    };

    debug!(
        length = doc.extracted_length,
        completeness = doc.completeness_score,
        quality = doc.content_quality.quality_score,
        "Document extracted"
    );

    doc
}

fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn extract_company_info(text: &str) -> CompanyInfo {
    let company_name = config::COMPANY_NAME_RE
        .captures(text)
        .map(|caps| format!("{}{}", &caps[1], &caps[2]));

    let representative = first_capture(&config::REPRESENTATIVE_RE, text).map(str::to_string);
    let employees = first_capture(&config::EMPLOYEES_RE, text).and_then(parse_count);
    let capital = first_capture(&config::CAPITAL_RE, text).and_then(parse_amount);
    let established = first_capture(&config::ESTABLISHED_RE, text).and_then(parse_count);

    let mut sales = Vec::new();
    for caps in config::YEAR_SALES_RE.captures_iter(text) {
        if let (Some(year), Some(amount), Ok(unit)) = (
            parse_count(&caps[1]),
            parse_amount(&caps[2]),
            caps[3].parse::<AmountUnit>(),
        ) {
            sales.push(SalesMention {
                year: Some(year),
                amount,
                unit,
            });
        }
    }
    for caps in config::SALES_RE.captures_iter(text) {
        if let (Some(amount), Ok(unit)) = (parse_amount(&caps[1]), caps[2].parse::<AmountUnit>()) {
            sales.push(SalesMention {
                year: None,
                amount,
                unit,
            });
        }
    }

    CompanyInfo {
        company_name,
        representative,
        employees,
        capital,
        established,
        sales,
    }
}

fn extract_financial_data(text: &str) -> FinancialData {
    let sales_history = config::SALES_HISTORY_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(SalesMention {
                year: Some(parse_count(&caps[1])?),
                amount: parse_amount(&caps[2])?,
                unit: caps[3].parse().ok()?,
            })
        })
        .collect();

    let profits = config::PROFIT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Amount {
                value: parse_amount(&caps[1])?,
                unit: caps[2].parse().ok()?,
            })
        })
        .collect();

    let growth_rates = config::GROWTH_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(GrowthRate {
                kind: caps[1].parse().ok()?,
                rate: parse_amount(&caps[2])? as f64,
            })
        })
        .collect();

    FinancialData {
        sales_history,
        profits,
        growth_rates,
    }
}

fn analyze_market(text: &str, lower: &str) -> MarketSignals {
    let market_size_mentions = config::MARKET_SIZE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Amount {
                value: parse_amount(&caps[1])?,
                unit: caps[2].parse().ok()?,
            })
        })
        .collect();

    MarketSignals {
        keyword_matches: matched_keywords(lower, config::MARKET_KEYWORDS),
        market_size_mentions,
        competitor_analysis: contains_any(lower, config::COMPETITOR_KEYWORDS),
        customer_needs: contains_any(lower, config::CUSTOMER_NEEDS_KEYWORDS),
        market_trends: contains_any(lower, config::TREND_KEYWORDS),
    }
}

fn analyze_strengths_weaknesses(lower: &str) -> StrengthWeaknessSignals {
    StrengthWeaknessSignals {
        strengths: matched_keywords(lower, config::STRENGTH_KEYWORDS),
        weaknesses: matched_keywords(lower, config::WEAKNESS_KEYWORDS),
        differentiation: contains_any(lower, config::DIFFERENTIATION_KEYWORDS),
        competitive_advantage: contains_any(lower, config::ADVANTAGE_KEYWORDS),
    }
}

fn analyze_business_plan(text: &str, lower: &str) -> BusinessPlanSignals {
    let numerical_targets = config::NUMERICAL_TARGET_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(NumericalTarget {
                metric: caps[1].to_string(),
                value: parse_amount(&caps[2])?,
                unit: caps[3].to_string(),
            })
        })
        .collect();

    let timeline = config::TIMELINE_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    BusinessPlanSignals {
        goals: matched_keywords(lower, config::GOAL_KEYWORDS),
        numerical_targets,
        timeline,
        implementation_plan: contains_any(lower, config::IMPLEMENTATION_KEYWORDS),
    }
}

fn analyze_subsidy_plan(text: &str, lower: &str) -> SubsidyPlanSignals {
    let expected_effects = config::EXPECTED_EFFECT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(ExpectedEffect {
                value: parse_amount(&caps[1])?,
                unit: caps[2].to_string(),
            })
        })
        .collect();

    SubsidyPlanSignals {
        subsidy_items: matched_keywords(lower, config::SUBSIDY_KEYWORDS),
        sales_development: contains_any(lower, config::SALES_DEVELOPMENT_KEYWORDS),
        efficiency_improvement: contains_any(lower, config::EFFICIENCY_KEYWORDS),
        digital_utilization: contains_any(lower, config::DIGITAL_KEYWORDS),
        expected_effects,
    }
}

fn extract_cost_breakdown(text: &str) -> CostBreakdown {
    let items = config::COST_ITEM_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(CostItem {
                label: caps[1].trim().to_string(),
                amount: parse_amount(&caps[2])?,
            })
        })
        .collect();

    CostBreakdown {
        total_cost: first_capture(&config::TOTAL_COST_RE, text).and_then(parse_amount),
        subsidy_amount: first_capture(&config::SUBSIDY_AMOUNT_RE, text).and_then(parse_amount),
        self_funding: first_capture(&config::SELF_FUNDING_RE, text).and_then(parse_amount),
        items,
    }
}

fn detect_bonus_signals(lower: &str) -> BonusSignals {
    BonusSignals {
        detected: matched_keywords(lower, config::BONUS_KEYWORDS),
        priority_eligible: contains_any(lower, config::PRIORITY_SIGNAL_KEYWORDS),
        policy_eligible: contains_any(lower, config::POLICY_SIGNAL_KEYWORDS),
    }
}

fn assess_content_quality(text: &str) -> ContentQuality {
    let text_length = text.chars().count();
    let paragraph_count = if text.is_empty() {
        0
    } else {
        text.split("\n\n").count()
    };
    let numeric_token_count = config::NUMERIC_TOKEN_RE.find_iter(text).count();
    let concrete_expressions: usize = config::CONCRETE_EXPRESSION_RES
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum();

    let length_score = (text_length as f64 / config::QUALITY_LENGTH_CEILING).min(1.0);
    let numeric_score = (numeric_token_count as f64 / config::QUALITY_NUMERIC_CEILING).min(1.0);
    let concrete_score = (concrete_expressions as f64 / config::QUALITY_CONCRETE_CEILING).min(1.0);

    ContentQuality {
        text_length,
        paragraph_count,
        numeric_token_count,
        concrete_expressions,
        quality_score: (length_score + numeric_score + concrete_score) / 3.0,
    }
}

/// Fraction of keyword groups with at least one hit, rounded to two decimals
pub fn group_coverage(text_lower: &str, groups: &[KeywordGroup]) -> f64 {
    if groups.is_empty() {
        return 0.0;
    }
    let present = groups
        .iter()
        .filter(|g| contains_any(text_lower, g.keywords))
        .count();
    (present as f64 / groups.len() as f64 * 100.0).round() / 100.0
}

fn completeness_score(lower: &str) -> f64 {
    group_coverage(lower, config::COMPLETENESS_GROUPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GrowthKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_text() {
        let raw = "  株式会社\tテスト  \r\n\r\n\r\n\r\n事業内容\x07です \x0c\n次の行  ";
        assert_eq!(normalize_text(raw), "株式会社 テスト\n\n事業内容です\n次の行");
    }

    #[test]
    fn test_normalize_keeps_single_paragraph_break() {
        assert_eq!(normalize_text("一段落\n\n二段落"), "一段落\n\n二段落");
    }

    #[test]
    fn test_empty_input_yields_zeroed_document() {
        for raw in ["", "   ", "\n\n\t"] {
            let doc = extract(raw);
            assert_eq!(doc, ExtractedDocument::default());
            assert_eq!(doc.completeness_score, 0.0);
            assert_eq!(doc.content_quality.quality_score, 0.0);
            assert!(doc.company_info.employees.is_none());
            assert!(doc.cost_breakdown.total_cost.is_none());
        }
    }

    #[test]
    fn test_company_info() {
        let text = "株式会社 山田製作所\n代表者：山田太郎\n従業員 12人\n資本金 1,000万円\n設立 1998年";
        let info = extract_company_info(&normalize_text(text));
        assert_eq!(info.company_name.as_deref(), Some("株式会社山田製作所"));
        assert_eq!(info.representative.as_deref(), Some("山田太郎"));
        assert_eq!(info.employees, Some(12));
        assert_eq!(info.capital, Some(1000));
        assert_eq!(info.established, Some(1998));
    }

    #[test]
    fn test_sales_with_and_without_year_coexist() {
        let text = "2023年度の売上は1,234万円でした。\n今期の売上見込み 800千円";
        let info = extract_company_info(text);
        assert!(info.sales.contains(&SalesMention {
            year: Some(2023),
            amount: 1234,
            unit: AmountUnit::TenThousandYen,
        }));
        assert!(info.sales.iter().any(|s| s.year.is_none()));
        assert!(info.sales.contains(&SalesMention {
            year: None,
            amount: 800,
            unit: AmountUnit::ThousandYen,
        }));
    }

    #[test]
    fn test_amount_units_are_not_normalized() {
        let data = extract_financial_data("利益 1,234万円\n利益 5億円");
        assert_eq!(
            data.profits,
            vec![
                Amount {
                    value: 1234,
                    unit: AmountUnit::TenThousandYen
                },
                Amount {
                    value: 5,
                    unit: AmountUnit::HundredMillionYen
                },
            ]
        );
    }

    #[test]
    fn test_growth_rates() {
        let data = extract_financial_data("売上は前年比 12%\n客数は減少 5%");
        assert_eq!(data.growth_rates.len(), 2);
        assert_eq!(data.growth_rates[0].kind, GrowthKind::YearOverYear);
        assert_eq!(data.growth_rates[0].rate, 12.0);
        assert_eq!(data.growth_rates[1].kind, GrowthKind::Decrease);
        assert_eq!(data.growth_rates[1].rate, 5.0);
    }

    #[test]
    fn test_market_flags() {
        let text = "地域の市場規模は30億円。競合は2社、お客様の声を反映";
        let signals = analyze_market(text, &text.to_lowercase());
        assert!(signals.competitor_analysis);
        assert!(signals.customer_needs);
        assert!(!signals.market_trends);
        assert_eq!(
            signals.market_size_mentions,
            vec![Amount {
                value: 30,
                unit: AmountUnit::HundredMillionYen
            }]
        );
        assert_eq!(signals.keyword_matches, vec!["市場", "競合"]);
    }

    #[test]
    fn test_keyword_flags_are_case_insensitive() {
        let lower = "sns とitを活用".to_lowercase();
        let plan = analyze_subsidy_plan("SNS とITを活用", &lower);
        assert!(plan.digital_utilization);
        assert!(contains_keyword("dxの推進", "DX"));
    }

    #[test]
    fn test_business_plan_targets_and_timeline() {
        let text = "2025年4月に開始し、3年後に売上3000万円、集客200人を目指す計画";
        let plan = analyze_business_plan(text, &text.to_lowercase());
        assert_eq!(plan.goals, vec!["計画"]);
        assert!(plan.implementation_plan);
        assert_eq!(plan.timeline, vec!["2025年", "4月", "3年後"]);
        assert_eq!(
            plan.numerical_targets[0],
            NumericalTarget {
                metric: "売上".to_string(),
                value: 3000,
                unit: "万円".to_string(),
            }
        );
        assert_eq!(plan.numerical_targets[1].metric, "集客");
        assert_eq!(plan.numerical_targets[1].unit, "人");
    }

    #[test]
    fn test_cost_breakdown() {
        let text = "ホームページ制作費 500,000円\nチラシ印刷 120,000円\n合計 620,000円\n補助金額 413,000円\n自己資金 207,000円";
        let cost = extract_cost_breakdown(text);
        assert_eq!(cost.total_cost, Some(620_000));
        assert_eq!(cost.subsidy_amount, Some(413_000));
        assert_eq!(cost.self_funding, Some(207_000));
        assert_eq!(
            cost.items[0],
            CostItem {
                label: "ホームページ制作費".to_string(),
                amount: 500_000,
            }
        );
        assert_eq!(cost.items.len(), 5);
    }

    #[test]
    fn test_plain_digit_run_is_not_truncated() {
        let cost = extract_cost_breakdown("合計 12345円");
        assert_eq!(cost.total_cost, Some(12345));
    }

    #[test]
    fn test_full_width_digits() {
        let doc = extract(
            "事業内容は小売業。従業員１２人。資本金１，０００万円。設立１９９８年。売上３，０００万円。",
        );
        let info = &doc.company_info;
        assert_eq!(info.employees, Some(12));
        assert_eq!(info.capital, Some(1000));
        assert_eq!(info.established, Some(1998));
        assert!(info.sales.contains(&SalesMention {
            year: None,
            amount: 3000,
            unit: AmountUnit::TenThousandYen,
        }));
        assert!(info.sales.contains(&SalesMention {
            year: Some(1998),
            amount: 3000,
            unit: AmountUnit::TenThousandYen,
        }));

        let data = extract_financial_data("客数は前年比１５％増");
        assert_eq!(data.growth_rates.len(), 1);
        assert_eq!(data.growth_rates[0].rate, 15.0);

        let cost = extract_cost_breakdown("合計 ５０，０００円");
        assert_eq!(cost.total_cost, Some(50_000));
    }

    #[test]
    fn test_bonus_signals() {
        let signals = detect_bonus_signals("赤字が続く中、事業承継を計画");
        assert_eq!(signals.detected, vec!["赤字", "事業承継"]);
        assert!(signals.priority_eligible);
        assert!(signals.policy_eligible);
    }

    #[test]
    fn test_content_quality() {
        let text = "具体的に2024年4月から実施。詳細は別紙。売上100万円、従業員5人";
        let quality = assess_content_quality(text);
        assert_eq!(quality.text_length, text.chars().count());
        assert_eq!(quality.paragraph_count, 1);
        assert_eq!(quality.numeric_token_count, 4);
        // 具体的に, 詳細, 2024年4月, 100万円, 5人
        assert_eq!(quality.concrete_expressions, 5);
        let expected = (text.chars().count() as f64 / 2000.0 + 4.0 / 20.0 + 5.0 / 10.0) / 3.0;
        assert!((quality.quality_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_completeness_rounds_to_two_decimals() {
        // 売上 and 市場 groups only: 2/6 = 0.333..
        assert_eq!(completeness_score("売上と市場"), 0.33);
        assert_eq!(completeness_score("なし"), 0.0);
        let all = "会社 売上 強み 市場 目標 補助事業";
        assert_eq!(completeness_score(all), 1.0);
        // 4/6 = 0.666..
        assert_eq!(completeness_score("会社 売上 強み 市場"), 0.67);
    }

    #[test]
    fn test_extract_end_to_end() {
        let doc = extract("株式会社テスト\n事業内容は製造業。売上 2,500万円。\n\n今後の目標は販路開拓。");
        assert_eq!(doc.text_content, "株式会社テスト\n事業内容は製造業。売上 2,500万円。\n\n今後の目標は販路開拓。");
        assert_eq!(doc.content_quality.paragraph_count, 2);
        assert_eq!(doc.company_info.company_name.as_deref(), Some("株式会社テスト"));
        assert!(doc.subsidy_plan_signals.sales_development);
        assert!(doc.completeness_score > 0.0);
    }
}
