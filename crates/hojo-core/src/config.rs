//! Static scoring configuration
//!
//! Every keyword list, pattern, weight and threshold used by the extractor,
//! rubric, bonus analyzer and recommendation generator lives here as plain
//! data. Nothing in this module is supplied at runtime.
//!
//! Pattern sources are kept as `&str` constants next to their compiled
//! [`Lazy`] regex so the tables can be enumerated in tests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Criterion;

// =============================================================================
// Table shapes
// =============================================================================

/// A named keyword list
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SubCriterionDef {
    pub name: &'static str,
    pub weight: f64,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct CriterionDef {
    pub criterion: Criterion,
    pub sub_criteria: &'static [SubCriterionDef],
}

#[derive(Debug, Clone, Copy)]
pub struct BonusDef {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub points: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ImprovementTemplate {
    pub item: &'static str,
    pub current_issue: &'static str,
    pub improvement_method: &'static str,
    pub example: &'static str,
}

/// Templates emitted when a criterion scores below `low_threshold`
#[derive(Debug, Clone, Copy)]
pub struct TemplateSet {
    pub criterion: Criterion,
    pub low_threshold: f64,
    pub templates: &'static [ImprovementTemplate],
}

// =============================================================================
// Rubric
// =============================================================================

pub const CRITERIA: &[CriterionDef] = &[
    CriterionDef {
        criterion: Criterion::SituationAnalysis,
        sub_criteria: &[
            SubCriterionDef {
                name: "企業概要の充実度",
                weight: 0.3,
                keywords: &["事業内容", "創業", "沿革", "従業員", "売上", "顧客"],
            },
            SubCriterionDef {
                name: "売上・財務分析",
                weight: 0.3,
                keywords: &["売上高", "利益", "推移", "増減", "要因", "財務"],
            },
            SubCriterionDef {
                name: "強み・弱み分析",
                weight: 0.25,
                keywords: &["強み", "弱み", "特徴", "優位性", "課題", "問題"],
            },
            SubCriterionDef {
                name: "市場・競合認識",
                weight: 0.15,
                keywords: &["市場", "競合", "業界", "動向", "ライバル", "シェア"],
            },
        ],
    },
    CriterionDef {
        criterion: Criterion::PolicyAndGoals,
        sub_criteria: &[
            SubCriterionDef {
                name: "経営方針の明確性",
                weight: 0.3,
                keywords: &["方針", "理念", "ビジョン", "目標", "戦略"],
            },
            SubCriterionDef {
                name: "数値目標の具体性",
                weight: 0.4,
                keywords: &["売上目標", "集客", "単価", "年度", "増加", "○○円", "○○人"],
            },
            SubCriterionDef {
                name: "市場・顧客対応",
                weight: 0.2,
                keywords: &["顧客ニーズ", "市場動向", "ターゲット", "需要"],
            },
            SubCriterionDef {
                name: "実現可能性",
                weight: 0.1,
                keywords: &["計画", "段階", "ステップ", "期間", "実施"],
            },
        ],
    },
    CriterionDef {
        criterion: Criterion::SubsidyPlan,
        sub_criteria: &[
            SubCriterionDef {
                name: "事業計画の具体性",
                weight: 0.3,
                keywords: &["具体的", "詳細", "内容", "方法", "手順"],
            },
            SubCriterionDef {
                name: "販路開拓の有効性",
                weight: 0.25,
                keywords: &["販路", "新規", "開拓", "顧客獲得", "PR", "宣伝"],
            },
            SubCriterionDef {
                name: "新規性・独自性",
                weight: 0.2,
                keywords: &["新たな", "独自", "他社にない", "差別化", "特色"],
            },
            SubCriterionDef {
                name: "デジタル活用",
                weight: 0.15,
                keywords: &["デジタル", "IT", "ホームページ", "SNS", "システム", "DX"],
            },
            SubCriterionDef {
                name: "効果・成果予測",
                weight: 0.1,
                keywords: &["効果", "成果", "売上増", "集客増", "効率化"],
            },
        ],
    },
    CriterionDef {
        criterion: Criterion::CostEstimate,
        sub_criteria: &[
            SubCriterionDef {
                name: "経費明細の妥当性",
                weight: 0.4,
                keywords: &["経費", "明細", "内訳", "単価", "数量"],
            },
            SubCriterionDef {
                name: "必要性の説明",
                weight: 0.3,
                keywords: &["必要", "理由", "根拠", "効果", "目的"],
            },
            SubCriterionDef {
                name: "計算の正確性",
                weight: 0.2,
                keywords: &["合計", "計算", "金額", "×", "円"],
            },
            SubCriterionDef {
                name: "補助対象適合性",
                weight: 0.1,
                keywords: &["補助対象", "対象経費", "適用"],
            },
        ],
    },
];

/// Keyword coverage is `hits / total * COVERAGE_SCALE`, capped at 1.0
pub const COVERAGE_SCALE: f64 = 1.5;

pub const COVERAGE_WEIGHT: f64 = 0.4;
pub const QUALITY_WEIGHT: f64 = 0.3;
pub const SPECIFICITY_WEIGHT: f64 = 0.3;

/// Criterion scores are multiplied by this in strict mode
pub const STRICT_CRITERION_FACTOR: f64 = 0.8;

/// Rubric quality: (minimum length in characters, credit) steps
pub const QUALITY_LENGTH_STEPS: &[(usize, f64)] = &[(500, 0.2), (1000, 0.2)];
pub const QUALITY_NUMERIC_CREDIT: f64 = 0.3;
pub const QUALITY_CONCRETE_CAP: f64 = 0.3;

pub const QUALITY_NUMERIC_PATTERN: &str =
    r"\d+[万億千百十]?円|\d+[万千百十]?人|\d+%|\d+年";

pub const QUALITY_CONCRETE_PHRASES: &[&str] =
    &["具体的に", "詳細", "明確", "○○", "について", "により"];

pub const SPECIFICITY_STEP: f64 = 0.2;

/// Date, currency amount, headcount, percentage, count of occurrences
pub const SPECIFICITY_PATTERNS: &[&str] = &[
    r"\d+年\d+月",
    r"\d+[万億千]円",
    r"\d+[万千]人",
    r"\d+%",
    r"\d+回",
];

pub static QUALITY_NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(QUALITY_NUMERIC_PATTERN).expect("valid regex"));

pub static SPECIFICITY_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    SPECIFICITY_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
});

// =============================================================================
// Orchestration
// =============================================================================

/// Basic-requirements gate: every group needs at least one hit
pub const GATE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "企業概要",
        keywords: &["事業内容", "業種", "従業員"],
    },
    KeywordGroup {
        name: "売上情報",
        keywords: &["売上", "売上高", "利益"],
    },
    KeywordGroup {
        name: "経営方針",
        keywords: &["方針", "目標", "計画"],
    },
    KeywordGroup {
        name: "補助事業計画",
        keywords: &["補助事業", "計画", "内容"],
    },
];

/// Strict mode length penalties, shortest threshold first
pub const STRICT_LENGTH_PENALTIES: &[(usize, f64)] = &[(500, 0.7), (1000, 0.85)];

/// Strict mode penalty when no amount or headcount appears anywhere
pub const STRICT_NO_FIGURES_FACTOR: f64 = 0.9;

pub const AMOUNT_OR_HEADCOUNT_PATTERN: &str = r"\d+[万億千]円|\d+[万千]人";

pub static AMOUNT_OR_HEADCOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(AMOUNT_OR_HEADCOUNT_PATTERN).expect("valid regex"));

pub const MAX_TOTAL_SCORE: f64 = 100.0;

/// Adoption probability ladder: (minimum score, base probability)
pub const ADOPTION_LADDER: &[(f64, f64)] = &[(80.0, 85.0), (70.0, 70.0), (60.0, 50.0), (50.0, 30.0)];
pub const ADOPTION_FLOOR: f64 = 10.0;
pub const ADOPTION_PER_BONUS_POINT: f64 = 2.0;
pub const ADOPTION_CAP: f64 = 95.0;

// =============================================================================
// Bonus tables
// =============================================================================

pub const PRIORITY_BONUSES: &[BonusDef] = &[
    BonusDef {
        name: "赤字賃上げ加点",
        keywords: &["赤字", "賃上げ", "賃金引上げ"],
        points: 5,
    },
    BonusDef {
        name: "事業環境変化加点",
        keywords: &["物価高騰", "コロナ", "環境変化", "影響"],
        points: 5,
    },
    BonusDef {
        name: "東日本大震災加点",
        keywords: &["震災", "被災", "復興"],
        points: 3,
    },
    BonusDef {
        name: "くるみん・えるぼし加点",
        keywords: &["くるみん", "えるぼし", "女性活躍"],
        points: 3,
    },
];

pub const POLICY_BONUSES: &[BonusDef] = &[
    BonusDef {
        name: "賃金引上げ加点",
        keywords: &["賃上げ", "30円", "時給", "昇給"],
        points: 3,
    },
    BonusDef {
        name: "地方創生型加点",
        keywords: &["地域資源", "地方創生", "地域活性化"],
        points: 3,
    },
    BonusDef {
        name: "経営力向上計画加点",
        keywords: &["経営力向上計画", "認定"],
        points: 2,
    },
    BonusDef {
        name: "事業承継加点",
        keywords: &["事業承継", "後継者", "60歳"],
        points: 3,
    },
    BonusDef {
        name: "過疎地域加点",
        keywords: &["過疎地域"],
        points: 2,
    },
];

// =============================================================================
// Recommendation templates
// =============================================================================

pub const IMPROVEMENT_TEMPLATES: &[TemplateSet] = &[
    TemplateSet {
        criterion: Criterion::SituationAnalysis,
        low_threshold: 18.0,
        templates: &[
            ImprovementTemplate {
                item: "企業概要の詳細化",
                current_issue: "事業内容や特徴の説明が不十分",
                improvement_method: "創業年、従業員数、主要商品・サービス、事業規模を具体的に記載",
                example: "「創業○年、従業員○名の○○業。主力商品は○○で、年間売上○○万円」",
            },
            ImprovementTemplate {
                item: "売上・財務分析の強化",
                current_issue: "売上推移や財務状況の分析が表面的",
                improvement_method: "過去3年間の売上推移を表形式で示し、増減要因を具体的に分析",
                example: "「2022年:○○万円→2023年:○○万円→2024年:○○万円。増加要因は○○」",
            },
            ImprovementTemplate {
                item: "強み・弱みの明確化",
                current_issue: "自社の強み・弱みの分析が抽象的",
                improvement_method: "競合他社との比較を含めた客観的な強み・弱み分析",
                example: "「強み:他社にない○○技術、弱み:認知度不足(市場シェア○%)」",
            },
        ],
    },
    TemplateSet {
        criterion: Criterion::PolicyAndGoals,
        low_threshold: 18.0,
        templates: &[
            ImprovementTemplate {
                item: "数値目標の具体化",
                current_issue: "売上目標や集客目標が曖昧",
                improvement_method: "年度別の具体的な数値目標を表形式で設定",
                example: "「2025年:売上○○万円(前年比○%増)、新規顧客○○人獲得」",
            },
            ImprovementTemplate {
                item: "市場・顧客分析の深化",
                current_issue: "ターゲット顧客や市場動向の分析が不足",
                improvement_method: "統計データを活用した市場規模・成長性・顧客特性の分析",
                example: "「○○市場規模○○億円、年成長率○%。主要顧客層は○○代○○」",
            },
        ],
    },
    TemplateSet {
        criterion: Criterion::SubsidyPlan,
        low_threshold: 22.0,
        templates: &[
            ImprovementTemplate {
                item: "事業計画の具体化",
                current_issue: "補助事業の内容や手順が抽象的",
                improvement_method: "実施時期、実施方法、担当者を含む詳細な実行計画",
                example: "「○月:ホームページ制作開始、○月:完成・公開、担当:○○」",
            },
            ImprovementTemplate {
                item: "販路開拓効果の明確化",
                current_issue: "販路開拓による効果の予測が不明確",
                improvement_method: "新規顧客獲得数、売上増加額を具体的に予測",
                example: "「HP経由で月○○件の問い合わせ、○○万円の売上増を見込む」",
            },
            ImprovementTemplate {
                item: "デジタル活用の強化",
                current_issue: "デジタル技術の活用が限定的",
                improvement_method: "SNS、ECサイト、顧客管理システム等の具体的活用計画",
                example: "「Instagram活用で若年層開拓、月○○投稿で○○フォロワー獲得目標」",
            },
        ],
    },
    TemplateSet {
        criterion: Criterion::CostEstimate,
        low_threshold: 15.0,
        templates: &[
            ImprovementTemplate {
                item: "経費明細の詳細化",
                current_issue: "経費の内訳や単価が不明確",
                improvement_method: "見積書を取得し、単価×数量の詳細な明細を作成",
                example: "「ホームページ制作 ○○円、保守費用 ○○円/年」",
            },
            ImprovementTemplate {
                item: "必要性の根拠強化",
                current_issue: "各経費の必要性の説明が不十分",
                improvement_method: "各経費がなぜ必要か、どのような効果があるかを具体的に説明",
                example: "「○○導入により業務効率○%向上、年間○○時間削減効果」",
            },
        ],
    },
];

/// Share of the threshold below which template improvements become important
pub const IMPORTANT_THRESHOLD_RATIO: f64 = 0.7;

pub const CURRENCY_AMOUNT_PATTERN: &str = r"\d+[万億千]円";

pub static CURRENCY_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(CURRENCY_AMOUNT_PATTERN).expect("valid regex"));

pub const NUMERIC_DATA_IMPROVEMENT: ImprovementTemplate = ImprovementTemplate {
    item: "数値データの充実",
    current_issue: "具体的な金額や数量の記載が不足",
    improvement_method: "売上、経費、目標値等を具体的な数値で記載",
    example: "「現在の月商○○万円を○○万円に増加させる計画」",
};

/// Documents shorter than this get the fuller-content improvement
pub const MIN_CONTENT_LENGTH: usize = 1000;

pub const CONTENT_VOLUME_IMPROVEMENT: ImprovementTemplate = ImprovementTemplate {
    item: "記載内容の充実",
    current_issue: "全体的な記載量が不足している可能性",
    improvement_method: "各項目について、より詳細で具体的な内容を記載",
    example: "背景、現状、課題、解決策、効果を段階的に詳述",
};

// =============================================================================
// Extraction
// =============================================================================

/// Amount numeral: comma-grouped thousands or a plain digit run, in ASCII or
/// full-width digits
const AMOUNT: &str = r"([0-9０-９]{1,3}(?:[,，][0-9０-９]{3})+|[0-9０-９]+)";

pub static CONTROL_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x08\x0b\x0c\x0e-\x1f\x7f-\x{9f}]").expect("valid regex")
});
pub static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
pub static LINE_EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?\n ?").expect("valid regex"));
pub static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

pub static COMPANY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(株式会社|有限会社|合同会社|個人事業主)\s*([^\s]+)").expect("valid regex")
});
pub static REPRESENTATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"代表者(?:氏名)?[^\S\n]*[:：]?[^\S\n]*([^\s:：]+)").expect("valid regex"));
pub static EMPLOYEES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"従業員.*?([0-9０-９]+).*?人").expect("valid regex"));
pub static CAPITAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"資本金.*?{AMOUNT}.*?万円")).expect("valid regex"));
pub static ESTABLISHED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"設立.*?([0-9０-９]{4})年").expect("valid regex"));

pub static YEAR_SALES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"([0-9０-９]{{4}})年.*?売上.*?{AMOUNT}.*?(万円|千円|億円)"))
        .expect("valid regex")
});
pub static SALES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"売上.*?{AMOUNT}.*?(万円|千円|億円)")).expect("valid regex")
});
pub static SALES_HISTORY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"([0-9０-９]{{4}})年.*?{AMOUNT}.*?(万円|千円|億円)")).expect("valid regex")
});
pub static PROFIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"利益.*?{AMOUNT}.*?(万円|千円|億円)")).expect("valid regex")
});
pub static GROWTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(前年比|増加|減少|成長).*?([0-9０-９]+).*?[%％]").expect("valid regex"));

pub static MARKET_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"市場.*?([0-9０-９]+).*?(億円|万円|兆円)").expect("valid regex"));
pub static NUMERICAL_TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(売上|顧客|集客|利益).*?([0-9０-９]+).*?(万円|千円|億円|人|件)").expect("valid regex")
});
pub static TIMELINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9０-９]{4}年|[0-9０-９]+月|[0-9０-９]+年後").expect("valid regex"));
pub static EXPECTED_EFFECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"効果.*?([0-9０-９]+).*?(万円|人|件|%|％)").expect("valid regex"));

pub static TOTAL_COST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"合計.*?{AMOUNT}.*?円")).expect("valid regex"));
pub static SUBSIDY_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"補助.*?{AMOUNT}.*?円")).expect("valid regex"));
pub static SELF_FUNDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"自己.*?{AMOUNT}.*?円")).expect("valid regex"));
pub static COST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"([^0-9０-９\n]+?){AMOUNT}.*?円")).expect("valid regex"));

pub static NUMERIC_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Patterns counted as concrete expressions by the content-quality metric
pub const CONCRETE_EXPRESSION_PATTERNS: &[&str] =
    &[r"具体的に", r"詳細", r"\d+年\d+月", r"\d+[万億千]円", r"\d+人"];

pub static CONCRETE_EXPRESSION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    CONCRETE_EXPRESSION_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
});

/// Content quality ceilings: full marks at these values
pub const QUALITY_LENGTH_CEILING: f64 = 2000.0;
pub const QUALITY_NUMERIC_CEILING: f64 = 20.0;
pub const QUALITY_CONCRETE_CEILING: f64 = 10.0;

pub const MARKET_KEYWORDS: &[&str] = &[
    "市場", "競合", "顧客ニーズ", "業界動向", "ライバル", "シェア", "需要", "供給", "トレンド",
    "成長", "縮小", "変化",
];
pub const COMPETITOR_KEYWORDS: &[&str] = &["競合", "ライバル", "他社", "同業"];
pub const CUSTOMER_NEEDS_KEYWORDS: &[&str] = &["顧客ニーズ", "お客様", "利用者", "ユーザー"];
pub const TREND_KEYWORDS: &[&str] = &["トレンド", "動向", "変化", "成長", "拡大"];

pub const STRENGTH_KEYWORDS: &[&str] = &["強み", "優位性", "特徴", "差別化", "独自", "他社にない"];
pub const WEAKNESS_KEYWORDS: &[&str] = &["弱み", "課題", "問題", "改善", "不足"];
pub const DIFFERENTIATION_KEYWORDS: &[&str] = &["差別化", "独自", "他社との違い", "オリジナル"];
pub const ADVANTAGE_KEYWORDS: &[&str] = &["優位性", "アドバンテージ", "競争力", "強み"];

pub const GOAL_KEYWORDS: &[&str] = &["目標", "計画", "予定", "方針", "戦略"];
pub const IMPLEMENTATION_KEYWORDS: &[&str] =
    &["実施", "開始", "完了", "段階", "ステップ", "スケジュール"];

pub const SUBSIDY_KEYWORDS: &[&str] = &[
    "補助事業", "販路開拓", "業務効率", "ホームページ", "チラシ", "看板", "設備", "機械",
    "システム", "広告", "PR",
];
pub const SALES_DEVELOPMENT_KEYWORDS: &[&str] = &["販路", "新規", "開拓", "顧客獲得", "営業"];
pub const EFFICIENCY_KEYWORDS: &[&str] = &["効率", "省力", "自動", "時短", "合理化"];
pub const DIGITAL_KEYWORDS: &[&str] = &["デジタル", "IT", "ホームページ", "SNS", "システム", "DX"];

pub const BONUS_KEYWORDS: &[&str] = &[
    "赤字", "賃上げ", "賃金引上げ", "物価高騰", "コロナ", "震災", "地域資源", "地方創生",
    "経営力向上", "事業承継", "後継者", "くるみん", "えるぼし", "過疎地域",
];
pub const PRIORITY_SIGNAL_KEYWORDS: &[&str] = &["赤字", "賃上げ", "物価高騰", "コロナ", "震災"];
pub const POLICY_SIGNAL_KEYWORDS: &[&str] = &["地域資源", "地方創生", "経営力向上", "事業承継"];

/// The six topic groups counted by the completeness score
pub const COMPLETENESS_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "企業概要",
        keywords: &["企業概要", "事業内容", "会社"],
    },
    KeywordGroup {
        name: "売上・財務",
        keywords: &["売上", "財務", "業績"],
    },
    KeywordGroup {
        name: "強み・弱み",
        keywords: &["強み", "弱み", "特徴"],
    },
    KeywordGroup {
        name: "市場",
        keywords: &["市場", "競合", "顧客"],
    },
    KeywordGroup {
        name: "目標・計画",
        keywords: &["目標", "計画", "方針"],
    },
    KeywordGroup {
        name: "補助事業計画",
        keywords: &["補助事業", "販路", "開拓"],
    },
];

// =============================================================================
// Table validation
// =============================================================================

/// Validate the rubric tables.
/// Returns all validation errors at once (not just the first).
pub fn validate_criteria(criteria: &[CriterionDef]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for def in criteria {
        let name = def.criterion.as_str();
        if def.sub_criteria.is_empty() {
            errors.push(format!("{}: no sub-criteria", name));
            continue;
        }

        let weight_sum: f64 = def.sub_criteria.iter().map(|s| s.weight).sum();
        if (weight_sum - 1.0).abs() > 1e-9 {
            errors.push(format!(
                "{}: sub-criterion weights sum to {} (expected 1.0)",
                name, weight_sum
            ));
        }

        for (i, sub) in def.sub_criteria.iter().enumerate() {
            if sub.keywords.is_empty() {
                errors.push(format!("{}.sub_criteria[{}]: empty keyword list", name, i));
            }
            if sub.weight <= 0.0 {
                errors.push(format!(
                    "{}.sub_criteria[{}]: weight must be positive",
                    name, i
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_criteria_are_valid() {
        assert!(validate_criteria(CRITERIA).is_ok());
    }

    #[test]
    fn test_criteria_cover_every_criterion_in_order() {
        let order: Vec<Criterion> = CRITERIA.iter().map(|d| d.criterion).collect();
        assert_eq!(order, Criterion::all());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        const BROKEN: &[CriterionDef] = &[CriterionDef {
            criterion: Criterion::CostEstimate,
            sub_criteria: &[
                SubCriterionDef {
                    name: "a",
                    weight: 0.5,
                    keywords: &[],
                },
                SubCriterionDef {
                    name: "b",
                    weight: 0.0,
                    keywords: &["x"],
                },
            ],
        }];
        let errors = validate_criteria(BROKEN).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("weights sum"));
        assert!(errors[1].contains("empty keyword list"));
        assert!(errors[2].contains("weight must be positive"));
    }

    #[test]
    fn test_bonus_tables() {
        assert_eq!(PRIORITY_BONUSES.len(), 4);
        assert_eq!(POLICY_BONUSES.len(), 5);
        for bonus in PRIORITY_BONUSES.iter().chain(POLICY_BONUSES) {
            assert!(!bonus.keywords.is_empty(), "{} has no keywords", bonus.name);
            assert!(bonus.points > 0, "{} awards no points", bonus.name);
        }
    }

    #[test]
    fn test_template_sets() {
        let order: Vec<Criterion> = IMPROVEMENT_TEMPLATES.iter().map(|t| t.criterion).collect();
        assert_eq!(order, Criterion::all());
        for set in IMPROVEMENT_TEMPLATES {
            assert!((2..=3).contains(&set.templates.len()));
            assert!(set.low_threshold > 0.0);
            assert!(set.low_threshold <= set.criterion.max_score());
        }
    }

    #[test]
    fn test_keyword_groups() {
        assert_eq!(GATE_GROUPS.len(), 4);
        assert_eq!(COMPLETENESS_GROUPS.len(), 6);
        for group in GATE_GROUPS.iter().chain(COMPLETENESS_GROUPS) {
            assert!(!group.keywords.is_empty());
        }
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(SPECIFICITY_RES.len(), 5);
        assert_eq!(CONCRETE_EXPRESSION_RES.len(), 5);
        // Force every lazy regex
        let statics: &[&Lazy<Regex>] = &[
            &QUALITY_NUMERIC_RE,
            &AMOUNT_OR_HEADCOUNT_RE,
            &CURRENCY_AMOUNT_RE,
            &CONTROL_CHARS_RE,
            &SPACE_RUN_RE,
            &LINE_EDGE_RE,
            &BLANK_LINES_RE,
            &COMPANY_NAME_RE,
            &REPRESENTATIVE_RE,
            &EMPLOYEES_RE,
            &CAPITAL_RE,
            &ESTABLISHED_RE,
            &YEAR_SALES_RE,
            &SALES_RE,
            &SALES_HISTORY_RE,
            &PROFIT_RE,
            &GROWTH_RE,
            &MARKET_SIZE_RE,
            &NUMERICAL_TARGET_RE,
            &TIMELINE_RE,
            &EXPECTED_EFFECT_RE,
            &TOTAL_COST_RE,
            &SUBSIDY_AMOUNT_RE,
            &SELF_FUNDING_RE,
            &COST_ITEM_RE,
        ];
        for re in statics {
            assert!(!re.as_str().is_empty());
        }
        assert!(!NUMERIC_TOKEN_RE.as_str().is_empty());
    }

    #[test]
    fn test_ladders_are_descending() {
        for pair in ADOPTION_LADDER.windows(2) {
            assert!(pair[0].0 > pair[1].0);
        }
        for pair in STRICT_LENGTH_PENALTIES.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}
