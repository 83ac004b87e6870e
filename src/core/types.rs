use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BlueprintError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
}

impl Priority {
    pub fn badge(self) -> BadgeVariant {
        match self {
            Priority::High => BadgeVariant::Default,
            Priority::Medium => BadgeVariant::Secondary,
            Priority::Low => BadgeVariant::Outline,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Warning,
    Critical,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum CoverageStatus {
    Adequate,
    Underinsured,
    #[serde(rename = "Not Covered", alias = "NotCovered", alias = "not-covered")]
    NotCovered,
}

impl CoverageStatus {
    pub fn label(self) -> &'static str {
        match self {
            CoverageStatus::Adequate => "Adequate",
            CoverageStatus::Underinsured => "Underinsured",
            CoverageStatus::NotCovered => "Not Covered",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            CoverageStatus::Adequate => Tone::Positive,
            CoverageStatus::Underinsured => Tone::Warning,
            CoverageStatus::NotCovered => Tone::Critical,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CoverageStatus::Adequate => "check-circle-2",
            CoverageStatus::Underinsured => "alert-circle",
            CoverageStatus::NotCovered => "x-circle",
        }
    }

    /// Advice shown next to a coverage shortfall.
    pub fn gap_advice(self) -> &'static str {
        match self {
            CoverageStatus::NotCovered => {
                "Consider obtaining coverage to protect against financial risk"
            }
            CoverageStatus::Adequate | CoverageStatus::Underinsured => {
                "Consider increasing coverage to meet recommended levels"
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ActionCategory {
    Immediate,
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl ActionCategory {
    /// Display order on the action plan page.
    pub const ORDER: [ActionCategory; 4] = [
        ActionCategory::Immediate,
        ActionCategory::ShortTerm,
        ActionCategory::MediumTerm,
        ActionCategory::LongTerm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionCategory::Immediate => "Immediate",
            ActionCategory::ShortTerm => "Short-term",
            ActionCategory::MediumTerm => "Medium-term",
            ActionCategory::LongTerm => "Long-term",
        }
    }

    pub fn window(self) -> &'static str {
        match self {
            ActionCategory::Immediate => "Next 0-3 months",
            ActionCategory::ShortTerm => "3-6 months",
            ActionCategory::MediumTerm => "6-12 months",
            ActionCategory::LongTerm => "12+ months",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreLevel {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreLevel {
    pub fn for_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreLevel::Excellent
        } else if score >= 6.0 {
            ScoreLevel::Good
        } else {
            ScoreLevel::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "Excellent",
            ScoreLevel::Good => "Good",
            ScoreLevel::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            ScoreLevel::Excellent => Tone::Positive,
            ScoreLevel::Good => Tone::Neutral,
            ScoreLevel::NeedsImprovement => Tone::Warning,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "trending-up",
            ScoreLevel::Good => "minus",
            ScoreLevel::NeedsImprovement => "trending-down",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Summary,
    Profile,
    Quantitative,
    Qualitative,
    Protection,
    Mindset,
    ActionPlan,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Summary,
        Page::Profile,
        Page::Quantitative,
        Page::Qualitative,
        Page::Protection,
        Page::Mindset,
        Page::ActionPlan,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Summary => "summary",
            Page::Profile => "profile",
            Page::Quantitative => "quantitative",
            Page::Qualitative => "qualitative",
            Page::Protection => "protection",
            Page::Mindset => "mindset",
            Page::ActionPlan => "action-plan",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Page::Summary => "/",
            Page::Profile => "/profile",
            Page::Quantitative => "/quantitative",
            Page::Qualitative => "/qualitative",
            Page::Protection => "/protection",
            Page::Mindset => "/mindset",
            Page::ActionPlan => "/action-plan",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Summary => "All-in-One Summary",
            Page::Profile => "Profile overview",
            Page::Quantitative => "Quantitative analysis",
            Page::Qualitative => "Qualitative analysis",
            Page::Protection => "Financial protection",
            Page::Mindset => "Financial mindset",
            Page::ActionPlan => "Action plan",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Page::Summary => "Review every dimension of your financial plan on a single page.",
            Page::Profile => "Household demographics and core financial stats.",
            Page::Quantitative => "Income, expenditure, savings, and education planning.",
            Page::Qualitative => "Goals, risk appetite, and lifestyle drivers.",
            Page::Protection => "Insurance cover levels and emergency readiness.",
            Page::Mindset => "Behaviours and confidence across money domains.",
            Page::ActionPlan => "Prioritised steps to advance your objectives.",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('/').to_ascii_lowercase();
        match normalized.as_str() {
            "" | "summary" => Ok(Page::Summary),
            "profile" => Ok(Page::Profile),
            "quantitative" => Ok(Page::Quantitative),
            "qualitative" => Ok(Page::Qualitative),
            "protection" => Ok(Page::Protection),
            "mindset" => Ok(Page::Mindset),
            "action-plan" | "action_plan" | "actionplan" => Ok(Page::ActionPlan),
            _ => Err(BlueprintError::UnknownPage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub location: String,
    pub employment: String,
    pub annual_income: f64,
    pub monthly_income: f64,
    pub net_worth: f64,
    #[serde(default)]
    pub net_worth_growth: f64,
    pub savings_rate: f64,
    pub tax_paid: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spouse {
    pub name: String,
    pub age: u32,
    pub employment: String,
    pub income: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub special_needs: bool,
    #[serde(default)]
    pub special_needs_details: Option<String>,
    pub education: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependants {
    pub spouse: Option<Spouse>,
    #[serde(default)]
    pub children: Vec<Child>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCost {
    pub child: String,
    pub stage: String,
    pub monthly_cost: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPlan {
    pub child: String,
    pub stage: String,
    pub estimated_cost: f64,
    pub current_savings: f64,
    #[serde(default)]
    pub additional_needs: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub current_costs: Vec<EducationCost>,
    #[serde(default)]
    pub future_planning: Vec<EducationPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeEvent {
    pub id: u32,
    pub event: String,
    pub estimated_date: String,
    pub estimated_cost: f64,
    pub current_savings: f64,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    pub source: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub isa_contributions: f64,
    pub isa_allowance: f64,
    pub pension_contributions: f64,
    pub pension_allowance: f64,
    pub emergency_fund: f64,
    pub emergency_fund_target: f64,
    pub investments: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub personal_allowance: f64,
    pub basic_rate: f64,
    pub higher_rate: f64,
    pub national_insurance: f64,
    pub total_tax: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u32,
    pub title: String,
    pub target: f64,
    pub current: f64,
    pub deadline: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskTolerance {
    pub score: u8,
    pub level: String,
    pub description: String,
}

/// Ranked lifestyle priority. Ranks are positive but may repeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestylePriority {
    pub priority: String,
    pub rank: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    #[serde(rename = "type")]
    pub kind: String,
    pub coverage: f64,
    pub recommended: f64,
    pub status: CoverageStatus,
    /// Monthly premium.
    pub premium: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFund {
    pub current: f64,
    pub monthly_expenses: f64,
    pub target: f64,
    pub target_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub dimension: String,
    pub score: u8,
}

/// Ordered named scores, each in `[0, 10]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSet(Vec<DimensionScore>);

impl ScoreSet {
    pub const MAX_SCORE: u8 = 10;

    pub fn new(entries: Vec<DimensionScore>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DimensionScore> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: u32,
    pub category: ActionCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub impact: String,
    pub timeframe: String,
    #[serde(default)]
    pub completed: bool,
}

/// The whole dashboard dataset. Loaded once and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub profile: Profile,
    pub dependants: Dependants,
    #[serde(default)]
    pub education: Education,
    #[serde(default)]
    pub life_events: Vec<LifeEvent>,
    #[serde(default)]
    pub income: Vec<IncomeSource>,
    #[serde(default)]
    pub expenses: Vec<ExpenseCategory>,
    pub savings: Savings,
    pub tax: TaxBreakdown,
    #[serde(default)]
    pub goals: Vec<Goal>,
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub lifestyle_priorities: Vec<LifestylePriority>,
    #[serde(default)]
    pub insurance: Vec<InsurancePolicy>,
    pub emergency_fund: EmergencyFund,
    #[serde(default)]
    pub mindset: ScoreSet,
    #[serde(default)]
    pub action_plan: Vec<ActionItem>,
}
