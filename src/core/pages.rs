use serde::Serialize;
use std::collections::BTreeSet;

use super::format::{
    format_currency, format_fixed, format_percent, format_rate, humanize_key, initials,
};
use super::metrics::{
    average_score, completion_ratio, coverage_gap, monthly_savings, months_covered,
    progress_percentage, remaining_amount, share_percentage, tax_burden_ratio,
};
use super::types::{
    ActionCategory, ActionItem, BadgeVariant, Blueprint, Child, CoverageStatus, Page, Priority,
    ScoreLevel, Spouse, Tone,
};

/// Progress bar model: amounts, percentage and the captions shown beside it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub label: String,
    pub current: f64,
    pub target: f64,
    pub amount_label: String,
    pub percentage: f64,
    pub remaining: f64,
    pub percentage_label: String,
    pub remaining_label: Option<String>,
}

impl ProgressView {
    pub fn new(label: impl Into<String>, current: f64, target: f64) -> Self {
        let percentage = progress_percentage(current, target);
        let remaining = remaining_amount(current, target);
        Self {
            label: label.into(),
            current,
            target,
            amount_label: format!("{} / {}", format_currency(current), format_currency(target)),
            percentage,
            remaining,
            percentage_label: format!("{} complete", format_percent(percentage, 0)),
            remaining_label: (remaining > 0.0)
                .then(|| format!("{} remaining", format_currency(remaining))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub value: String,
    pub positive: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub trend: Option<Trend>,
}

fn stat(title: &str, value: String, subtitle: Option<String>, trend: Option<Trend>) -> StatCard {
    StatCard {
        title: title.to_string(),
        value,
        subtitle,
        trend,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    pub name: String,
    pub initials: String,
    pub employment: String,
    pub age: u32,
    pub location: String,
    pub stats: Vec<StatCard>,
    pub spouse: Option<Spouse>,
    pub children: Vec<Child>,
    pub household_income: f64,
    pub household_income_label: String,
    pub monthly_savings: f64,
    pub monthly_savings_label: String,
    pub tax_burden_ratio: f64,
    pub tax_burden_label: String,
    pub take_home: f64,
    pub take_home_label: String,
}

pub fn profile_page(blueprint: &Blueprint) -> ProfilePage {
    let profile = &blueprint.profile;
    let spouse_income = blueprint
        .dependants
        .spouse
        .as_ref()
        .map_or(0.0, |spouse| spouse.income);
    let household_income = profile.annual_income + spouse_income;
    let monthly_savings = monthly_savings(profile.monthly_income, profile.savings_rate);
    let tax_burden = tax_burden_ratio(profile.tax_paid, profile.annual_income);
    let take_home = profile.annual_income - profile.tax_paid;

    let growth = profile.net_worth_growth;
    let stats = vec![
        stat(
            "Annual Income",
            format_currency(profile.annual_income),
            Some(format!("{}/month", format_currency(profile.monthly_income))),
            None,
        ),
        stat(
            "Net Worth",
            format_currency(profile.net_worth),
            None,
            Some(Trend {
                value: format!(
                    "{}{} YoY",
                    if growth >= 0.0 { "+" } else { "" },
                    format_percent(growth, 0)
                ),
                positive: growth >= 0.0,
            }),
        ),
        stat(
            "Savings Rate",
            format_rate(profile.savings_rate),
            Some("Of gross income".to_string()),
            None,
        ),
        stat(
            "Tax Paid (Annual)",
            format_currency(profile.tax_paid),
            Some("Inc. NI contributions".to_string()),
            None,
        ),
    ];

    ProfilePage {
        name: profile.name.clone(),
        initials: initials(&profile.name),
        employment: profile.employment.clone(),
        age: profile.age,
        location: profile.location.clone(),
        stats,
        spouse: blueprint.dependants.spouse.clone(),
        children: blueprint.dependants.children.clone(),
        household_income,
        household_income_label: format_currency(household_income),
        monthly_savings,
        monthly_savings_label: format_currency(monthly_savings),
        tax_burden_ratio: tax_burden,
        tax_burden_label: format_percent(tax_burden, 1),
        take_home,
        take_home_label: format_currency(take_home),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareView {
    pub name: String,
    pub amount: f64,
    pub amount_label: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCostView {
    pub child: String,
    pub stage: String,
    pub kind: String,
    pub monthly_cost: f64,
    pub cost_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPlanView {
    pub child: String,
    pub stage: String,
    pub estimated_cost_label: String,
    pub progress: ProgressView,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeEventView {
    pub id: u32,
    pub event: String,
    pub estimated_date: String,
    pub priority: Priority,
    pub badge: BadgeVariant,
    pub estimated_cost_label: String,
    pub current_savings_label: String,
    pub progress: ProgressView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    pub label: String,
    pub amount: f64,
    pub amount_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativePage {
    pub income: Vec<ShareView>,
    pub expenses: Vec<ShareView>,
    pub total_monthly_expenses: f64,
    pub total_monthly_expenses_label: String,
    pub savings: Vec<ProgressView>,
    pub total_investments_label: String,
    pub isa_remaining_allowance: f64,
    pub isa_remaining_allowance_label: String,
    pub education_costs: Vec<EducationCostView>,
    pub total_monthly_education_cost: f64,
    pub total_annual_education_cost: f64,
    pub education_plans: Vec<EducationPlanView>,
    pub life_events: Vec<LifeEventView>,
    pub tax_lines: Vec<TaxLine>,
    pub total_tax_label: String,
}

fn tax_line(label: &str, amount: f64) -> TaxLine {
    TaxLine {
        label: label.to_string(),
        amount,
        amount_label: format_currency(amount),
    }
}

pub fn quantitative_page(blueprint: &Blueprint) -> QuantitativePage {
    let total_income: f64 = blueprint.income.iter().map(|source| source.amount).sum();
    let income = blueprint
        .income
        .iter()
        .map(|source| ShareView {
            name: source.source.clone(),
            amount: source.amount,
            amount_label: format_currency(source.amount),
            percentage: share_percentage(source.amount, total_income),
        })
        .collect();

    // Expense shares are measured against the household monthly outgoings
    // baseline, not against the sum of listed categories.
    let expense_baseline = blueprint.emergency_fund.monthly_expenses;
    let expenses = blueprint
        .expenses
        .iter()
        .map(|expense| ShareView {
            name: expense.category.clone(),
            amount: expense.amount,
            amount_label: format_currency(expense.amount),
            percentage: share_percentage(expense.amount, expense_baseline),
        })
        .collect();
    let total_monthly_expenses: f64 = blueprint.expenses.iter().map(|e| e.amount).sum();

    let savings = &blueprint.savings;
    let savings_progress = vec![
        ProgressView::new(
            "ISA Contributions",
            savings.isa_contributions,
            savings.isa_allowance,
        ),
        ProgressView::new(
            "Pension Contributions (Annual)",
            savings.pension_contributions,
            savings.pension_allowance,
        ),
        ProgressView::new(
            "Emergency Fund",
            savings.emergency_fund,
            savings.emergency_fund_target,
        ),
    ];
    let isa_remaining = remaining_amount(savings.isa_contributions, savings.isa_allowance);

    let education_costs = blueprint
        .education
        .current_costs
        .iter()
        .map(|cost| EducationCostView {
            child: cost.child.clone(),
            stage: cost.stage.clone(),
            kind: cost.kind.clone(),
            monthly_cost: cost.monthly_cost,
            cost_label: if cost.monthly_cost > 0.0 {
                format!("{}/mo", format_currency(cost.monthly_cost))
            } else {
                "Free".to_string()
            },
        })
        .collect();
    let total_monthly_education_cost: f64 = blueprint
        .education
        .current_costs
        .iter()
        .map(|cost| cost.monthly_cost)
        .sum();

    let education_plans = blueprint
        .education
        .future_planning
        .iter()
        .map(|plan| EducationPlanView {
            child: plan.child.clone(),
            stage: plan.stage.clone(),
            estimated_cost_label: format_currency(plan.estimated_cost),
            progress: ProgressView::new(
                "Savings Progress",
                plan.current_savings,
                plan.estimated_cost,
            ),
            note: plan.additional_needs.clone(),
        })
        .collect();

    let life_events = blueprint
        .life_events
        .iter()
        .map(|event| LifeEventView {
            id: event.id,
            event: event.event.clone(),
            estimated_date: event.estimated_date.clone(),
            priority: event.priority,
            badge: event.priority.badge(),
            estimated_cost_label: format_currency(event.estimated_cost),
            current_savings_label: format_currency(event.current_savings),
            progress: ProgressView::new("Progress", event.current_savings, event.estimated_cost),
        })
        .collect();

    let tax = &blueprint.tax;
    QuantitativePage {
        income,
        expenses,
        total_monthly_expenses,
        total_monthly_expenses_label: format_currency(total_monthly_expenses),
        savings: savings_progress,
        total_investments_label: format_currency(savings.investments),
        isa_remaining_allowance: isa_remaining,
        isa_remaining_allowance_label: format_currency(isa_remaining),
        education_costs,
        total_monthly_education_cost,
        total_annual_education_cost: total_monthly_education_cost * 12.0,
        education_plans,
        life_events,
        tax_lines: vec![
            tax_line("Personal Allowance", tax.personal_allowance),
            tax_line("Basic Rate Tax (20%)", tax.basic_rate),
            tax_line("Higher Rate Tax (40%)", tax.higher_rate),
            tax_line("National Insurance", tax.national_insurance),
        ],
        total_tax_label: format_currency(tax.total_tax),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    pub id: u32,
    pub title: String,
    pub deadline: String,
    pub priority: Priority,
    pub priority_label: String,
    pub badge: BadgeVariant,
    pub progress: ProgressView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskView {
    pub score: u8,
    pub score_label: String,
    pub level: String,
    pub description: String,
    pub gauge_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPriority {
    pub rank: u32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitativePage {
    pub goals: Vec<GoalView>,
    pub overall_goal_progress: ProgressView,
    pub risk: RiskView,
    pub lifestyle_priorities: Vec<RankedPriority>,
}

pub fn qualitative_page(blueprint: &Blueprint) -> QualitativePage {
    let goals = blueprint
        .goals
        .iter()
        .map(|goal| GoalView {
            id: goal.id,
            title: goal.title.clone(),
            deadline: goal.deadline.clone(),
            priority: goal.priority,
            priority_label: format!("{} Priority", goal.priority.label()),
            badge: goal.priority.badge(),
            progress: ProgressView::new(
                format!(
                    "Progress: {} of {}",
                    format_currency(goal.current),
                    format_currency(goal.target)
                ),
                goal.current,
                goal.target,
            ),
        })
        .collect();

    let (saved, targeted) = blueprint
        .goals
        .iter()
        .fold((0.0, 0.0), |(saved, targeted), goal| {
            (saved + goal.current, targeted + goal.target)
        });

    let risk = &blueprint.risk_tolerance;
    let mut lifestyle_priorities: Vec<RankedPriority> = blueprint
        .lifestyle_priorities
        .iter()
        .map(|item| RankedPriority {
            rank: item.rank,
            label: item.priority.clone(),
        })
        .collect();
    lifestyle_priorities.sort_by_key(|item| item.rank);

    QualitativePage {
        goals,
        overall_goal_progress: ProgressView::new("All goals", saved, targeted),
        risk: RiskView {
            score: risk.score,
            score_label: format!("{}/10", risk.score),
            level: risk.level.clone(),
            description: risk.description.clone(),
            gauge_percentage: f64::from(risk.score) * 10.0,
        },
        lifestyle_priorities,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundView {
    pub current_label: String,
    pub monthly_expenses_label: String,
    pub months_covered: f64,
    pub target_months: u32,
    pub rounded_percentage: u32,
    pub progress: ProgressView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapView {
    pub amount: f64,
    pub amount_label: String,
    pub advice: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyView {
    pub kind: String,
    pub status: CoverageStatus,
    pub status_label: String,
    pub tone: Tone,
    pub icon: String,
    pub premium_label: Option<String>,
    pub coverage_label: String,
    pub recommended_label: String,
    pub gap: Option<GapView>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub adequate: usize,
    pub underinsured: usize,
    pub not_covered: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionPage {
    pub emergency_fund: EmergencyFundView,
    pub policies: Vec<PolicyView>,
    pub status_counts: StatusCounts,
    pub monthly_premiums: f64,
    pub monthly_premiums_label: String,
    pub annual_premiums: f64,
    pub annual_premiums_label: String,
}

pub fn protection_page(blueprint: &Blueprint) -> ProtectionPage {
    let fund = &blueprint.emergency_fund;
    let progress = ProgressView::new(
        format!("Progress to {}-month target", fund.target_months),
        fund.current,
        fund.target,
    );
    let emergency_fund = EmergencyFundView {
        current_label: format_currency(fund.current),
        monthly_expenses_label: format_currency(fund.monthly_expenses),
        months_covered: months_covered(fund.current, fund.monthly_expenses),
        target_months: fund.target_months,
        rounded_percentage: progress.percentage.round() as u32,
        progress,
    };

    let policies = blueprint
        .insurance
        .iter()
        .map(|policy| PolicyView {
            kind: policy.kind.clone(),
            status: policy.status,
            status_label: policy.status.label().to_string(),
            tone: policy.status.tone(),
            icon: policy.status.icon().to_string(),
            premium_label: (policy.premium > 0.0)
                .then(|| format!("{}/month", format_currency(policy.premium))),
            coverage_label: if policy.coverage == 0.0 {
                "None".to_string()
            } else {
                format_currency(policy.coverage)
            },
            recommended_label: format_currency(policy.recommended),
            gap: coverage_gap(policy.recommended, policy.coverage).map(|amount| GapView {
                amount,
                amount_label: format_currency(amount),
                advice: policy.status.gap_advice().to_string(),
            }),
        })
        .collect();

    let mut status_counts = StatusCounts::default();
    for policy in &blueprint.insurance {
        match policy.status {
            CoverageStatus::Adequate => status_counts.adequate += 1,
            CoverageStatus::Underinsured => status_counts.underinsured += 1,
            CoverageStatus::NotCovered => status_counts.not_covered += 1,
        }
    }

    let monthly_premiums: f64 = blueprint.insurance.iter().map(|p| p.premium).sum();
    let annual_premiums = monthly_premiums * 12.0;

    ProtectionPage {
        emergency_fund,
        policies,
        status_counts,
        monthly_premiums,
        monthly_premiums_label: format_currency(monthly_premiums),
        annual_premiums,
        annual_premiums_label: format_currency(annual_premiums),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionView {
    pub key: String,
    pub label: String,
    pub score: u8,
    pub score_label: String,
    pub level: ScoreLevel,
    pub level_label: String,
    pub tone: Tone,
    pub icon: String,
    pub bar_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MindsetPage {
    pub overall_score: f64,
    pub overall_score_label: String,
    pub overall_level: ScoreLevel,
    pub overall_level_label: String,
    pub dimensions: Vec<DimensionView>,
}

pub fn mindset_page(blueprint: &Blueprint) -> MindsetPage {
    let overall = average_score(&blueprint.mindset);
    let overall_level = ScoreLevel::for_score(overall);
    let dimensions = blueprint
        .mindset
        .iter()
        .map(|entry| {
            let level = ScoreLevel::for_score(f64::from(entry.score));
            DimensionView {
                key: entry.dimension.clone(),
                label: humanize_key(&entry.dimension),
                score: entry.score,
                score_label: format!("{}/10", entry.score),
                level,
                level_label: level.label().to_string(),
                tone: level.tone(),
                icon: level.icon().to_string(),
                bar_percentage: f64::from(entry.score) * 10.0,
            }
        })
        .collect();

    MindsetPage {
        overall_score: overall,
        overall_score_label: format_fixed(overall, 1),
        overall_level,
        overall_level_label: overall_level.label().to_string(),
        dimensions,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub badge: BadgeVariant,
    pub impact: String,
    pub timeframe: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroup {
    pub category: ActionCategory,
    pub label: String,
    pub window: String,
    pub items: Vec<ActionView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanPage {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub completion_percentage: u32,
    pub groups: Vec<ActionGroup>,
}

/// Items flagged complete in the data, or named in `completed`, count as
/// done. Ids that match no item are ignored.
pub fn action_plan_page(blueprint: &Blueprint, completed: &BTreeSet<u32>) -> ActionPlanPage {
    let is_done = |item: &ActionItem| item.completed || completed.contains(&item.id);

    let total = blueprint.action_plan.len();
    let done = blueprint.action_plan.iter().filter(|item| is_done(*item)).count();

    let groups = ActionCategory::ORDER
        .into_iter()
        .filter_map(|category| {
            let items: Vec<ActionView> = blueprint
                .action_plan
                .iter()
                .filter(|item| item.category == category)
                .map(|item| ActionView {
                    id: item.id,
                    title: item.title.clone(),
                    description: item.description.clone(),
                    priority: item.priority,
                    badge: item.priority.badge(),
                    impact: item.impact.clone(),
                    timeframe: item.timeframe.clone(),
                    completed: is_done(item),
                })
                .collect();
            (!items.is_empty()).then(|| ActionGroup {
                category,
                label: category.label().to_string(),
                window: category.window().to_string(),
                items,
            })
        })
        .collect();

    ActionPlanPage {
        total,
        completed: done,
        remaining: total - done,
        completion_percentage: completion_ratio(done, total),
        groups,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightCard {
    pub title: String,
    pub value: String,
    pub helper: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLink {
    pub id: String,
    pub title: String,
    pub description: String,
    pub href: String,
}

impl From<Page> for SectionLink {
    fn from(page: Page) -> Self {
        SectionLink {
            id: page.slug().to_string(),
            title: page.title().to_string(),
            description: page.description().to_string(),
            href: page.href().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPage {
    pub highlights: Vec<HighlightCard>,
    pub sections: Vec<SectionLink>,
}

fn highlight(title: &str, value: String, helper: &str) -> HighlightCard {
    HighlightCard {
        title: title.to_string(),
        value,
        helper: helper.to_string(),
    }
}

pub fn summary_page(blueprint: &Blueprint) -> SummaryPage {
    let profile = &blueprint.profile;
    let high_priority_goals = blueprint
        .goals
        .iter()
        .filter(|goal| goal.priority == Priority::High)
        .count();
    let protection_gaps = blueprint
        .insurance
        .iter()
        .filter(|policy| policy.status != CoverageStatus::Adequate)
        .count();

    SummaryPage {
        highlights: vec![
            highlight(
                "Net Worth",
                format_currency(profile.net_worth),
                "Combined assets after liabilities",
            ),
            highlight(
                "Monthly Income",
                format_currency(profile.monthly_income),
                "Household take-home estimate",
            ),
            highlight(
                "Savings Rate",
                format_rate(profile.savings_rate),
                "Portion of income saved",
            ),
            highlight(
                "High-priority Goals",
                high_priority_goals.to_string(),
                "Targets needing immediate focus",
            ),
            highlight(
                "Protection gaps",
                protection_gaps.to_string(),
                "Policies to review soon",
            ),
            highlight(
                "Risk tolerance",
                blueprint.risk_tolerance.level.clone(),
                &blueprint.risk_tolerance.description,
            ),
            highlight(
                "Action items",
                blueprint.action_plan.len().to_string(),
                "Steps tracked in your plan",
            ),
        ],
        sections: Page::ALL
            .into_iter()
            .filter(|page| *page != Page::Summary)
            .map(SectionLink::from)
            .collect(),
    }
}

/// Any page, tagged with its slug on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "view", rename_all = "kebab-case")]
pub enum PageView {
    Summary(SummaryPage),
    Profile(ProfilePage),
    Quantitative(QuantitativePage),
    Qualitative(QualitativePage),
    Protection(ProtectionPage),
    Mindset(MindsetPage),
    ActionPlan(ActionPlanPage),
}

pub fn render_page(blueprint: &Blueprint, page: Page, completed: &BTreeSet<u32>) -> PageView {
    match page {
        Page::Summary => PageView::Summary(summary_page(blueprint)),
        Page::Profile => PageView::Profile(profile_page(blueprint)),
        Page::Quantitative => PageView::Quantitative(quantitative_page(blueprint)),
        Page::Qualitative => PageView::Qualitative(qualitative_page(blueprint)),
        Page::Protection => PageView::Protection(protection_page(blueprint)),
        Page::Mindset => PageView::Mindset(mindset_page(blueprint)),
        Page::ActionPlan => PageView::ActionPlan(action_plan_page(blueprint, completed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::sample_blueprint;
    use crate::core::types::{DimensionScore, ScoreSet};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn progress_view_hides_remaining_when_target_met() {
        let view = ProgressView::new("Home & Contents", 350_000.0, 350_000.0);
        assert_approx(view.percentage, 100.0);
        assert_eq!(view.percentage_label, "100% complete");
        assert!(view.remaining_label.is_none());

        let view = ProgressView::new("ISA", 12_400.0, 20_000.0);
        assert_eq!(view.percentage_label, "62% complete");
        assert_eq!(view.remaining_label.as_deref(), Some("£7,600 remaining"));
        assert_eq!(view.amount_label, "£12,400 / £20,000");
    }

    #[test]
    fn profile_page_derives_household_figures() {
        let page = profile_page(&sample_blueprint());
        assert_eq!(page.initials, "M");
        assert_approx(page.household_income, 83_000.0);
        assert_approx(page.monthly_savings, 1_517.0);
        assert_eq!(page.tax_burden_label, "24.2%");
        assert_eq!(page.take_home_label, "£49,268");
        assert_eq!(page.stats.len(), 4);
        let trend = page.stats[1].trend.as_ref().expect("net worth has a trend");
        assert_eq!(trend.value, "+12% YoY");
        assert!(trend.positive);
        assert_eq!(page.stats[0].subtitle.as_deref(), Some("£5,417/month"));
    }

    #[test]
    fn quantitative_page_shares_and_savings() {
        let page = quantitative_page(&sample_blueprint());
        let income: Vec<u32> = page.income.iter().map(|s| s.percentage).collect();
        assert_eq!(income, vec![92, 7, 1]);
        let expenses: Vec<u32> = page.expenses.iter().map(|s| s.percentage).collect();
        assert_eq!(expenses, vec![30, 9, 10, 5, 7, 2, 3, 7]);
        assert_approx(page.total_monthly_expenses, 2_900.0);
        assert_eq!(page.isa_remaining_allowance_label, "£7,600");
        assert_approx(page.savings[0].percentage, 62.0);
        assert_approx(page.savings[2].percentage, 75.0);
        assert_eq!(page.education_costs[0].cost_label, "Free");
        assert_eq!(page.education_costs[1].cost_label, "£850/mo");
        assert_approx(page.total_annual_education_cost, 10_200.0);
        assert_eq!(
            page.education_plans[1].note.as_deref(),
            Some("May require additional support services")
        );
        assert_eq!(page.life_events[2].badge, BadgeVariant::Outline);
        assert_eq!(page.total_tax_label, "£15,732");
    }

    #[test]
    fn qualitative_page_orders_priorities_by_rank() {
        let mut blueprint = sample_blueprint();
        blueprint.lifestyle_priorities.reverse();
        let page = qualitative_page(&blueprint);
        let ranks: Vec<u32> = page.lifestyle_priorities.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(page.lifestyle_priorities[0].label, "Financial Security");
        assert_approx(page.risk.gauge_percentage, 60.0);
        assert_eq!(page.goals[0].progress.label, "Progress: £28,000 of £50,000");
        assert_approx(page.goals[0].progress.percentage, 56.0);
        assert_eq!(page.goals[1].priority_label, "Medium Priority");
        // 151,000 saved of 719,000 targeted
        assert_approx(page.overall_goal_progress.percentage, 151_000.0 / 719_000.0 * 100.0);
    }

    #[test]
    fn protection_page_reports_gaps_and_premiums() {
        let page = protection_page(&sample_blueprint());
        assert_approx(page.emergency_fund.months_covered, 4.5);
        assert_eq!(page.emergency_fund.rounded_percentage, 75);
        assert_eq!(
            page.emergency_fund.progress.remaining_label.as_deref(),
            Some("£6,000 remaining")
        );

        let life = &page.policies[0];
        let gap = life.gap.as_ref().expect("life insurance is underinsured");
        assert_approx(gap.amount, 75_000.0);
        assert_eq!(gap.advice, "Consider increasing coverage to meet recommended levels");

        let income = &page.policies[1];
        assert_eq!(income.coverage_label, "None");
        assert!(income.premium_label.is_none());
        assert_eq!(income.tone, Tone::Critical);
        assert!(income.gap.as_ref().expect("gap").advice.starts_with("Consider obtaining"));

        assert!(page.policies[3].gap.is_none());
        assert_eq!(page.status_counts.adequate, 1);
        assert_eq!(page.status_counts.underinsured, 2);
        assert_eq!(page.status_counts.not_covered, 1);
        assert_eq!(page.monthly_premiums_label, "£105");
        assert_eq!(page.annual_premiums_label, "£1,260");
    }

    #[test]
    fn mindset_page_scores() {
        let page = mindset_page(&sample_blueprint());
        assert_approx(page.overall_score, 7.0);
        assert_eq!(page.overall_score_label, "7.0");
        assert_eq!(page.overall_level, ScoreLevel::Good);
        assert_eq!(page.dimensions[0].label, "Spending Habits");
        assert_eq!(page.dimensions[1].level, ScoreLevel::Excellent);
        assert_approx(page.dimensions[2].bar_percentage, 60.0);
    }

    #[test]
    fn mindset_label_rounds_half_up() {
        let mut blueprint = sample_blueprint();
        blueprint.mindset = ScoreSet::new(
            [
                ("spendingHabits", 8),
                ("savingsDiscipline", 8),
                ("investmentKnowledge", 6),
                ("financialPlanning", 7),
            ]
            .into_iter()
            .map(|(dimension, score)| DimensionScore {
                dimension: dimension.to_string(),
                score,
            })
            .collect(),
        );
        let page = mindset_page(&blueprint);
        assert_approx(page.overall_score, 7.25);
        assert_eq!(page.overall_score_label, "7.3");
    }

    #[test]
    fn emergency_fund_label_agrees_with_rounded_percentage() {
        let mut blueprint = sample_blueprint();
        blueprint.emergency_fund.current = 3_000.0;
        blueprint.emergency_fund.target = 24_000.0;
        let page = protection_page(&blueprint);
        assert_approx(page.emergency_fund.progress.percentage, 12.5);
        assert_eq!(page.emergency_fund.rounded_percentage, 13);
        assert_eq!(page.emergency_fund.progress.percentage_label, "13% complete");
    }

    #[test]
    fn savings_rate_prints_stored_value() {
        let mut blueprint = sample_blueprint();
        blueprint.profile.savings_rate = 28.5;
        assert_eq!(profile_page(&blueprint).stats[2].value, "28.5%");
        assert_eq!(summary_page(&blueprint).highlights[2].value, "28.5%");
    }

    #[test]
    fn action_plan_tracks_completion() {
        let blueprint = sample_blueprint();
        let page = action_plan_page(&blueprint, &BTreeSet::new());
        assert_eq!(page.total, 8);
        assert_eq!(page.remaining, 8);
        assert_eq!(page.completion_percentage, 0);
        let windows: Vec<&str> = page.groups.iter().map(|g| g.window.as_str()).collect();
        assert_eq!(windows, vec!["Next 0-3 months", "3-6 months", "6-12 months", "12+ months"]);

        let completed: BTreeSet<u32> = [1, 3, 99].into_iter().collect();
        let page = action_plan_page(&blueprint, &completed);
        assert_eq!(page.completed, 2);
        assert_eq!(page.remaining, 6);
        assert_eq!(page.completion_percentage, 25);
        assert!(page.groups[0].items[0].completed);
        assert!(!page.groups[0].items[1].completed);
    }

    #[test]
    fn action_plan_honours_data_flags_and_skips_empty_groups() {
        let mut blueprint = sample_blueprint();
        blueprint
            .action_plan
            .retain(|item: &ActionItem| item.category != ActionCategory::MediumTerm);
        blueprint.action_plan[0].completed = true;

        let page = action_plan_page(&blueprint, &BTreeSet::new());
        assert_eq!(page.groups.len(), 3);
        assert_eq!(page.completed, 1);
        assert_eq!(page.completion_percentage, 17);
    }

    #[test]
    fn empty_action_plan_is_zero_percent() {
        let mut blueprint = sample_blueprint();
        blueprint.action_plan.clear();
        let page = action_plan_page(&blueprint, &BTreeSet::new());
        assert_eq!(page.completion_percentage, 0);
        assert!(page.groups.is_empty());
    }

    #[test]
    fn summary_page_highlights() {
        let page = summary_page(&sample_blueprint());
        let values: Vec<&str> = page.highlights.iter().map(|h| h.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["£142,500", "£5,417", "28%", "4", "3", "Moderate", "8"]
        );
        assert_eq!(page.sections.len(), 6);
        assert_eq!(page.sections[5].href, "/action-plan");
    }

    #[test]
    fn render_page_tags_views_by_slug() {
        let blueprint = sample_blueprint();
        let view = render_page(&blueprint, Page::ActionPlan, &BTreeSet::new());
        let json = serde_json::to_value(&view).expect("page view serializes");
        assert_eq!(json["page"], "action-plan");
        assert_eq!(json["view"]["completionPercentage"], 0);

        let json = serde_json::to_value(render_page(&blueprint, Page::Mindset, &BTreeSet::new()))
            .expect("page view serializes");
        assert_eq!(json["view"]["overallLevel"], "good");
    }
}
