use std::fs;
use std::path::Path;

use super::types::{
    ActionCategory, ActionItem, Blueprint, Child, CoverageStatus, Dependants, DimensionScore,
    Education, EducationCost, EducationPlan, EmergencyFund, ExpenseCategory, Goal, IncomeSource,
    InsurancePolicy, LifeEvent, LifestylePriority, Priority, Profile, RiskTolerance, Savings,
    ScoreSet, Spouse, TaxBreakdown,
};
use crate::error::{BlueprintError, Result};

/// Load the dataset from a JSON file, or fall back to the built-in sample.
pub fn load_blueprint(path: Option<&Path>) -> Result<Blueprint> {
    let blueprint = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let blueprint: Blueprint = serde_json::from_str(&raw)?;
            tracing::info!(path = %path.display(), "loaded blueprint data file");
            blueprint
        }
        None => sample_blueprint(),
    };
    blueprint.validate()?;
    tracing::debug!(
        goals = blueprint.goals.len(),
        policies = blueprint.insurance.len(),
        actions = blueprint.action_plan.len(),
        "blueprint data validated"
    );
    Ok(blueprint)
}

/// Upper bound on any money amount in the dataset (one trillion pounds).
pub const MAX_AMOUNT: f64 = 1e12;

fn check_magnitude(field: &str, value: f64) -> Result<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(BlueprintError::Invalid(format!(
            "{field} must not exceed {MAX_AMOUNT} in magnitude, got {value}"
        )));
    }
    Ok(())
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BlueprintError::Invalid(format!(
            "{field} must be a non-negative amount, got {value}"
        )));
    }
    check_magnitude(field, value)
}

fn check_target(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BlueprintError::Invalid(format!("{field} must be > 0, got {value}")));
    }
    check_magnitude(field, value)
}

fn check_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BlueprintError::Invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

impl Blueprint {
    pub fn validate(&self) -> Result<()> {
        let profile = &self.profile;
        check_text("profile.name", &profile.name)?;
        check_amount("profile.annualIncome", profile.annual_income)?;
        check_amount("profile.monthlyIncome", profile.monthly_income)?;
        check_amount("profile.taxPaid", profile.tax_paid)?;
        if !profile.net_worth.is_finite() || !profile.net_worth_growth.is_finite() {
            return Err(BlueprintError::Invalid(
                "profile.netWorth and profile.netWorthGrowth must be finite".to_string(),
            ));
        }
        check_magnitude("profile.netWorth", profile.net_worth)?;
        if !(0.0..=100.0).contains(&profile.savings_rate) {
            return Err(BlueprintError::Invalid(
                "profile.savingsRate must be between 0 and 100".to_string(),
            ));
        }

        if let Some(spouse) = &self.dependants.spouse {
            check_amount("dependants.spouse.income", spouse.income)?;
        }

        for cost in &self.education.current_costs {
            check_amount("education.currentCosts.monthlyCost", cost.monthly_cost)?;
        }
        for plan in &self.education.future_planning {
            check_target("education.futurePlanning.estimatedCost", plan.estimated_cost)?;
            check_amount("education.futurePlanning.currentSavings", plan.current_savings)?;
        }

        for event in &self.life_events {
            check_target("lifeEvents.estimatedCost", event.estimated_cost)?;
            check_amount("lifeEvents.currentSavings", event.current_savings)?;
        }

        for source in &self.income {
            check_amount("income.amount", source.amount)?;
        }
        for expense in &self.expenses {
            check_amount("expenses.amount", expense.amount)?;
        }

        let savings = &self.savings;
        check_amount("savings.isaContributions", savings.isa_contributions)?;
        check_target("savings.isaAllowance", savings.isa_allowance)?;
        check_amount("savings.pensionContributions", savings.pension_contributions)?;
        check_target("savings.pensionAllowance", savings.pension_allowance)?;
        check_amount("savings.emergencyFund", savings.emergency_fund)?;
        check_target("savings.emergencyFundTarget", savings.emergency_fund_target)?;
        check_amount("savings.investments", savings.investments)?;

        for (field, value) in [
            ("tax.personalAllowance", self.tax.personal_allowance),
            ("tax.basicRate", self.tax.basic_rate),
            ("tax.higherRate", self.tax.higher_rate),
            ("tax.nationalInsurance", self.tax.national_insurance),
            ("tax.totalTax", self.tax.total_tax),
        ] {
            check_amount(field, value)?;
        }

        for goal in &self.goals {
            check_text("goals.title", &goal.title)?;
            check_target("goals.target", goal.target)?;
            check_amount("goals.current", goal.current)?;
        }

        if self.risk_tolerance.score > ScoreSet::MAX_SCORE {
            return Err(BlueprintError::Invalid(format!(
                "riskTolerance.score must be between 0 and {}",
                ScoreSet::MAX_SCORE
            )));
        }

        if let Some(item) = self.lifestyle_priorities.iter().find(|item| item.rank == 0) {
            return Err(BlueprintError::Invalid(format!(
                "lifestylePriorities rank for '{}' must be > 0",
                item.priority
            )));
        }

        for policy in &self.insurance {
            check_amount("insurance.coverage", policy.coverage)?;
            check_amount("insurance.recommended", policy.recommended)?;
            check_amount("insurance.premium", policy.premium)?;
        }

        let fund = &self.emergency_fund;
        check_amount("emergencyFund.current", fund.current)?;
        check_target("emergencyFund.monthlyExpenses", fund.monthly_expenses)?;
        check_target("emergencyFund.target", fund.target)?;

        if let Some(entry) = self
            .mindset
            .iter()
            .find(|entry| entry.score > ScoreSet::MAX_SCORE)
        {
            return Err(BlueprintError::Invalid(format!(
                "mindset score for '{}' must be between 0 and {}",
                entry.dimension,
                ScoreSet::MAX_SCORE
            )));
        }

        Ok(())
    }
}

fn money(value: u32) -> f64 {
    f64::from(value)
}

fn action(
    id: u32,
    category: ActionCategory,
    title: &str,
    description: &str,
    priority: Priority,
    impact: &str,
    timeframe: &str,
) -> ActionItem {
    ActionItem {
        id,
        category,
        title: title.to_string(),
        description: description.to_string(),
        priority,
        impact: impact.to_string(),
        timeframe: timeframe.to_string(),
        completed: false,
    }
}

fn goal(
    id: u32,
    title: &str,
    target: u32,
    current: u32,
    deadline: &str,
    priority: Priority,
) -> Goal {
    Goal {
        id,
        title: title.to_string(),
        target: money(target),
        current: money(current),
        deadline: deadline.to_string(),
        priority,
    }
}

fn policy(
    kind: &str,
    coverage: u32,
    recommended: u32,
    status: CoverageStatus,
    premium: u32,
) -> InsurancePolicy {
    InsurancePolicy {
        kind: kind.to_string(),
        coverage: money(coverage),
        recommended: money(recommended),
        status,
        premium: money(premium),
    }
}

/// Illustrative household used when no data file is supplied.
pub fn sample_blueprint() -> Blueprint {
    Blueprint {
        profile: Profile {
            name: "MyBluePrintUser1001".to_string(),
            age: 34,
            location: "Manchester, UK".to_string(),
            employment: "Senior Software Engineer".to_string(),
            annual_income: money(65_000),
            monthly_income: money(5_417),
            net_worth: money(142_500),
            net_worth_growth: 12.0,
            savings_rate: 28.0,
            tax_paid: money(15_732),
        },
        dependants: Dependants {
            spouse: Some(Spouse {
                name: "Partner".to_string(),
                age: 32,
                employment: "Part-time Teacher".to_string(),
                income: money(18_000),
            }),
            children: vec![
                Child {
                    name: "Child 1".to_string(),
                    age: 6,
                    special_needs: false,
                    special_needs_details: None,
                    education: "Primary School".to_string(),
                },
                Child {
                    name: "Child 2".to_string(),
                    age: 3,
                    special_needs: true,
                    special_needs_details: Some(
                        "Autism Spectrum Disorder - requires additional support".to_string(),
                    ),
                    education: "Nursery".to_string(),
                },
            ],
        },
        education: Education {
            current_costs: vec![
                EducationCost {
                    child: "Child 1".to_string(),
                    stage: "Primary School".to_string(),
                    monthly_cost: 0.0,
                    kind: "State School".to_string(),
                },
                EducationCost {
                    child: "Child 2".to_string(),
                    stage: "Nursery".to_string(),
                    monthly_cost: money(850),
                    kind: "Private Nursery with SEN Support".to_string(),
                },
            ],
            future_planning: vec![
                EducationPlan {
                    child: "Child 1".to_string(),
                    stage: "University (2037)".to_string(),
                    estimated_cost: money(45_000),
                    current_savings: money(8_000),
                    additional_needs: None,
                },
                EducationPlan {
                    child: "Child 2".to_string(),
                    stage: "University (2040)".to_string(),
                    estimated_cost: money(50_000),
                    current_savings: money(4_000),
                    additional_needs: Some("May require additional support services".to_string()),
                },
            ],
        },
        life_events: vec![
            LifeEvent {
                id: 1,
                event: "Daughter's Wedding".to_string(),
                estimated_date: "2045".to_string(),
                estimated_cost: money(15_000),
                current_savings: money(2_000),
                priority: Priority::Medium,
            },
            LifeEvent {
                id: 2,
                event: "Home Renovation".to_string(),
                estimated_date: "2027".to_string(),
                estimated_cost: money(35_000),
                current_savings: money(8_000),
                priority: Priority::Medium,
            },
            LifeEvent {
                id: 3,
                event: "Family Holiday (Annual)".to_string(),
                estimated_date: "Yearly".to_string(),
                estimated_cost: money(4_500),
                current_savings: money(1_500),
                priority: Priority::Low,
            },
        ],
        income: [("Salary", 65_000), ("Freelance", 4_800), ("Investments", 700)]
            .into_iter()
            .map(|(source, amount)| IncomeSource {
                source: source.to_string(),
                amount: money(amount),
            })
            .collect(),
        expenses: [
            ("Housing", 1_200),
            ("Transport", 350),
            ("Groceries", 400),
            ("Utilities", 180),
            ("Entertainment", 280),
            ("Subscriptions", 85),
            ("Healthcare", 120),
            ("Other", 285),
        ]
        .into_iter()
        .map(|(category, amount)| ExpenseCategory {
            category: category.to_string(),
            amount: money(amount),
        })
        .collect(),
        savings: Savings {
            isa_contributions: money(12_400),
            isa_allowance: money(20_000),
            pension_contributions: money(8_500),
            pension_allowance: money(60_000),
            emergency_fund: money(18_000),
            emergency_fund_target: money(24_000),
            investments: money(45_000),
        },
        tax: TaxBreakdown {
            personal_allowance: money(12_570),
            basic_rate: money(9_086),
            higher_rate: money(6_646),
            national_insurance: money(4_234),
            total_tax: money(15_732),
        },
        goals: vec![
            goal(1, "House Deposit", 50_000, 28_000, "Dec 2026", Priority::High),
            goal(2, "Retirement Fund", 500_000, 85_000, "2055", Priority::Medium),
            goal(3, "Emergency Fund", 24_000, 18_000, "Jun 2025", Priority::High),
            goal(4, "Children's Education Fund", 95_000, 12_000, "2037", Priority::High),
            goal(5, "Special Needs Trust Fund", 50_000, 8_000, "2040", Priority::High),
        ],
        risk_tolerance: RiskTolerance {
            score: 6,
            level: "Moderate".to_string(),
            description: "Comfortable with some market volatility for potential growth"
                .to_string(),
        },
        lifestyle_priorities: [
            "Financial Security",
            "Career Growth",
            "Work-Life Balance",
            "Travel & Experiences",
            "Home Ownership",
        ]
        .into_iter()
        .zip(1u32..)
        .map(|(priority, rank)| LifestylePriority {
            priority: priority.to_string(),
            rank,
        })
        .collect(),
        insurance: vec![
            policy("Life Insurance", 250_000, 325_000, CoverageStatus::Underinsured, 28),
            policy("Income Protection", 0, 39_000, CoverageStatus::NotCovered, 0),
            policy("Critical Illness", 100_000, 150_000, CoverageStatus::Underinsured, 45),
            policy("Home & Contents", 350_000, 350_000, CoverageStatus::Adequate, 32),
        ],
        emergency_fund: EmergencyFund {
            current: money(18_000),
            monthly_expenses: money(4_000),
            target: money(24_000),
            target_months: 6,
        },
        mindset: ScoreSet::new(
            [
                ("spendingHabits", 7),
                ("savingDiscipline", 8),
                ("investmentConfidence", 6),
                ("financialLiteracy", 7),
            ]
            .into_iter()
            .map(|(dimension, score)| DimensionScore {
                dimension: dimension.to_string(),
                score,
            })
            .collect(),
        ),
        action_plan: vec![
            action(
                1,
                ActionCategory::Immediate,
                "Complete Emergency Fund",
                "Add £6,000 to reach 6-month target",
                Priority::High,
                "Provides essential financial security buffer",
                "Next 3 months",
            ),
            action(
                2,
                ActionCategory::Immediate,
                "Review Income Protection Insurance",
                "Get quotes for income protection cover of £39k annually",
                Priority::High,
                "Protects income in case of illness or injury",
                "Next 2 weeks",
            ),
            action(
                3,
                ActionCategory::ShortTerm,
                "Maximize ISA Allowance",
                "Contribute remaining £7,600 to ISA before year-end",
                Priority::Medium,
                "Tax-free growth on investments",
                "3-6 months",
            ),
            action(
                4,
                ActionCategory::ShortTerm,
                "Increase Life Insurance Coverage",
                "Add £75k to life insurance to reach recommended level",
                Priority::Medium,
                "Better protection for dependents",
                "3-6 months",
            ),
            action(
                5,
                ActionCategory::MediumTerm,
                "Start Pension Salary Sacrifice",
                "Increase pension contributions via salary sacrifice for NI savings",
                Priority::Medium,
                "Reduce tax burden while boosting retirement savings",
                "6-12 months",
            ),
            action(
                6,
                ActionCategory::MediumTerm,
                "Diversify Investment Portfolio",
                "Review and rebalance investment mix across ISA and pension",
                Priority::Low,
                "Optimize risk-adjusted returns",
                "6-12 months",
            ),
            action(
                7,
                ActionCategory::LongTerm,
                "House Deposit Strategy",
                "Continue £900/month savings for house deposit target",
                Priority::High,
                "Progress towards home ownership goal",
                "12+ months",
            ),
            action(
                8,
                ActionCategory::LongTerm,
                "Review Mortgage Options",
                "Research Help to Buy ISA and mortgage pre-approval",
                Priority::Medium,
                "Prepare for property purchase in 2026",
                "12+ months",
            ),
        ],
    }
}
