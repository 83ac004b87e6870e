mod data;
pub mod format;
pub mod metrics;
mod pages;
mod types;

pub use data::{load_blueprint, sample_blueprint};
pub use pages::{
    ActionPlanPage, MindsetPage, PageView, ProfilePage, ProgressView, ProtectionPage,
    QualitativePage, QuantitativePage, SummaryPage, action_plan_page, mindset_page, profile_page,
    protection_page, qualitative_page, quantitative_page, render_page, summary_page,
};
pub use types::{
    ActionCategory, ActionItem, BadgeVariant, Blueprint, CoverageStatus, DimensionScore, Goal,
    InsurancePolicy, LifestylePriority, Page, Priority, ScoreLevel, ScoreSet, Tone,
};
