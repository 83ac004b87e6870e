//! Derived metrics shown across the dashboard pages.
//!
//! Every division guards its denominator: a zero or non-finite denominator
//! yields `0.0` rather than NaN or infinity.

use super::types::ScoreSet;

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Share of `target` reached by `current`, in percent, within `[0, 100]`.
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    safe_ratio(current * 100.0, target).clamp(0.0, 100.0)
}

pub fn remaining_amount(current: f64, target: f64) -> f64 {
    (target - current).max(0.0)
}

pub fn completion_ratio(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

pub fn average_score(scores: &ScoreSet) -> f64 {
    let sum: f64 = scores.iter().map(|entry| f64::from(entry.score)).sum();
    safe_ratio(sum, scores.len() as f64)
}

/// Tax paid as a percentage of gross income, unrounded.
pub fn tax_burden_ratio(tax_paid: f64, gross_income: f64) -> f64 {
    safe_ratio(tax_paid * 100.0, gross_income)
}

/// Shortfall of `actual` against `recommended`. Only meaningful when
/// `actual < recommended`; see [`coverage_gap`].
pub fn gap_amount(recommended: f64, actual: f64) -> f64 {
    recommended - actual
}

pub fn coverage_gap(recommended: f64, actual: f64) -> Option<f64> {
    (actual < recommended).then(|| gap_amount(recommended, actual))
}

/// Rounded whole-percent share of `part` in `whole`.
pub fn share_percentage(part: f64, whole: f64) -> u32 {
    safe_ratio(part * 100.0, whole).round().max(0.0) as u32
}

pub fn months_covered(balance: f64, monthly_expenses: f64) -> f64 {
    round_to(safe_ratio(balance, monthly_expenses), 1)
}

pub fn monthly_savings(monthly_income: f64, savings_rate: f64) -> f64 {
    (monthly_income * savings_rate / 100.0).round()
}
