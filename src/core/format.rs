use super::metrics::round_to;

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `£` amount with thousands separators. Whole pounds drop the pence.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "£0".to_string();
    }
    let pence = (value.abs() * 100.0).round();
    let sign = if value < 0.0 && pence > 0.0 { "-" } else { "" };
    let whole = format!("{:.0}", (pence / 100.0).trunc());
    let fraction = pence % 100.0;
    if fraction == 0.0 {
        format!("{sign}£{}", group_thousands(&whole))
    } else {
        format!("{sign}£{}.{fraction:02.0}", group_thousands(&whole))
    }
}

/// Fixed decimals, halves rounded away from zero.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.decimals$}", 0.0);
    }
    let rounded = round_to(value, decimals as u32);
    // avoid printing "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.decimals$}")
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_fixed(value, decimals))
}

/// Percentage printed as stored: `28` shows as `28%`, `28.5` as `28.5%`.
pub fn format_rate(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value}%")
}

/// `"spendingHabits"` becomes `"Spending Habits"`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}
