//! Value Formatting
//!
//! Formatters used for metric text and chart tooltips. All functions are pure.

/// Signature shared by every metric formatter
pub type Formatter = fn(f64) -> String;

const RUPEE: char = '₹';

/// Format a value as whole Indian rupees (`en-IN`, no fractional digits)
///
/// Uses the Indian grouping convention: the last three digits form one
/// group, every group above it has two digits (`₹12,34,567`).
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return format!("{}NaN", RUPEE);
    }

    let sign = if value < 0.0 { "-" } else { "" };

    if value.is_infinite() {
        return format!("{}{}∞", sign, RUPEE);
    }

    // f64::round rounds half away from zero
    let digits = format!("{:.0}", value.abs().round());
    format!("{}{}{}", sign, RUPEE, group_indian(&digits))
}

/// Format a value with two fractional digits (`1.5` → `1.50`)
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a percentage with two fractional digits (`42.5` → `42.50%`)
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Insert Indian-style group separators into a plain digit string
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
