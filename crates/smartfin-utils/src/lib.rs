//! Utility functions and helpers

/// Round a currency amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Share of `part` in `whole`, in percent. Zero when `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Format an amount as dollars with two decimals
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Build an identifier from a prefix and its parts, joined by underscores
pub fn generate_id(prefix: &str, parts: &[&dyn std::fmt::Display]) -> String {
    let mut id = prefix.to_string();
    for part in parts {
        id.push('_');
        id.push_str(&part.to_string());
    }
    id
}
