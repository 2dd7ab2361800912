use crate::utils::constants::CURRENCY_SYMBOL;

/// Format a price for an axis label: currency glyph, integer part truncated
/// toward zero, thousands separated (`1234567.9` -> `₹1,234,567`).
pub fn format_rupees(value: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, group_thousands(value.trunc() as i64))
}

/// Insert `,` between every group of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Render an optional metric for console reports.
pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}
