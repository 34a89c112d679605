//! Display formatting for financial figures.
//!
//! Values are abbreviated with the magnitude units readers of A-share
//! statements expect: 亿 (hundred million) and 万 (ten thousand).

use chrono::NaiveDate;

/// Formats a monetary amount for display.
///
/// `|v| >= 1e8` renders in 亿 units, `|v| >= 1e4` in 万 units, smaller
/// values as a plain two-decimal number. Null and zero both render "0".
#[must_use]
pub fn format_amount(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "0".to_string();
    };
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if abs >= 1e8 {
        format!("{:.1}亿", v / 1e8)
    } else if abs >= 1e4 {
        format!("{:.1}万", v / 1e4)
    } else {
        format!("{v:.2}")
    }
}

/// Formats a growth rate as a signed one-decimal percentage, or "N/A" for
/// null.
#[must_use]
pub fn format_growth(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1}%"),
        None => "N/A".to_string(),
    }
}

/// Formats a report date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
