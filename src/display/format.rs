//! Shared formatting helpers for terminal output

use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Money;

/// Fallback when a configured date format cannot be rendered
const ISO_DATE: &str = "%Y-%m-%d";

/// Format a date with a strftime pattern, falling back to ISO dates
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        out = date.format(ISO_DATE).to_string();
    }
    out
}

/// Amount with two decimals followed by the currency code
pub fn format_money(amount: Money, currency: &str) -> String {
    amount.format_with_currency(currency)
}

/// Percentage without trailing zeros (`20%`, `7.5%`)
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

/// Hours without trailing zeros followed by `h`
pub fn format_hours(hours: Decimal) -> String {
    format!("{}h", hours.normalize())
}

/// Create a simple bar chart representation
pub fn format_bar(value: Decimal, max_value: Decimal, width: usize) -> String {
    if max_value <= Decimal::ZERO || value <= Decimal::ZERO {
        return " ".repeat(width);
    }

    let filled = (value / max_value * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y"), "07/03/2025");
        assert_eq!(format_date(date, "%Q"), "2025-03-07");
    }

    #[test]
    fn test_format_rate_and_hours() {
        assert_eq!(format_rate(dec!(20.00)), "20%");
        assert_eq!(format_rate(dec!(7.5)), "7.5%");
        assert_eq!(format_hours(dec!(2.50)), "2.5h");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(dec!(50), dec!(100), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(dec!(0), dec!(100), 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_header() {
        assert_eq!(format_header("INVOICE", 11), "  INVOICE");
    }
}
