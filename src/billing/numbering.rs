//! Sequential invoice numbers
//!
//! Numbers look like `INV-001`. The sequence is zero-padded to three digits
//! and simply grows past that (`INV-1000`).
//!
//! By default the next number is derived from the *last invoice in insertion
//! order*, not from the highest number on file. Deleting the newest invoice
//! therefore hands its number out again. [`NumberingStrategy::HighestSuffix`]
//! can be selected in the settings to key off the maximum instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text before the dash in every generated number
pub const INVOICE_PREFIX: &str = "INV";

/// Minimum number of digits in the sequence part
const SEQUENCE_WIDTH: usize = 3;

/// Anything that carries an invoice display number
pub trait Numbered {
    fn number(&self) -> &str;
}

impl Numbered for String {
    fn number(&self) -> &str {
        self
    }
}

impl Numbered for &str {
    fn number(&self) -> &str {
        self
    }
}

/// How the next invoice number is derived from the existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberingStrategy {
    /// Increment the number of the most recently inserted invoice
    #[default]
    LastInserted,
    /// Increment the highest number among all invoices
    HighestSuffix,
}

impl NumberingStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "last-inserted" | "last" => Some(Self::LastInserted),
            "highest-suffix" | "highest" | "max" => Some(Self::HighestSuffix),
            _ => None,
        }
    }
}

impl fmt::Display for NumberingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastInserted => write!(f, "last-inserted"),
            Self::HighestSuffix => write!(f, "highest-suffix"),
        }
    }
}

/// Extract the sequence from a number such as `INV-007`
///
/// Reads the leading digits of the segment after the first dash. Missing or
/// non-numeric segments count as 0.
pub fn sequence_of(number: &str) -> u64 {
    let Some(segment) = number.split('-').nth(1) else {
        return 0;
    };

    let segment = segment.trim_start();
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());

    segment[..end].parse().unwrap_or(0)
}

/// Render a sequence as an invoice number
pub fn format_invoice_number(sequence: u64) -> String {
    format!(
        "{}-{:0width$}",
        INVOICE_PREFIX,
        sequence,
        width = SEQUENCE_WIDTH
    )
}

/// Next invoice number after the last invoice in insertion order.
///
/// ## Example
/// ```rust
/// use freelance::billing::next_invoice_number;
///
/// let none: [&str; 0] = [];
/// assert_eq!(next_invoice_number(&none), "INV-001");
/// assert_eq!(next_invoice_number(&["INV-007"]), "INV-008");
/// assert_eq!(next_invoice_number(&["INV-999"]), "INV-1000");
/// ```
pub fn next_invoice_number<T: Numbered>(existing: &[T]) -> String {
    next_invoice_number_with(existing, NumberingStrategy::LastInserted)
}

/// Next invoice number using an explicit strategy
pub fn next_invoice_number_with<T: Numbered>(
    existing: &[T],
    strategy: NumberingStrategy,
) -> String {
    let current = match strategy {
        NumberingStrategy::LastInserted => existing.last().map(|r| sequence_of(r.number())),
        NumberingStrategy::HighestSuffix => existing.iter().map(|r| sequence_of(r.number())).max(),
    };

    format_invoice_number(current.unwrap_or(0).saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number() {
        let existing: Vec<String> = Vec::new();
        assert_eq!(next_invoice_number(&existing), "INV-001");
    }

    #[test]
    fn test_increments_last() {
        assert_eq!(next_invoice_number(&["INV-007"]), "INV-008");
        assert_eq!(next_invoice_number(&["INV-001", "INV-002"]), "INV-003");
    }

    #[test]
    fn test_grows_past_three_digits() {
        assert_eq!(next_invoice_number(&["INV-999"]), "INV-1000");
        assert_eq!(next_invoice_number(&["INV-1000"]), "INV-1001");
    }

    #[test]
    fn test_unparseable_last_number_restarts() {
        assert_eq!(next_invoice_number(&["DRAFT"]), "INV-001");
        assert_eq!(next_invoice_number(&["INV-abc"]), "INV-001");
        assert_eq!(next_invoice_number(&["INV-"]), "INV-001");
    }

    #[test]
    fn test_leading_digits_only() {
        assert_eq!(sequence_of("INV-012-B"), 12);
        assert_eq!(sequence_of("INV-12a"), 12);
        assert_eq!(sequence_of("INV-007"), 7);
    }

    #[test]
    fn test_insertion_order_not_maximum() {
        let existing = ["INV-010", "INV-003"];
        assert_eq!(next_invoice_number(&existing), "INV-004");
        assert_eq!(
            next_invoice_number_with(&existing, NumberingStrategy::HighestSuffix),
            "INV-011"
        );
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            NumberingStrategy::parse("highest"),
            Some(NumberingStrategy::HighestSuffix)
        );
        assert_eq!(
            NumberingStrategy::parse("last_inserted"),
            Some(NumberingStrategy::LastInserted)
        );
        assert_eq!(NumberingStrategy::parse("random"), None);
    }
}
