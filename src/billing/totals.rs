//! Invoice totals calculation
//!
//! Rounding happens exactly three times, in this order:
//!
//! 1. `subtotal = round2(Σ quantity × unit price)` (lines are never rounded
//!    individually)
//! 2. `tax = round2(subtotal × rate / 100)`
//! 3. `total = round2(subtotal + tax)`
//!
//! Rounding is half away from zero at the cent.

use rust_decimal::Decimal;

use crate::models::{round2, LineItem, Money};
use crate::validation::{validate_invoice_items, validate_rate, FieldValue, ValidationResult};

/// Derived invoice amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvoiceTotals {
    /// Validated tax rate in percent the amounts were computed with
    pub tax_rate: Decimal,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl InvoiceTotals {
    /// Check `total == round2(subtotal + tax)`
    pub fn is_consistent(&self) -> bool {
        self.total.amount() == round2(self.subtotal.amount() + self.tax.amount())
    }
}

/// Compute subtotal, tax and total for a list of line items.
///
/// Items are validated first (fail-fast, first error wins), then the tax
/// rate. No totals are produced when either check fails.
///
/// ## Example
/// ```rust
/// use freelance::billing::calculate_invoice_total;
/// use freelance::models::{LineItem, Money};
/// use rust_decimal_macros::dec;
///
/// let items = vec![
///     LineItem::new("Design", 2, 150),
///     LineItem::new("Dev", 5, 100),
/// ];
/// let totals = calculate_invoice_total(&items, 20).unwrap();
/// assert_eq!(totals.total, Money::new(dec!(960)));
/// ```
pub fn calculate_invoice_total(
    items: &[LineItem],
    tax_rate: impl Into<FieldValue>,
) -> ValidationResult<InvoiceTotals> {
    validate_invoice_items(items)?;
    let tax_rate = validate_rate(tax_rate, Some("Tax rate"))?;

    let raw_subtotal: Decimal = items
        .iter()
        .map(|item| item.quantity.parse_or_zero() * item.unit_price.parse_or_zero())
        .sum();

    let subtotal = Money::new(raw_subtotal);
    let tax = Money::new(subtotal.amount() * tax_rate / Decimal::ONE_HUNDRED);
    let total = Money::new(subtotal.amount() + tax.amount());

    Ok(InvoiceTotals {
        tax_rate,
        subtotal,
        tax,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    #[test]
    fn test_design_and_dev_at_twenty_percent() {
        let items = vec![
            LineItem::new("Design", 2, 150),
            LineItem::new("Dev", 5, 100),
        ];
        let totals = calculate_invoice_total(&items, 20).unwrap();

        assert_eq!(totals.subtotal, money(dec!(800.00)));
        assert_eq!(totals.tax, money(dec!(160.00)));
        assert_eq!(totals.total, money(dec!(960.00)));
    }

    #[test]
    fn test_empty_items_yield_no_totals() {
        assert_eq!(
            calculate_invoice_total(&[], 20),
            Err(ValidationError::EmptyItemList)
        );
    }

    #[test]
    fn test_half_cent_rounds_up() {
        let items = vec![LineItem::new("Widget", 1, "10.005")];
        let totals = calculate_invoice_total(&items, 0).unwrap();
        assert_eq!(totals.subtotal.amount(), dec!(10.01));
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total.amount(), dec!(10.01));
    }

    #[test]
    fn test_only_aggregate_is_rounded() {
        // 0.5 × 0.01 = 0.005 per line; per-line rounding would give 0.02
        let items = vec![
            LineItem::new("A", "0.5", "0.01"),
            LineItem::new("B", "0.5", "0.01"),
        ];
        let totals = calculate_invoice_total(&items, 0).unwrap();
        assert_eq!(totals.subtotal.amount(), dec!(0.01));
    }

    #[test]
    fn test_tax_rounded_from_rounded_subtotal() {
        let items = vec![LineItem::new("Consulting", 1, "10.005")];
        let totals = calculate_invoice_total(&items, "7.5").unwrap();
        // 10.01 × 7.5% = 0.75075
        assert_eq!(totals.tax.amount(), dec!(0.75));
        assert_eq!(totals.total.amount(), dec!(10.76));
    }

    #[test]
    fn test_idempotent() {
        let items = vec![
            LineItem::new("Hosting", "3", "19.99"),
            LineItem::new("Support", "1.25", "85.50"),
        ];
        let first = calculate_invoice_total(&items, "19.6").unwrap();
        let second = calculate_invoice_total(&items, "19.6").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.total.amount().serialize(),
            second.total.amount().serialize()
        );
    }

    #[test]
    fn test_invariant_holds() {
        let items = vec![
            LineItem::new("Hosting", "3", "19.99"),
            LineItem::new("Support", "1.25", "85.50"),
            LineItem::new("Domain", "1", "12.345"),
        ];
        let totals = calculate_invoice_total(&items, "19.6").unwrap();

        let raw: Decimal = items.iter().filter_map(LineItem::line_amount).sum();
        assert_eq!(totals.subtotal.amount(), round2(raw));
        assert!(totals.is_consistent());
    }

    #[test]
    fn test_item_error_wins_over_rate_error() {
        let items = vec![LineItem::new("", 1, 1)];
        assert_eq!(
            calculate_invoice_total(&items, 500),
            Err(ValidationError::MissingDescription { position: 1 })
        );
    }

    #[test]
    fn test_invalid_tax_rate() {
        let items = vec![LineItem::new("Design", 1, 100)];
        let err = calculate_invoice_total(&items, "120").unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "Tax rate".into(),
                min: dec!(0),
                max: dec!(100),
            }
        );

        assert!(matches!(
            calculate_invoice_total(&items, "abc"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_parsed_tax_rate_is_returned() {
        let items = vec![LineItem::new("Design", 1, 100)];
        let totals = calculate_invoice_total(&items, " 7.5 ").unwrap();
        assert_eq!(totals.tax_rate, dec!(7.5));
        assert_eq!(totals.tax.amount(), dec!(7.50));
    }

    #[test]
    fn test_full_tax_rate() {
        let items = vec![LineItem::new("Design", 1, "99.99")];
        let totals = calculate_invoice_total(&items, 100).unwrap();
        assert_eq!(totals.tax.amount(), dec!(99.99));
        assert_eq!(totals.total.amount(), dec!(199.98));
    }
}
