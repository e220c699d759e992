//! Invoice arithmetic and numbering
//!
//! Pure functions with no I/O: the calculator turns validated line items and a
//! tax rate into cent-exact totals, and the sequence generator derives the
//! next human-readable invoice number from the existing invoices.

pub mod numbering;
pub mod totals;

pub use numbering::{
    next_invoice_number, next_invoice_number_with, NumberingStrategy, Numbered, INVOICE_PREFIX,
};
pub use totals::{calculate_invoice_total, InvoiceTotals};
