//! Export module for Freelance CLI
//!
//! Provides data export in two formats:
//! - CSV: one row per invoice (spreadsheet-compatible)
//! - JSON: machine-readable full export of every collection

pub mod csv;
pub mod json;

pub use self::csv::export_invoices_csv;
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
