//! Freelance CLI - invoicing and time tracking for freelancers
//!
//! This library provides the core functionality for the Freelance CLI
//! application: clients, projects, time entries and invoices stored as JSON
//! files, with validated line items, cent-exact totals and sequential
//! invoice numbers.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `validation`: Field validators and the validation error type
//! - `billing`: Invoice totals and invoice numbering
//! - `models`: Core data models (clients, projects, time entries, invoices)
//! - `config`: Paths and business settings
//! - `error`: Custom error types
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `display`: Terminal formatting and the printable invoice
//! - `export`: JSON and CSV export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use freelance::billing::calculate_invoice_total;
//! use freelance::models::LineItem;
//!
//! let items = vec![LineItem::new("Design", 2, 150), LineItem::new("Dev", 5, 100)];
//! let totals = calculate_invoice_total(&items, 20)?;
//! assert_eq!(totals.total.to_string(), "960.00");
//! ```

pub mod billing;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::FreelanceError;
