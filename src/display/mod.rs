//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display:
//! list tables, detail views, the dashboard and the printable invoice.

pub mod client;
pub mod dashboard;
pub mod format;
pub mod invoice;
pub mod project;
pub mod time_log;

pub use client::{format_client_details, format_client_list};
pub use dashboard::format_dashboard;
pub use format::{format_date, format_money, truncate};
pub use invoice::{format_invoice_details, format_invoice_list, render_invoice_document};
pub use project::{format_project_details, format_project_list};
pub use time_log::format_time_log_list;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

/// Render rows as a table, right-aligning every column from `numeric_from` on
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, numeric_from: usize) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(numeric_from..), Alignment::right());
    table.to_string()
}
