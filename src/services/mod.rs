//! Service layer for Freelance CLI
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod client;
pub mod dashboard;
pub mod filter;
pub mod invoice;
pub mod project;
pub mod time_log;

pub use client::{ClientService, ClientSummary, ClientUpdate, ContactInfo};
pub use dashboard::{DashboardService, DashboardSummary};
pub use filter::{InvoiceFilter, ProjectFilter};
pub use invoice::{InvoiceService, InvoiceUpdate, NewInvoice};
pub use project::{ProjectDetails, ProjectService, ProjectSummary, ProjectUpdate};
pub use time_log::{NewTimeLog, TimeLogService, TimeLogUpdate};
