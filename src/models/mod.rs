//! Core data models for Freelance CLI
//!
//! Clients, projects, time entries and invoices, plus the typed identifiers
//! and the cent-rounded money type they share.

pub mod client;
pub mod ids;
pub mod invoice;
pub mod money;
pub mod project;
pub mod time_log;

pub use client::Client;
pub use ids::{ClientId, InvoiceId, ProjectId, TimeLogId};
pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use money::{round2, Money};
pub use project::{Project, ProjectStatus};
pub use time_log::{TaskType, TimeLog};
