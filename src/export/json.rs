//! JSON Export functionality
//!
//! Exports every collection to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{Client, Invoice, Money, Project, TimeLog};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub business: BusinessSummary,

    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub time_logs: Vec<TimeLog>,
    pub invoices: Vec<Invoice>,

    pub metadata: ExportMetadata,
}

/// The settings needed to read the exported amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub name: String,
    pub currency: String,
    pub tax_rate: Decimal,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub client_count: usize,
    pub project_count: usize,
    pub time_log_count: usize,
    pub invoice_count: usize,

    /// Sum of all invoice totals
    pub total_invoiced: Money,

    /// Creation date of the oldest invoice
    pub earliest_invoice: Option<String>,

    /// Creation date of the newest invoice
    pub latest_invoice: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage, settings: &Settings) -> FreelanceResult<Self> {
        let clients = storage.clients.all()?;
        let projects = storage.projects.all()?;
        let time_logs = storage.time_logs.all()?;
        let invoices = storage.invoices.all()?;

        let earliest_invoice = invoices
            .iter()
            .map(|i| i.created_at.date_naive())
            .min()
            .map(|d| d.to_string());
        let latest_invoice = invoices
            .iter()
            .map(|i| i.created_at.date_naive())
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            client_count: clients.len(),
            project_count: projects.len(),
            time_log_count: time_logs.len(),
            invoice_count: invoices.len(),
            total_invoiced: invoices.iter().map(|i| i.total).sum(),
            earliest_invoice,
            latest_invoice,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            business: BusinessSummary {
                name: settings.business_name.clone(),
                currency: settings.currency.clone(),
                tax_rate: settings.tax_rate,
            },
            clients,
            projects,
            time_logs,
            invoices,
            metadata,
        })
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
    pretty: bool,
) -> FreelanceResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FreelanceError::Export(e.to_string()))?;

    tracing::info!(
        invoices = export.metadata.invoice_count,
        clients = export.metadata.client_count,
        "exported JSON"
    );
    Ok(())
}
