//! Dashboard service
//!
//! Business overview: revenue, outstanding amounts, activity counts and the
//! most recent work.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::FreelanceResult;
use crate::models::{ClientId, Invoice, InvoiceStatus, Money, Project, ProjectStatus};
use crate::storage::Storage;

/// Number of recent projects and invoices shown
pub const RECENT_LIMIT: usize = 5;

/// Number of clients in the top-clients ranking
pub const TOP_CLIENTS_LIMIT: usize = 5;

/// Service for the business overview
pub struct DashboardService<'a> {
    storage: &'a Storage,
}

/// Paid revenue attributed to one client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRevenue {
    pub client_id: ClientId,
    pub name: String,
    pub revenue: Money,
}

/// Snapshot of the business
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// Sum of paid invoice totals
    pub revenue: Money,
    /// Sum of draft and sent invoice totals
    pub pending: Money,
    pub overdue_count: usize,
    pub client_count: usize,
    pub project_count: usize,
    pub active_project_count: usize,
    pub invoice_count: usize,
    pub total_hours: Decimal,
    /// Most recently created projects, newest first
    pub recent_projects: Vec<Project>,
    /// Most recently created invoices, newest first
    pub recent_invoices: Vec<Invoice>,
}

impl<'a> DashboardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn summary(&self) -> FreelanceResult<DashboardSummary> {
        let invoices = self.storage.invoices.all()?;
        let projects = self.storage.projects.all()?;

        let revenue = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .map(|i| i.total)
            .sum();
        let pending = invoices
            .iter()
            .filter(|i| i.status.is_outstanding())
            .map(|i| i.total)
            .sum();
        let overdue_count = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Overdue)
            .count();
        let active_project_count = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count();
        let total_hours = self
            .storage
            .time_logs
            .all()?
            .iter()
            .map(|l| l.hours)
            .sum();

        Ok(DashboardSummary {
            revenue,
            pending,
            overdue_count,
            client_count: self.storage.clients.count()?,
            project_count: projects.len(),
            active_project_count,
            invoice_count: invoices.len(),
            total_hours,
            recent_projects: projects.iter().rev().take(RECENT_LIMIT).cloned().collect(),
            recent_invoices: invoices.iter().rev().take(RECENT_LIMIT).cloned().collect(),
        })
    }

    /// Paid revenue per calendar month (`YYYY-MM`), oldest first
    pub fn monthly_revenue(&self) -> FreelanceResult<Vec<(String, Money)>> {
        let mut months: BTreeMap<String, Money> = BTreeMap::new();

        for invoice in self
            .storage
            .invoices
            .filter(|i| i.status == InvoiceStatus::Paid)?
        {
            let key = invoice.created_at.format("%Y-%m").to_string();
            *months.entry(key).or_default() += invoice.total;
        }

        Ok(months.into_iter().collect())
    }

    /// Invoice count per status, skipping statuses with no invoices
    pub fn invoice_status_counts(&self) -> FreelanceResult<Vec<(InvoiceStatus, usize)>> {
        let invoices = self.storage.invoices.all()?;

        Ok(InvoiceStatus::all()
            .iter()
            .map(|status| (*status, invoices.iter().filter(|i| i.status == *status).count()))
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    /// Clients ranked by paid revenue, highest first
    pub fn top_clients(&self) -> FreelanceResult<Vec<ClientRevenue>> {
        let mut ranking: Vec<ClientRevenue> = Vec::new();

        for invoice in self
            .storage
            .invoices
            .filter(|i| i.status == InvoiceStatus::Paid)?
        {
            match ranking.iter_mut().find(|r| r.client_id == invoice.client_id) {
                Some(entry) => entry.revenue += invoice.total,
                None => ranking.push(ClientRevenue {
                    client_id: invoice.client_id,
                    name: String::new(),
                    revenue: invoice.total,
                }),
            }
        }

        for entry in &mut ranking {
            entry.name = self
                .storage
                .clients
                .get(entry.client_id)?
                .map(|c| c.display_name())
                .unwrap_or_else(|| "Unknown".to_string());
        }

        ranking.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        ranking.truncate(TOP_CLIENTS_LIMIT);
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::calculate_invoice_total;
    use crate::config::paths::FreelancePaths;
    use crate::models::{Client, LineItem};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FreelancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_invoice(
        storage: &Storage,
        client_id: ClientId,
        price: i64,
        status: InvoiceStatus,
        month: u32,
    ) {
        let items = vec![LineItem::new("Work", 1, price)];
        let totals = calculate_invoice_total(&items, 0).unwrap();
        let mut invoice = Invoice::new("INV", client_id, items, dec!(0), totals);
        invoice.status = status;
        invoice.created_at = Utc.with_ymd_and_hms(2025, month, 10, 12, 0, 0).unwrap();
        storage.invoices.insert(invoice).unwrap();
    }

    #[test]
    fn test_empty_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let summary = DashboardService::new(&storage).summary().unwrap();

        assert!(summary.revenue.is_zero());
        assert!(summary.pending.is_zero());
        assert_eq!(summary.invoice_count, 0);
        assert!(summary.recent_invoices.is_empty());
    }

    #[test]
    fn test_revenue_and_pending() {
        let (_temp_dir, storage) = create_test_storage();
        let client = ClientId::new();
        add_invoice(&storage, client, 100, InvoiceStatus::Paid, 1);
        add_invoice(&storage, client, 40, InvoiceStatus::Draft, 1);
        add_invoice(&storage, client, 60, InvoiceStatus::Sent, 2);
        add_invoice(&storage, client, 500, InvoiceStatus::Overdue, 2);

        let summary = DashboardService::new(&storage).summary().unwrap();

        assert_eq!(summary.revenue, Money::new(dec!(100)));
        assert_eq!(summary.pending, Money::new(dec!(100)));
        assert_eq!(summary.overdue_count, 1);
        assert_eq!(summary.recent_invoices[0].total, Money::new(dec!(500)));
    }

    #[test]
    fn test_monthly_revenue() {
        let (_temp_dir, storage) = create_test_storage();
        let client = ClientId::new();
        add_invoice(&storage, client, 200, InvoiceStatus::Paid, 3);
        add_invoice(&storage, client, 100, InvoiceStatus::Paid, 1);
        add_invoice(&storage, client, 50, InvoiceStatus::Paid, 1);
        add_invoice(&storage, client, 999, InvoiceStatus::Sent, 2);

        let months = DashboardService::new(&storage).monthly_revenue().unwrap();
        assert_eq!(
            months,
            vec![
                ("2025-01".to_string(), Money::new(dec!(150))),
                ("2025-03".to_string(), Money::new(dec!(200))),
            ]
        );
    }

    #[test]
    fn test_top_clients() {
        let (_temp_dir, storage) = create_test_storage();
        let ada = Client::new("Ada");
        let ada_id = ada.id;
        storage.clients.insert(ada).unwrap();
        let removed = ClientId::new();

        add_invoice(&storage, ada_id, 100, InvoiceStatus::Paid, 1);
        add_invoice(&storage, removed, 300, InvoiceStatus::Paid, 1);
        add_invoice(&storage, ada_id, 50, InvoiceStatus::Paid, 2);

        let top = DashboardService::new(&storage).top_clients().unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Unknown");
        assert_eq!(top[1].name, "Ada");
        assert_eq!(top[1].revenue, Money::new(dec!(150)));
    }

    #[test]
    fn test_status_counts() {
        let (_temp_dir, storage) = create_test_storage();
        let client = ClientId::new();
        add_invoice(&storage, client, 10, InvoiceStatus::Draft, 1);
        add_invoice(&storage, client, 10, InvoiceStatus::Draft, 1);
        add_invoice(&storage, client, 10, InvoiceStatus::Paid, 1);

        let counts = DashboardService::new(&storage)
            .invoice_status_counts()
            .unwrap();
        assert_eq!(
            counts,
            vec![(InvoiceStatus::Draft, 2), (InvoiceStatus::Paid, 1)]
        );
    }
}
