//! Dashboard display formatting

use super::format::{format_bar, format_hours, format_money, separator};
use crate::models::{InvoiceStatus, Money};
use crate::services::dashboard::{ClientRevenue, DashboardSummary};

const WIDTH: usize = 48;
const BAR_WIDTH: usize = 20;

/// Format the business overview
pub fn format_dashboard(
    summary: &DashboardSummary,
    monthly_revenue: &[(String, Money)],
    status_counts: &[(InvoiceStatus, usize)],
    top_clients: &[ClientRevenue],
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str("Dashboard\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "  Revenue (paid):   {:>18}\n",
        format_money(summary.revenue, currency)
    ));
    output.push_str(&format!(
        "  Pending:          {:>18}\n",
        format_money(summary.pending, currency)
    ));
    output.push_str(&format!("  Overdue invoices: {:>18}\n", summary.overdue_count));
    output.push('\n');
    output.push_str(&format!("  Clients:          {:>18}\n", summary.client_count));
    output.push_str(&format!(
        "  Projects:         {:>18}\n",
        format!("{} ({} active)", summary.project_count, summary.active_project_count)
    ));
    output.push_str(&format!("  Invoices:         {:>18}\n", summary.invoice_count));
    output.push_str(&format!(
        "  Hours logged:     {:>18}\n",
        format_hours(summary.total_hours)
    ));

    if !monthly_revenue.is_empty() {
        let max = monthly_revenue
            .iter()
            .map(|(_, m)| m.amount())
            .max()
            .unwrap_or_default();

        output.push_str("\nRevenue by month\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for (month, revenue) in monthly_revenue {
            output.push_str(&format!(
                "  {}  {}  {}\n",
                month,
                format_bar(revenue.amount(), max, BAR_WIDTH),
                format_money(*revenue, currency)
            ));
        }
    }

    if !status_counts.is_empty() {
        output.push_str("\nInvoices by status\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for (status, count) in status_counts {
            output.push_str(&format!("  {:<26} {:>18}\n", status.to_string(), count));
        }
    }

    if !top_clients.is_empty() {
        output.push_str("\nTop clients\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for entry in top_clients {
            output.push_str(&format!(
                "  {:<26} {:>18}\n",
                entry.name,
                format_money(entry.revenue, currency)
            ));
        }
    }

    if !summary.recent_invoices.is_empty() {
        output.push_str("\nRecent invoices\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for invoice in &summary.recent_invoices {
            output.push_str(&format!(
                "  {:<10} {:<10} {:>24}\n",
                invoice.number,
                invoice.status.to_string(),
                format_money(invoice.total, currency)
            ));
        }
    }

    if !summary.recent_projects.is_empty() {
        output.push_str("\nRecent projects\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for project in &summary.recent_projects {
            output.push_str(&format!("  {:<32} {}\n", project.name, project.status));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientId;
    use rust_decimal_macros::dec;

    fn empty_summary() -> DashboardSummary {
        DashboardSummary {
            revenue: Money::new(dec!(960)),
            pending: Money::zero(),
            overdue_count: 1,
            client_count: 2,
            project_count: 3,
            active_project_count: 1,
            invoice_count: 4,
            total_hours: dec!(12.5),
            recent_projects: Vec::new(),
            recent_invoices: Vec::new(),
        }
    }

    #[test]
    fn test_format_dashboard() {
        let months = vec![
            ("2025-01".to_string(), Money::new(dec!(400))),
            ("2025-02".to_string(), Money::new(dec!(560))),
        ];
        let top = vec![ClientRevenue {
            client_id: ClientId::new(),
            name: "Ada".into(),
            revenue: Money::new(dec!(960)),
        }];

        let counts = vec![(InvoiceStatus::Paid, 2), (InvoiceStatus::Overdue, 1)];

        let output = format_dashboard(&empty_summary(), &months, &counts, &top, "EUR");

        assert!(output.contains("960.00 EUR"));
        assert!(output.contains("3 (1 active)"));
        assert!(output.contains("12.5h"));
        assert!(output.contains("2025-02"));
        assert!(output.contains("Top clients"));
        assert!(output.contains("Invoices by status"));
        assert!(!output.contains("Recent invoices"));
    }
}
