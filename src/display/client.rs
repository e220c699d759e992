//! Client display formatting
//!
//! Formats clients for terminal output in table and detail views.

use tabled::Tabled;

use super::format::{format_money, truncate};
use super::render_table;
use crate::services::client::ClientSummary;

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Projects")]
    projects: usize,
    #[tabled(rename = "Invoices")]
    invoices: usize,
    #[tabled(rename = "Invoiced")]
    invoiced: String,
}

/// Format a list of clients with their billing figures as a table
pub fn format_client_list(summaries: &[ClientSummary], currency: &str) -> String {
    if summaries.is_empty() {
        return "No clients found.".to_string();
    }

    let rows = summaries
        .iter()
        .map(|s| ClientRow {
            id: s.client.id.to_string(),
            name: truncate(&s.client.name, 30),
            company: truncate(&s.client.company, 24),
            email: s.client.email.clone(),
            projects: s.project_count,
            invoices: s.invoice_count,
            invoiced: format_money(s.total_invoiced, currency),
        })
        .collect();

    render_table(rows, 4)
}

/// Format a single client's details
pub fn format_client_details(summary: &ClientSummary, currency: &str) -> String {
    let client = &summary.client;
    let mut output = String::new();

    output.push_str(&format!("Client: {}\n", client.name));
    output.push_str(&format!("  ID:        {}\n", client.id));
    if !client.company.is_empty() {
        output.push_str(&format!("  Company:   {}\n", client.company));
    }
    if !client.email.is_empty() {
        output.push_str(&format!("  Email:     {}\n", client.email));
    }
    if !client.phone.is_empty() {
        output.push_str(&format!("  Phone:     {}\n", client.phone));
    }
    if !client.address.is_empty() {
        output.push_str("  Address:\n");
        for line in client.address.lines() {
            output.push_str(&format!("    {}\n", line));
        }
    }

    output.push('\n');
    output.push_str(&format!("  Projects:  {}\n", summary.project_count));
    output.push_str(&format!("  Invoices:  {}\n", summary.invoice_count));
    output.push_str(&format!(
        "  Invoiced:  {}\n",
        format_money(summary.total_invoiced, currency)
    ));

    if !client.notes.is_empty() {
        output.push('\n');
        output.push_str(&format!("  Notes: {}\n", client.notes));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:   {}\n",
        client.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Money};
    use rust_decimal_macros::dec;

    fn summary(name: &str, company: &str) -> ClientSummary {
        let mut client = Client::new(name);
        client.company = company.into();
        ClientSummary {
            client,
            project_count: 2,
            invoice_count: 3,
            total_invoiced: Money::new(dec!(1250)),
        }
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_client_list(&[], "EUR"), "No clients found.");
    }

    #[test]
    fn test_format_client_list() {
        let output = format_client_list(&[summary("Ada", "Engines Ltd")], "EUR");

        assert!(output.contains("Name"));
        assert!(output.contains("Ada"));
        assert!(output.contains("Engines Ltd"));
        assert!(output.contains("1250.00 EUR"));
    }

    #[test]
    fn test_format_client_details() {
        let mut s = summary("Ada", "");
        s.client.address = "1 Main St\nLondon".into();
        let output = format_client_details(&s, "EUR");

        assert!(output.contains("Client: Ada"));
        assert!(!output.contains("Company:"));
        assert!(output.contains("    London"));
        assert!(output.contains("Invoices:  3"));
    }
}
