//! Invoice display formatting
//!
//! List and detail views, plus the printable plain-text invoice document.

use std::collections::HashMap;

use tabled::Tabled;

use super::format::{
    double_separator, format_date, format_header, format_money, format_rate, separator, truncate,
};
use super::render_table;
use crate::config::Settings;
use crate::models::{round2, Client, ClientId, Invoice, LineItem};

/// Width of the printable document
const DOCUMENT_WIDTH: usize = 64;

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn client_label(names: &HashMap<ClientId, String>, id: ClientId) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("(deleted {})", id))
}

/// Format a list of invoices as a table
pub fn format_invoice_list(
    invoices: &[Invoice],
    client_names: &HashMap<ClientId, String>,
    settings: &Settings,
) -> String {
    if invoices.is_empty() {
        return "No invoices found.".to_string();
    }

    let rows = invoices
        .iter()
        .map(|invoice| InvoiceRow {
            number: invoice.number.clone(),
            client: truncate(&client_label(client_names, invoice.client_id), 40),
            date: format_date(invoice.created_at.date_naive(), &settings.date_format),
            due: invoice
                .due_date
                .map(|d| format_date(d, &settings.date_format))
                .unwrap_or_else(|| "-".to_string()),
            status: invoice.status.to_string(),
            total: format_money(invoice.total, &settings.currency),
        })
        .collect();

    render_table(rows, 5)
}

fn item_rows(items: &[LineItem], currency: &str) -> Vec<ItemRow> {
    items
        .iter()
        .map(|item| ItemRow {
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            unit_price: item
                .unit_price
                .parse()
                .map(|p| format!("{:.2}", round2(p)))
                .unwrap_or_else(|| item.unit_price.to_string()),
            amount: item
                .line_amount()
                .map(|a| format!("{:.2} {}", round2(a), currency))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn totals_block(invoice: &Invoice, currency: &str) -> String {
    let lines = [
        ("Subtotal".to_string(), format_money(invoice.subtotal, currency)),
        (
            format!("Tax ({})", format_rate(invoice.tax_rate)),
            format_money(invoice.tax, currency),
        ),
        ("Total".to_string(), format_money(invoice.total, currency)),
    ];

    let mut output = String::new();
    for (label, value) in lines {
        output.push_str(&format!(
            "{:>width$}\n",
            format!("{}: {:>16}", label, value),
            width = DOCUMENT_WIDTH
        ));
    }
    output
}

/// Format a single invoice's details
pub fn format_invoice_details(invoice: &Invoice, client: Option<&Client>, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", invoice.number));
    output.push_str(&format!("  ID:      {}\n", invoice.id));
    output.push_str(&format!(
        "  Client:  {}\n",
        client
            .map(|c| c.display_name())
            .unwrap_or_else(|| format!("(deleted {})", invoice.client_id))
    ));
    output.push_str(&format!("  Status:  {}\n", invoice.status));
    output.push_str(&format!(
        "  Date:    {}\n",
        format_date(invoice.created_at.date_naive(), &settings.date_format)
    ));
    if let Some(due) = invoice.due_date {
        output.push_str(&format!("  Due:     {}\n", format_date(due, &settings.date_format)));
    }
    output.push('\n');
    output.push_str(&render_table(item_rows(&invoice.items, &settings.currency), 1));
    output.push('\n');
    output.push_str(&totals_block(invoice, &settings.currency));

    if !invoice.notes.is_empty() {
        output.push('\n');
        output.push_str(&format!("  Notes: {}\n", invoice.notes));
    }

    output
}

/// Render a printable invoice document
pub fn render_invoice_document(invoice: &Invoice, client: Option<&Client>, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&double_separator(DOCUMENT_WIDTH));
    output.push('\n');
    output.push_str(&settings.business_name);
    output.push('\n');
    for line in settings.business_address.lines() {
        output.push_str(line);
        output.push('\n');
    }
    if !settings.business_email.is_empty() {
        output.push_str(&format!("Email: {}\n", settings.business_email));
    }
    if !settings.business_phone.is_empty() {
        output.push_str(&format!("Phone: {}\n", settings.business_phone));
    }
    if let Some(media_type) = settings.logo_media_type() {
        output.push_str(&format!("[logo: {}]\n", media_type));
    }
    output.push_str(&double_separator(DOCUMENT_WIDTH));
    output.push_str("\n\n");

    output.push_str(&format_header(
        &format!("INVOICE {}", invoice.number),
        DOCUMENT_WIDTH,
    ));
    output.push_str("\n\n");
    output.push_str(&format!(
        "Date:      {}\n",
        format_date(invoice.created_at.date_naive(), &settings.date_format)
    ));
    if let Some(due) = invoice.due_date {
        output.push_str(&format!("Due date:  {}\n", format_date(due, &settings.date_format)));
    }
    output.push_str(&format!("Status:    {}\n\n", invoice.status));

    output.push_str("Bill to:\n");
    match client {
        Some(client) => {
            output.push_str(&format!("  {}\n", client.name));
            if !client.company.is_empty() {
                output.push_str(&format!("  {}\n", client.company));
            }
            for line in client.address.lines() {
                output.push_str(&format!("  {}\n", line));
            }
            if !client.email.is_empty() {
                output.push_str(&format!("  {}\n", client.email));
            }
        }
        None => output.push_str("  (unknown client)\n"),
    }
    output.push('\n');

    output.push_str(&render_table(item_rows(&invoice.items, &settings.currency), 1));
    output.push('\n');
    output.push_str(&separator(DOCUMENT_WIDTH));
    output.push('\n');
    output.push_str(&totals_block(invoice, &settings.currency));

    if !invoice.notes.is_empty() {
        output.push_str("\nNotes:\n");
        for line in invoice.notes.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    if !settings.bank_details.is_empty() {
        output.push_str("\nPayment details:\n");
        for line in settings.bank_details.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    if !settings.invoice_note.is_empty() {
        output.push('\n');
        output.push_str(&format_header(&settings.invoice_note, DOCUMENT_WIDTH));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::calculate_invoice_total;
    use rust_decimal_macros::dec;

    fn sample() -> (Invoice, Client) {
        let mut client = Client::new("Ada Lovelace");
        client.company = "Analytical Engines".into();
        client.address = "12 St James's Square\nLondon".into();

        let items = vec![
            LineItem::new("Design", 2, 150),
            LineItem::new("Dev", 5, 100),
        ];
        let totals = calculate_invoice_total(&items, dec!(20)).unwrap();
        let mut invoice = Invoice::new("INV-001", client.id, items, dec!(20), totals);
        invoice.notes = "Phase one".into();
        (invoice, client)
    }

    #[test]
    fn test_render_invoice_document() {
        let (invoice, client) = sample();
        let mut settings = Settings::default();
        settings.business_name = "Studio Nine".into();
        settings.bank_details = "IBAN DE00 0000".into();

        let doc = render_invoice_document(&invoice, Some(&client), &settings);

        assert!(doc.contains("Studio Nine"));
        assert!(doc.contains("INVOICE INV-001"));
        assert!(doc.contains("Bill to:"));
        assert!(doc.contains("  Analytical Engines"));
        assert!(doc.contains("  London"));
        assert!(doc.contains("300.00 EUR"));
        assert!(doc.contains("Subtotal:       800.00 EUR"));
        assert!(doc.contains("Tax (20%):"));
        assert!(doc.contains("160.00 EUR"));
        assert!(doc.contains("Total:       960.00 EUR"));
        assert!(doc.contains("IBAN DE00 0000"));
        assert!(doc.contains("Thank you for your business!"));
    }

    #[test]
    fn test_render_with_deleted_client() {
        let (invoice, _client) = sample();
        let doc = render_invoice_document(&invoice, None, &Settings::default());
        assert!(doc.contains("(unknown client)"));
    }

    #[test]
    fn test_format_invoice_list() {
        let (invoice, client) = sample();
        let mut names = HashMap::new();
        names.insert(client.id, client.display_name());

        let output = format_invoice_list(&[invoice], &names, &Settings::default());
        assert!(output.contains("INV-001"));
        assert!(output.contains("Ada Lovelace (Analytical Engines)"));
        assert!(output.contains("Draft"));
        assert!(output.contains("960.00 EUR"));
        assert_eq!(
            format_invoice_list(&[], &names, &Settings::default()),
            "No invoices found."
        );
    }

    #[test]
    fn test_format_invoice_details() {
        let (invoice, client) = sample();
        let output = format_invoice_details(&invoice, Some(&client), &Settings::default());
        assert!(output.contains("Invoice: INV-001"));
        assert!(output.contains("Notes: Phase one"));
        assert!(!output.contains("Due:"));
    }
}
