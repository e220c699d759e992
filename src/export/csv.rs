//! CSV Export functionality
//!
//! Exports invoices to CSV, one row per invoice.

use std::collections::HashMap;
use std::io::Write;

use crate::config::Settings;
use crate::error::FreelanceResult;
use crate::storage::Storage;

const INVOICE_HEADER: [&str; 12] = [
    "Number",
    "Client",
    "Created",
    "Due Date",
    "Status",
    "Items",
    "Tax Rate",
    "Subtotal",
    "Tax",
    "Total",
    "Currency",
    "Notes",
];

/// Export all invoices to CSV in creation order
pub fn export_invoices_csv<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: W,
) -> FreelanceResult<usize> {
    let client_names: HashMap<_, _> = storage
        .clients
        .all()?
        .into_iter()
        .map(|c| (c.id, c.display_name()))
        .collect();

    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(INVOICE_HEADER)?;

    let invoices = storage.invoices.all()?;
    for invoice in &invoices {
        let client = client_names
            .get(&invoice.client_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());

        out.write_record([
            invoice.number.clone(),
            client,
            invoice.created_at.date_naive().to_string(),
            invoice.due_date.map(|d| d.to_string()).unwrap_or_default(),
            invoice.status.to_string(),
            invoice.items.len().to_string(),
            invoice.tax_rate.normalize().to_string(),
            invoice.subtotal.to_string(),
            invoice.tax.to_string(),
            invoice.total.to_string(),
            settings.currency.clone(),
            invoice.notes.clone(),
        ])?;
    }

    out.flush()?;
    tracing::info!(rows = invoices.len(), "exported invoices to CSV");
    Ok(invoices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::calculate_invoice_total;
    use crate::config::paths::FreelancePaths;
    use crate::models::{Client, ClientId, Invoice, LineItem};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FreelancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_invoices_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let client = Client::new("Ada");
        storage.clients.insert(client.clone()).unwrap();

        let items = vec![
            LineItem::new("Design", 2, 150),
            LineItem::new("Dev", 5, 100),
        ];
        let totals = calculate_invoice_total(&items, dec!(20)).unwrap();
        let mut invoice = Invoice::new("INV-001", client.id, items, dec!(20), totals);
        invoice.notes = "Phase one, design".into();
        storage.invoices.insert(invoice).unwrap();

        let mut output = Vec::new();
        let rows = export_invoices_csv(&storage, &Settings::default(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(rows, 1);
        assert_eq!(lines[0], INVOICE_HEADER.join(","));
        assert!(lines[1].starts_with("INV-001,Ada,"));
        assert!(lines[1].contains(",Draft,2,20,800.00,160.00,960.00,EUR,"));
        assert!(lines[1].ends_with("\"Phase one, design\""));
    }

    #[test]
    fn test_unknown_client() {
        let (_temp_dir, storage) = create_test_storage();
        let items = vec![LineItem::new("Work", 1, 10)];
        let totals = calculate_invoice_total(&items, 0).unwrap();
        storage
            .invoices
            .insert(Invoice::new("INV-001", ClientId::new(), items, dec!(0), totals))
            .unwrap();

        let mut output = Vec::new();
        export_invoices_csv(&storage, &Settings::default(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("INV-001,Unknown,"));
    }
}
