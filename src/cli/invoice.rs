//! Invoice CLI commands
//!
//! Implements CLI commands for creating, listing, printing and settling invoices.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use super::{parse_date, parse_optional_date};
use crate::config::Settings;
use crate::display::format::format_money;
use crate::display::{format_invoice_details, format_invoice_list, render_invoice_document};
use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{ClientId, Invoice, InvoiceStatus, LineItem};
use crate::services::{ClientService, InvoiceFilter, InvoiceService, InvoiceUpdate, NewInvoice};
use crate::storage::Storage;
use crate::validation::FieldValue;

/// Invoice subcommands
#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Create a draft invoice
    Create {
        /// Client name or ID
        client: String,
        /// Line item as DESCRIPTION:QUANTITY:UNIT_PRICE (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Tax rate in percent (defaults to the configured rate)
        #[arg(short, long)]
        tax_rate: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
        /// Notes printed on the invoice
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List invoices
    List {
        /// Only show invoices with this status (draft, sent, paid, overdue)
        #[arg(short, long)]
        status: Option<String>,
        /// Only show invoices for this client (name or ID)
        #[arg(short, long)]
        client: Option<String>,
        /// Only show invoices created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only show invoices created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only show invoices whose number or notes contain this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show invoice details
    Show {
        /// Invoice number or ID
        invoice: String,
    },
    /// Render a printable invoice
    Print {
        /// Invoice number or ID
        invoice: String,
        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Edit an invoice
    Edit {
        /// Invoice number or ID
        invoice: String,
        /// New client (name or ID)
        #[arg(short, long)]
        client: Option<String>,
        /// Replacement line items as DESCRIPTION:QUANTITY:UNIT_PRICE (repeatable)
        #[arg(short, long = "item")]
        items: Vec<String>,
        /// New tax rate in percent
        #[arg(short, long)]
        tax_rate: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Change an invoice's status
    Status {
        /// Invoice number or ID
        invoice: String,
        /// New status (draft, sent, paid, overdue)
        status: String,
    },
    /// Mark an invoice as paid
    Pay {
        /// Invoice number or ID
        invoice: String,
    },
    /// Delete an invoice
    Delete {
        /// Invoice number or ID
        invoice: String,
    },
    /// Show the number the next invoice will receive
    NextNumber,
    /// Flag sent invoices past their due date as overdue
    Overdue {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Parse a `DESCRIPTION:QUANTITY:UNIT_PRICE` argument
///
/// The description may itself contain colons; quantity and price are taken
/// from the right. Numbers are left unchecked here so validation can report
/// them against the item's position.
pub fn parse_line_item(input: &str) -> FreelanceResult<LineItem> {
    let mut parts = input.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(description)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FreelanceError::InvalidInput(format!(
            "Line item must look like DESCRIPTION:QUANTITY:UNIT_PRICE, got '{}'",
            input
        )));
    };

    Ok(LineItem::new(
        description.trim(),
        FieldValue::from(quantity.trim()).normalized(),
        FieldValue::from(price.trim()).normalized(),
    ))
}

fn parse_items(inputs: &[String]) -> FreelanceResult<Vec<LineItem>> {
    inputs.iter().map(|i| parse_line_item(i)).collect()
}

fn parse_status(input: &str) -> FreelanceResult<InvoiceStatus> {
    InvoiceStatus::parse(input).ok_or_else(|| {
        FreelanceError::InvalidInput(format!(
            "Invalid invoice status: '{}'. Valid statuses: draft, sent, paid, overdue",
            input
        ))
    })
}

fn resolve_client(storage: &Storage, client: Option<&str>) -> FreelanceResult<Option<ClientId>> {
    match client {
        Some(identifier) => Ok(Some(ClientService::new(storage).require(identifier)?.id)),
        None => Ok(None),
    }
}

fn client_names(storage: &Storage) -> FreelanceResult<HashMap<ClientId, String>> {
    Ok(storage
        .clients
        .all()?
        .into_iter()
        .map(|c| (c.id, c.display_name()))
        .collect())
}

fn print_summary(verb: &str, invoice: &Invoice, settings: &Settings) {
    println!("{} invoice {}", verb, invoice.number);
    println!("  Status: {}", invoice.status);
    println!("  Total:  {}", format_money(invoice.total, &settings.currency));
}

/// Handle an invoice command
pub fn handle_invoice_command(
    storage: &Storage,
    settings: &Settings,
    cmd: InvoiceCommands,
) -> FreelanceResult<()> {
    let service = InvoiceService::new(storage, settings);

    match cmd {
        InvoiceCommands::Create {
            client,
            items,
            tax_rate,
            due,
            notes,
        } => {
            let client = ClientService::new(storage).require(&client)?;
            let invoice = service.create(NewInvoice {
                client_id: client.id,
                items: parse_items(&items)?,
                tax_rate: tax_rate.map(|t| FieldValue::from(t).normalized()),
                due_date: parse_optional_date(due.as_deref())?,
                notes,
            })?;

            print_summary("Created", &invoice, settings);
            println!("  Client: {}", client.display_name());
            println!(
                "  Subtotal: {}  Tax: {}",
                format_money(invoice.subtotal, &settings.currency),
                format_money(invoice.tax, &settings.currency)
            );
        }

        InvoiceCommands::List {
            status,
            client,
            from,
            to,
            search,
        } => {
            let filter = InvoiceFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                client_id: resolve_client(storage, client.as_deref())?,
                date_from: parse_optional_date(from.as_deref())?,
                date_to: parse_optional_date(to.as_deref())?,
                search,
            };
            let invoices = service.list(&filter)?;
            println!(
                "{}",
                format_invoice_list(&invoices, &client_names(storage)?, settings)
            );
        }

        InvoiceCommands::Show { invoice } => {
            let found = service.require(&invoice)?;
            let client = storage.clients.get(found.client_id)?;
            print!(
                "{}",
                format_invoice_details(&found, client.as_ref(), settings)
            );
        }

        InvoiceCommands::Print { invoice, output } => {
            let found = service.require(&invoice)?;
            let client = storage.clients.get(found.client_id)?;
            let document = render_invoice_document(&found, client.as_ref(), settings);

            match output {
                Some(path) => {
                    fs::write(&path, &document).map_err(|e| {
                        FreelanceError::Export(format!(
                            "Failed to write {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    tracing::info!(number = %found.number, path = %path.display(), "wrote invoice document");
                    println!("Wrote invoice {} to {}", found.number, path.display());
                }
                None => print!("{}", document),
            }
        }

        InvoiceCommands::Edit {
            invoice,
            client,
            items,
            tax_rate,
            due,
            clear_due,
            notes,
        } => {
            let found = service.require(&invoice)?;
            let changes = InvoiceUpdate {
                client_id: resolve_client(storage, client.as_deref())?,
                items: if items.is_empty() {
                    None
                } else {
                    Some(parse_items(&items)?)
                },
                tax_rate: tax_rate.map(|t| FieldValue::from(t).normalized()),
                due_date: parse_optional_date(due.as_deref())?,
                clear_due_date: clear_due,
                notes,
            };

            let updated = service.update(found.id, changes)?;
            print_summary("Updated", &updated, settings);
        }

        InvoiceCommands::Status { invoice, status } => {
            let found = service.require(&invoice)?;
            let updated = service.set_status(found.id, parse_status(&status)?)?;
            println!("Invoice {} is now {}", updated.number, updated.status);
        }

        InvoiceCommands::Pay { invoice } => {
            let found = service.require(&invoice)?;
            let paid = service.mark_paid(found.id)?;
            println!(
                "Invoice {} marked as paid ({})",
                paid.number,
                format_money(paid.total, &settings.currency)
            );
        }

        InvoiceCommands::Delete { invoice } => {
            let found = service.require(&invoice)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted invoice {}", deleted.number);
        }

        InvoiceCommands::NextNumber => {
            println!("{}", service.next_number()?);
        }

        InvoiceCommands::Overdue { date } => {
            let today = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };
            let flagged = service.flag_overdue(today)?;

            if flagged.is_empty() {
                println!("No invoices are overdue.");
            } else {
                for invoice in &flagged {
                    println!(
                        "Flagged {} as overdue ({})",
                        invoice.number,
                        format_money(invoice.total, &settings.currency)
                    );
                }
            }
        }
    }

    Ok(())
}
