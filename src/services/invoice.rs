//! Invoice service
//!
//! Creates and maintains invoices. Totals are never taken from the caller:
//! every create, and every update that touches the items or the tax rate,
//! runs the calculator again so stored totals always match the items.

use chrono::NaiveDate;

use crate::billing::{calculate_invoice_total, next_invoice_number_with};
use crate::config::Settings;
use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{ClientId, Invoice, InvoiceId, InvoiceStatus, LineItem};
use crate::storage::Storage;
use crate::validation::FieldValue;

use super::filter::InvoiceFilter;

/// Service for invoice management
pub struct InvoiceService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Input for a new invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub client_id: ClientId,
    pub items: Vec<LineItem>,
    /// Defaults to the tax rate from settings
    pub tax_rate: Option<FieldValue>,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

/// A partial invoice change; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct InvoiceUpdate {
    pub client_id: Option<ClientId>,
    pub items: Option<Vec<LineItem>>,
    pub tax_rate: Option<FieldValue>,
    pub due_date: Option<NaiveDate>,
    pub clear_due_date: bool,
    pub notes: Option<String>,
}

impl<'a> InvoiceService<'a> {
    /// Create a new invoice service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    fn ensure_client(&self, client_id: ClientId) -> FreelanceResult<()> {
        if self.storage.clients.get(client_id)?.is_none() {
            return Err(FreelanceError::client_not_found(client_id.to_string()));
        }
        Ok(())
    }

    /// The number the next created invoice will receive
    pub fn next_number(&self) -> FreelanceResult<String> {
        let invoices = self.storage.invoices.all()?;
        Ok(next_invoice_number_with(&invoices, self.settings.numbering))
    }

    /// Create a draft invoice with freshly computed totals
    pub fn create(&self, input: NewInvoice) -> FreelanceResult<Invoice> {
        let tax_rate = input
            .tax_rate
            .unwrap_or_else(|| FieldValue::from(self.settings.tax_rate));

        let totals = calculate_invoice_total(&input.items, &tax_rate).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected invoice");
        })?;

        self.ensure_client(input.client_id)?;

        let number = self.next_number()?;
        let mut invoice = Invoice::new(
            number,
            input.client_id,
            input.items,
            totals.tax_rate,
            totals,
        );
        invoice.due_date = input.due_date;
        invoice.notes = input.notes;

        self.storage.invoices.insert(invoice.clone())?;
        self.storage.invoices.save()?;

        tracing::info!(
            invoice = %invoice.id,
            number = %invoice.number,
            total = %invoice.total,
            "created invoice"
        );
        Ok(invoice)
    }

    /// Get an invoice by ID
    pub fn get(&self, id: InvoiceId) -> FreelanceResult<Option<Invoice>> {
        self.storage.invoices.get(id)
    }

    /// Find an invoice by number (case-insensitive) or by full or short ID
    pub fn find(&self, identifier: &str) -> FreelanceResult<Option<Invoice>> {
        let identifier = identifier.trim();

        if let Some(invoice) = self
            .storage
            .invoices
            .find(|i| i.number.eq_ignore_ascii_case(identifier))?
        {
            return Ok(Some(invoice));
        }

        self.storage.invoices.find(|i| i.id.matches(identifier))
    }

    /// Find an invoice or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FreelanceResult<Invoice> {
        self.find(identifier)?
            .ok_or_else(|| FreelanceError::invoice_not_found(identifier))
    }

    /// List invoices matching a filter, in creation order
    pub fn list(&self, filter: &InvoiceFilter) -> FreelanceResult<Vec<Invoice>> {
        self.storage.invoices.filter(|i| filter.matches(i))
    }

    /// All invoices billed to one client
    pub fn for_client(&self, client_id: ClientId) -> FreelanceResult<Vec<Invoice>> {
        self.storage.invoices.filter(|i| i.client_id == client_id)
    }

    /// Apply a partial update, recalculating totals when items or tax rate change
    pub fn update(&self, id: InvoiceId, changes: InvoiceUpdate) -> FreelanceResult<Invoice> {
        let mut invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| FreelanceError::invoice_not_found(id.to_string()))?;

        if changes.items.is_some() || changes.tax_rate.is_some() {
            let items = changes.items.unwrap_or_else(|| invoice.items.clone());
            let tax_rate = changes
                .tax_rate
                .unwrap_or_else(|| FieldValue::from(invoice.tax_rate));

            let totals = calculate_invoice_total(&items, &tax_rate).inspect_err(|e| {
                tracing::warn!(invoice = %invoice.number, error = %e, "rejected invoice update");
            })?;

            invoice.items = items;
            invoice.apply_totals(totals);
        }

        if let Some(client_id) = changes.client_id {
            self.ensure_client(client_id)?;
            invoice.client_id = client_id;
        }
        if changes.clear_due_date {
            invoice.due_date = None;
        } else if let Some(due) = changes.due_date {
            invoice.due_date = Some(due);
        }
        if let Some(notes) = changes.notes {
            invoice.notes = notes;
        }
        invoice.updated_at = chrono::Utc::now();

        self.storage.invoices.update(invoice.clone())?;
        self.storage.invoices.save()?;

        tracing::info!(invoice = %invoice.id, number = %invoice.number, "updated invoice");
        Ok(invoice)
    }

    /// Change the payment status of an invoice
    pub fn set_status(&self, id: InvoiceId, status: InvoiceStatus) -> FreelanceResult<Invoice> {
        let mut invoice = self
            .storage
            .invoices
            .get(id)?
            .ok_or_else(|| FreelanceError::invoice_not_found(id.to_string()))?;

        let previous = invoice.status;
        invoice.set_status(status);

        self.storage.invoices.update(invoice.clone())?;
        self.storage.invoices.save()?;

        tracing::info!(
            number = %invoice.number,
            from = %previous,
            to = %status,
            "changed invoice status"
        );
        Ok(invoice)
    }

    /// Record payment of an invoice
    pub fn mark_paid(&self, id: InvoiceId) -> FreelanceResult<Invoice> {
        self.set_status(id, InvoiceStatus::Paid)
    }

    /// Flag sent invoices whose due date has passed as overdue
    pub fn flag_overdue(&self, today: NaiveDate) -> FreelanceResult<Vec<Invoice>> {
        let due = self
            .storage
            .invoices
            .filter(|i| i.status == InvoiceStatus::Sent && i.is_past_due(today))?;

        let mut flagged = Vec::with_capacity(due.len());
        for mut invoice in due {
            invoice.set_status(InvoiceStatus::Overdue);
            self.storage.invoices.update(invoice.clone())?;
            flagged.push(invoice);
        }

        if !flagged.is_empty() {
            self.storage.invoices.save()?;
            tracing::info!(count = flagged.len(), "flagged overdue invoices");
        }
        Ok(flagged)
    }

    /// Delete an invoice
    pub fn delete(&self, id: InvoiceId) -> FreelanceResult<Invoice> {
        let invoice = self
            .storage
            .invoices
            .remove(id)?
            .ok_or_else(|| FreelanceError::invoice_not_found(id.to_string()))?;
        self.storage.invoices.save()?;

        tracing::info!(number = %invoice.number, "deleted invoice");
        Ok(invoice)
    }

    pub fn count(&self) -> FreelanceResult<usize> {
        self.storage.invoices.count()
    }
}
