//! Invoice model
//!
//! An invoice owns its line items outright. Subtotal, tax and total are
//! derived values: they are only ever written through [`Invoice::apply_totals`]
//! with the output of the invoice calculator, which keeps
//! `total == round2(subtotal + tax)` for every stored invoice.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ClientId, InvoiceId};
use super::money::Money;
use crate::billing::{InvoiceTotals, Numbered};
use crate::validation::FieldValue;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn all() -> &'static [InvoiceStatus] {
        &[Self::Draft, Self::Sent, Self::Paid, Self::Overdue]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Money is still expected for this invoice
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Sent => write!(f, "Sent"),
            Self::Paid => write!(f, "Paid"),
            Self::Overdue => write!(f, "Overdue"),
        }
    }
}

/// One billable row of an invoice
///
/// Quantity and unit price keep the raw input so that invalid entries can be
/// reported with their position instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: FieldValue,
    pub unit_price: FieldValue,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<FieldValue>,
        unit_price: impl Into<FieldValue>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }

    /// Unrounded `quantity × unit price`, or `None` if either is not a number
    pub fn line_amount(&self) -> Option<Decimal> {
        Some(self.quantity.parse()? * self.unit_price.parse()?)
    }
}

/// A client invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,

    /// Sequential display number such as `INV-007`
    pub number: String,

    /// Billed client (weak reference)
    pub client_id: ClientId,

    pub items: Vec<LineItem>,

    /// Tax rate in percent used for the stored totals
    pub tax_rate: Decimal,

    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub notes: String,

    /// Set once at creation and never changed
    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Create a draft invoice with already computed totals
    pub fn new(
        number: impl Into<String>,
        client_id: ClientId,
        items: Vec<LineItem>,
        tax_rate: Decimal,
        totals: InvoiceTotals,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new(),
            number: number.into(),
            client_id,
            items,
            tax_rate,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
            due_date: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Store freshly calculated totals and the rate they used
    pub fn apply_totals(&mut self, totals: InvoiceTotals) {
        self.tax_rate = totals.tax_rate;
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.total = totals.total;
        self.updated_at = Utc::now();
    }

    /// The stored totals as a calculation result
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            tax_rate: self.tax_rate,
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
        }
    }

    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Due date has passed and the invoice is still unpaid
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status != InvoiceStatus::Paid && self.due_date.is_some_and(|due| due < today)
    }
}

impl Numbered for Invoice {
    fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.number, self.status, self.total)
    }
}
