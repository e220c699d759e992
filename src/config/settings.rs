//! Business settings for Freelance CLI
//!
//! Holds the details printed on every invoice (business name and contact,
//! bank details, logo) together with billing defaults such as the currency,
//! the default tax rate and the invoice numbering strategy.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::paths::FreelancePaths;
use crate::billing::NumberingStrategy;
use crate::error::{FreelanceError, FreelanceResult};
use crate::storage::file_io::{read_json_required, write_json_atomic};
use crate::validation::{validate_image_file, validate_rate, ImageFile};

/// User settings for Freelance CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_business_name")]
    pub business_name: String,

    #[serde(default)]
    pub business_email: String,

    #[serde(default)]
    pub business_phone: String,

    #[serde(default)]
    pub business_address: String,

    /// Currency code printed next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Default tax rate in percent for new invoices
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,

    /// Footer note printed on invoices
    #[serde(default = "default_invoice_note")]
    pub invoice_note: String,

    #[serde(default)]
    pub bank_details: String,

    /// Logo embedded as a `data:` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(default)]
    pub numbering: NumberingStrategy,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_business_name() -> String {
    "My Business".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_tax_rate() -> Decimal {
    dec!(20)
}

fn default_invoice_note() -> String {
    "Thank you for your business!".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            business_name: default_business_name(),
            business_email: String::new(),
            business_phone: String::new(),
            business_address: String::new(),
            currency: default_currency(),
            tax_rate: default_tax_rate(),
            invoice_note: default_invoice_note(),
            bank_details: String::new(),
            logo: None,
            numbering: NumberingStrategy::default(),
            date_format: default_date_format(),
        }
    }
}

/// A partial settings change; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub business_name: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
    pub currency: Option<String>,
    pub tax_rate: Option<String>,
    pub invoice_note: Option<String>,
    pub bank_details: Option<String>,
    pub numbering: Option<NumberingStrategy>,
    pub date_format: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.business_name.is_none()
            && self.business_email.is_none()
            && self.business_phone.is_none()
            && self.business_address.is_none()
            && self.currency.is_none()
            && self.tax_rate.is_none()
            && self.invoice_note.is_none()
            && self.bank_details.is_none()
            && self.numbering.is_none()
            && self.date_format.is_none()
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if the file doesn't exist
    pub fn load_or_create(paths: &FreelancePaths) -> FreelanceResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            tracing::debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        read_json_required(&settings_path).map_err(|e| match e {
            FreelanceError::Storage(msg) => {
                FreelanceError::Config(format!("Failed to load settings: {}", msg))
            }
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FreelancePaths) -> FreelanceResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)?;
        tracing::debug!(path = %paths.settings_file().display(), "settings saved");
        Ok(())
    }

    /// Check the settings that invoices depend on
    pub fn validate(&self) -> FreelanceResult<()> {
        if self.business_name.trim().is_empty() {
            return Err(FreelanceError::InvalidInput(
                "Business name is required".into(),
            ));
        }

        validate_rate(self.tax_rate, Some("Tax rate"))?;

        if self.currency.trim().is_empty() {
            return Err(FreelanceError::InvalidInput("Currency is required".into()));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FreelanceError::InvalidInput(format!(
                "Invalid date format: '{}'",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Merge a partial update, leaving `self` unchanged if the result is invalid
    pub fn apply(&mut self, update: SettingsUpdate) -> FreelanceResult<()> {
        let mut next = self.clone();

        if let Some(name) = update.business_name {
            next.business_name = name.trim().to_string();
        }
        if let Some(email) = update.business_email {
            next.business_email = email;
        }
        if let Some(phone) = update.business_phone {
            next.business_phone = phone;
        }
        if let Some(address) = update.business_address {
            next.business_address = address;
        }
        if let Some(currency) = update.currency {
            next.currency = currency.trim().to_uppercase();
        }
        if let Some(rate) = update.tax_rate {
            next.tax_rate = validate_rate(rate.as_str(), Some("Tax rate"))?;
        }
        if let Some(note) = update.invoice_note {
            next.invoice_note = note;
        }
        if let Some(bank) = update.bank_details {
            next.bank_details = bank;
        }
        if let Some(numbering) = update.numbering {
            next.numbering = numbering;
        }
        if let Some(format) = update.date_format {
            next.date_format = format;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Embed an image file as the invoice logo
    pub fn set_logo_from_path(&mut self, path: &Path) -> FreelanceResult<()> {
        let image = ImageFile::from_path(path).map_err(|e| {
            FreelanceError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        validate_image_file(Some(&image))?;

        let bytes = std::fs::read(path)
            .map_err(|e| FreelanceError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        self.logo = Some(format!(
            "data:{};base64,{}",
            image.media_type,
            STANDARD.encode(bytes)
        ));
        Ok(())
    }

    pub fn clear_logo(&mut self) {
        self.logo = None;
    }

    /// Media type of the embedded logo, if any
    pub fn logo_media_type(&self) -> Option<&str> {
        self.logo
            .as_deref()?
            .strip_prefix("data:")?
            .split(';')
            .next()
    }
}
