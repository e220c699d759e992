//! Input validation for business fields
//!
//! Every form-facing number (amounts, quantities, tax rates, hours) passes
//! through this module before it reaches the invoice calculator or storage.
//! Values may arrive as text from the command line or from persisted JSON, so
//! each validator accepts a [`FieldValue`] and parses it at the boundary.
//!
//! Validators are pure: no I/O, no logging, no shared state. A successful
//! numeric validation returns the parsed [`Decimal`] so callers never have to
//! parse the same input twice.
//!
//! ## Bounds
//!
//! | Field    | Minimum | Maximum    |
//! |----------|---------|------------|
//! | amount   | 0.01    | 999999.99  |
//! | quantity | 0.01    | 99999      |
//! | rate     | 0       | 100        |
//! | hours    | 0.25    | 24         |
//!
//! All bounds are inclusive.

use std::fmt;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::LineItem;

pub const MIN_AMOUNT: Decimal = dec!(0.01);
pub const MAX_AMOUNT: Decimal = dec!(999999.99);
pub const MIN_QUANTITY: Decimal = dec!(0.01);
pub const MAX_QUANTITY: Decimal = dec!(99999);
pub const MIN_RATE: Decimal = dec!(0);
pub const MAX_RATE: Decimal = dec!(100);
pub const MIN_HOURS: Decimal = dec!(0.25);
pub const MAX_HOURS: Decimal = dec!(24);

/// Maximum logo size in bytes (2 MiB)
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Media types accepted for the business logo
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A business-rule violation with a message suitable for showing to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input did not parse as a decimal
    #[error("{field} must be a number")]
    NotANumber { field: String },

    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: Decimal },

    #[error("{field} exceeds the maximum of {max}")]
    AboveMaximum { field: String, max: Decimal },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Invoice submitted with zero line items
    #[error("At least one line item is required")]
    EmptyItemList,

    /// Line item without descriptive text; `position` is 1-indexed
    #[error("Item {position}: description is required")]
    MissingDescription { position: usize },

    #[error("File is too large: {size} bytes (max {} MiB)", .max / (1024 * 1024))]
    TooLarge { size: u64, max: u64 },

    #[error("Unsupported image type '{media_type}' (allowed: JPEG, PNG, GIF, WebP)")]
    UnsupportedType { media_type: String },
}

impl ValidationError {
    /// The label of the field that failed, when the error concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotANumber { field }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::OutOfRange { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A raw business input as it arrives from a form, the CLI, or stored JSON
///
/// Numbers are kept exact; anything else is kept as text and only judged when
/// a validator parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Decimal),
    Text(String),
}

impl FieldValue {
    /// Parse the value as a decimal, returning `None` when it is not a number
    /// or too large for a [`Decimal`]
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => parse_decimal(text),
        }
    }

    fn parse_number(&self) -> Option<ParsedNumber> {
        match self {
            Self::Number(value) => Some(ParsedNumber::Exact(*value)),
            Self::Text(text) => ParsedNumber::parse(text),
        }
    }

    /// Parse the value, falling back to zero
    ///
    /// Only for inputs that have already been validated.
    pub fn parse_or_zero(&self) -> Decimal {
        self.parse().unwrap_or(Decimal::ZERO)
    }

    /// Store parseable text as a number, keeping anything else as text
    ///
    /// Text that a [`Decimal`] cannot hold exactly stays text.
    pub fn normalized(self) -> Self {
        match self.parse_number() {
            Some(ParsedNumber::Exact(value)) => Self::Number(value),
            _ => self,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Number(Decimal::ZERO)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value.normalize()),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&FieldValue> for FieldValue {
    fn from(value: &FieldValue) -> Self {
        value.clone()
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        // Shortest round-trip text keeps 10.005 as 10.005 instead of its binary expansion
        let text = value.to_string();
        match ParsedNumber::parse(&text) {
            Some(ParsedNumber::Exact(decimal)) if value.is_finite() => Self::Number(decimal),
            _ => Self::Text(text),
        }
    }
}

macro_rules! field_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::Number(Decimal::from(value))
                }
            }
        )*
    };
}

field_value_from_int!(i32, i64, u32, u64, usize);

/// Most significant digits a parsed value keeps
const MAX_DIGITS: usize = 28;

/// Largest scale a [`Decimal`] supports
const MAX_SCALE: i64 = 28;

/// A number read from text
///
/// Text may carry more digits, or a larger or smaller magnitude, than a
/// [`Decimal`] holds. Such values are truncated toward zero and remember the
/// sign, so bound checks still see which side of a bound the input lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedNumber {
    Exact(Decimal),
    /// Digits were dropped; the true magnitude is strictly larger than `value`
    Truncated { value: Decimal, negative: bool },
    /// Magnitude of at least 10^28
    Overflow { negative: bool },
}

impl ParsedNumber {
    /// Parse plain decimal (`"12.50"`, `"-3"`, `".5"`) or scientific
    /// (`"1.5e2"`) notation after trimming whitespace
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, rest) = match text.as_bytes().first().copied()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(at) => (&rest[..at], parse_exponent(&rest[at + 1..])?),
            None => (rest, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !is_digits(int_part) || !is_digits(frac_part) {
            return None;
        }

        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes())
            .map(|b| b - b'0')
            .skip_while(|&d| d == 0)
            .collect();
        let mut exp10 = exponent - frac_part.len() as i64;

        while digits.last() == Some(&0) {
            digits.pop();
            exp10 += 1;
        }
        if digits.is_empty() {
            return Some(Self::Exact(Decimal::ZERO));
        }

        // Power of ten of the leading digit
        let top = exp10 + digits.len() as i64 - 1;
        if top >= MAX_DIGITS as i64 {
            return Some(Self::Overflow { negative });
        }
        if top < -MAX_SCALE {
            return Some(Self::Truncated {
                value: Decimal::ZERO,
                negative,
            });
        }

        // At least one digit survives since top >= -MAX_SCALE
        let keep = digits.len().min(MAX_DIGITS).min((top + MAX_SCALE + 1) as usize);
        let truncated = keep < digits.len();
        exp10 += (digits.len() - keep) as i64;

        let mut mantissa = digits[..keep]
            .iter()
            .fold(0i128, |acc, &d| acc * 10 + i128::from(d));
        let scale = if exp10 < 0 {
            (-exp10) as u32
        } else {
            mantissa *= 10i128.pow(exp10 as u32);
            0
        };
        if negative {
            mantissa = -mantissa;
        }

        let value = Decimal::try_from_i128_with_scale(mantissa, scale).ok()?;
        Some(if truncated {
            Self::Truncated { value, negative }
        } else {
            Self::Exact(value)
        })
    }

    /// The value when it fits a [`Decimal`], possibly truncated
    fn value(&self) -> Option<Decimal> {
        match self {
            Self::Exact(value) | Self::Truncated { value, .. } => Some(*value),
            Self::Overflow { .. } => None,
        }
    }

    fn is_below(&self, min: Decimal) -> bool {
        match *self {
            Self::Exact(value) => value < min,
            Self::Truncated { value, negative } if negative => value <= min,
            Self::Truncated { value, .. } => value < min,
            Self::Overflow { negative } => negative,
        }
    }

    fn is_above(&self, max: Decimal) -> bool {
        match *self {
            Self::Exact(value) => value > max,
            Self::Truncated { value, negative } if !negative => value >= max,
            Self::Truncated { value, .. } => value > max,
            Self::Overflow { negative } => !negative,
        }
    }
}

/// Exponent after `e`, saturating far beyond any representable magnitude
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first().copied()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX).min(1_000_000);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse text as a decimal
///
/// Accepts plain decimal (`"12.50"`, `"-3"`) and scientific (`"1.5e2"`)
/// notation after trimming whitespace. Digit separators, trailing garbage and
/// magnitudes of 10^28 or more are rejected. Digits beyond 28 places are
/// truncated.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    ParsedNumber::parse(text).and_then(|parsed| parsed.value())
}

fn parse_field(value: FieldValue, field: &str) -> ValidationResult<ParsedNumber> {
    value.parse_number().ok_or_else(|| ValidationError::NotANumber {
        field: field.to_string(),
    })
}

fn check_min_max(
    value: FieldValue,
    field: &str,
    min: Decimal,
    max: Decimal,
) -> ValidationResult<Decimal> {
    let parsed = parse_field(value, field)?;

    if parsed.is_below(min) {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min,
        });
    }

    if parsed.is_above(max) {
        return Err(ValidationError::AboveMaximum {
            field: field.to_string(),
            max,
        });
    }

    Ok(parsed.value().unwrap_or(min))
}

/// Validates a monetary amount, bounds [0.01, 999999.99].
///
/// ## Example
/// ```rust
/// use freelance::validation::validate_amount;
///
/// assert!(validate_amount("999999.99", None).is_ok());
/// assert!(validate_amount("0.00", Some("Budget")).is_err());
/// ```
pub fn validate_amount(
    value: impl Into<FieldValue>,
    label: Option<&str>,
) -> ValidationResult<Decimal> {
    check_min_max(
        value.into(),
        label.unwrap_or("Amount"),
        MIN_AMOUNT,
        MAX_AMOUNT,
    )
}

/// Validates a quantity, bounds [0.01, 99999].
pub fn validate_quantity(
    value: impl Into<FieldValue>,
    label: Option<&str>,
) -> ValidationResult<Decimal> {
    check_min_max(
        value.into(),
        label.unwrap_or("Quantity"),
        MIN_QUANTITY,
        MAX_QUANTITY,
    )
}

/// Validates a percentage rate such as the tax rate, bounds [0, 100].
pub fn validate_rate(
    value: impl Into<FieldValue>,
    label: Option<&str>,
) -> ValidationResult<Decimal> {
    let field = label.unwrap_or("Rate");
    let parsed = parse_field(value.into(), field)?;

    if parsed.is_below(MIN_RATE) || parsed.is_above(MAX_RATE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: MIN_RATE,
            max: MAX_RATE,
        });
    }

    Ok(parsed.value().unwrap_or(MIN_RATE))
}

/// Validates hours worked in a single entry, bounds [0.25, 24].
pub fn validate_hours(
    value: impl Into<FieldValue>,
    label: Option<&str>,
) -> ValidationResult<Decimal> {
    check_min_max(value.into(), label.unwrap_or("Hours"), MIN_HOURS, MAX_HOURS)
}

/// Size and declared media type of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub size: u64,
    pub media_type: String,
}

impl ImageFile {
    pub fn new(size: u64, media_type: impl Into<String>) -> Self {
        Self {
            size,
            media_type: media_type.into(),
        }
    }

    /// Describe a file on disk, inferring the media type from its extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        Ok(Self::new(size, media_type_for_path(path)))
    }
}

/// Guess a media type from a file extension
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Validates an optional image upload. No file is valid.
pub fn validate_image_file(file: Option<&ImageFile>) -> ValidationResult<()> {
    let Some(file) = file else {
        return Ok(());
    };

    if file.size > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge {
            size: file.size,
            max: MAX_IMAGE_BYTES,
        });
    }

    if !ALLOWED_IMAGE_TYPES.contains(&file.media_type.as_str()) {
        return Err(ValidationError::UnsupportedType {
            media_type: file.media_type.clone(),
        });
    }

    Ok(())
}

/// Validates invoice line items in order, stopping at the first failure.
///
/// Each item needs a non-blank description, a valid quantity and a valid
/// unit price (checked as an amount).
pub fn validate_invoice_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyItemList);
    }

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;

        if item.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription { position });
        }

        validate_quantity(
            &item.quantity,
            Some(&format!("Item {} quantity", position)),
        )?;
        validate_amount(
            &item.unit_price,
            Some(&format!("Item {} unit price", position)),
        )?;
    }

    Ok(())
}
