//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod client;
pub mod export;
pub mod invoice;
pub mod project;
pub mod settings;
pub mod time;

pub use client::{handle_client_command, ClientCommands};
pub use export::{handle_export_command, ExportCommands};
pub use invoice::{handle_invoice_command, InvoiceCommands};
pub use project::{handle_project_command, ProjectCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use time::{handle_time_command, TimeCommands};

use chrono::{Local, NaiveDate};

use crate::error::{FreelanceError, FreelanceResult};

/// Parse a `YYYY-MM-DD` date argument; `today` is accepted as a shorthand
pub(crate) fn parse_date(input: &str) -> FreelanceResult<NaiveDate> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        FreelanceError::InvalidInput(format!(
            "Invalid date: '{}'. Use YYYY-MM-DD",
            input
        ))
    })
}

/// Parse an optional date argument
pub(crate) fn parse_optional_date(input: Option<&str>) -> FreelanceResult<Option<NaiveDate>> {
    input.map(parse_date).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-07").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
        );
        assert_eq!(parse_date(" Today ").unwrap(), Local::now().date_naive());

        let err = parse_date("07/03/2025").unwrap_err();
        assert!(err.to_string().contains("Use YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert!(parse_optional_date(Some("2025-02-30")).is_err());
    }
}
