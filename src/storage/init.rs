//! Storage initialization
//!
//! Handles first-run setup: default settings and empty collection files.

use crate::config::paths::FreelancePaths;
use crate::config::settings::Settings;
use crate::error::FreelanceResult;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &FreelancePaths) -> FreelanceResult<()> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        tracing::info!(path = %paths.settings_file().display(), "created default settings");
    }

    for file in [
        paths.clients_file(),
        paths.projects_file(),
        paths.time_logs_file(),
        paths.invoices_file(),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &Vec::<serde_json::Value>::new())?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FreelancePaths) -> bool {
    !paths.is_initialized()
}
