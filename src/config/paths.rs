//! Path management for Freelance CLI
//!
//! ## Path Resolution Order
//!
//! 1. `FREELANCE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `freelance-cli`
//!    (`~/.config/freelance-cli` on Linux, `~/Library/Application Support/freelance-cli`
//!    on macOS, `%APPDATA%\freelance-cli\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FreelanceError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FREELANCE_DATA_DIR";

/// Manages all paths used by Freelance CLI
#[derive(Debug, Clone)]
pub struct FreelancePaths {
    base_dir: PathBuf,
}

impl FreelancePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FreelanceError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per record collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    pub fn clients_file(&self) -> PathBuf {
        self.data_dir().join("clients.json")
    }

    pub fn projects_file(&self) -> PathBuf {
        self.data_dir().join("projects.json")
    }

    pub fn invoices_file(&self) -> PathBuf {
        self.data_dir().join("invoices.json")
    }

    pub fn time_logs_file(&self) -> PathBuf {
        self.data_dir().join("time_logs.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FreelanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FreelanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FreelanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Freelance CLI has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FreelanceError> {
    ProjectDirs::from("", "", "freelance-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FreelanceError::Config("Could not determine a home directory".into()))
}
