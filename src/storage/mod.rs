//! Storage layer for Freelance CLI
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each collection lives in its own file under the data directory.

pub mod collection;
pub mod file_io;
pub mod init;

pub use collection::{Collection, Record};
pub use init::initialize_storage;

use crate::config::paths::FreelancePaths;
use crate::error::FreelanceResult;
use crate::models::{Client, Invoice, Project, TimeLog};

/// Main storage coordinator that provides access to all collections
pub struct Storage {
    paths: FreelancePaths,
    pub clients: Collection<Client>,
    pub projects: Collection<Project>,
    pub time_logs: Collection<TimeLog>,
    pub invoices: Collection<Invoice>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FreelancePaths) -> FreelanceResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            clients: Collection::new(paths.clients_file()),
            projects: Collection::new(paths.projects_file()),
            time_logs: Collection::new(paths.time_logs_file()),
            invoices: Collection::new(paths.invoices_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FreelancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> FreelanceResult<()> {
        self.clients.load()?;
        self.projects.load()?;
        self.time_logs.load()?;
        self.invoices.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> FreelanceResult<()> {
        self.clients.save()?;
        self.projects.save()?;
        self.time_logs.save()?;
        self.invoices.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FreelancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FreelancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        storage.clients.insert(Client::new("Ada")).unwrap();
        storage.save_all().unwrap();

        assert!(paths.clients_file().exists());
        assert!(paths.invoices_file().exists());

        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.clients.count().unwrap(), 1);
        assert_eq!(reopened.invoices.count().unwrap(), 0);
    }
}
