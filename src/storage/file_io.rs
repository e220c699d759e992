//! File I/O utilities with atomic writes
//!
//! Every collection file is rewritten whole on save, so writes go to a
//! temporary sibling first and are renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FreelanceError;

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, FreelanceError> {
    let file = File::open(path)
        .map_err(|e| FreelanceError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| FreelanceError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read a collection file; a missing file is an empty collection
pub fn read_json<T, P>(path: P) -> Result<T, FreelanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "file missing, using empty default");
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read a file that must exist, such as saved settings
pub fn read_json_required<T, P>(path: P) -> Result<T, FreelanceError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(FreelanceError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left as it was.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FreelanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FreelanceError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FreelanceError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FreelanceError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FreelanceError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FreelanceError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FreelanceError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        number: String,
        total: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                number: "INV-001".into(),
                total: "960.00".into(),
            },
            Row {
                number: "INV-002".into(),
                total: "12.00".into(),
            },
        ]
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invoices.json");

        let data: Vec<Row> = read_json(&path).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_write_and_read_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invoices.json");

        write_json_atomic(&path, &rows()).unwrap();
        let loaded: Vec<Row> = read_json(&path).unwrap();
        assert_eq!(loaded, rows());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invoices.json");

        write_json_atomic(&path, &rows()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("invoices.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data").join("invoices.json");

        write_json_atomic(&path, &rows()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invoices.json");
        fs::write(&path, "[{\"number\": ").unwrap();

        let err = read_json::<Vec<Row>, _>(&path).unwrap_err();
        assert!(matches!(err, FreelanceError::Storage(_)));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_read_json_required() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        assert!(read_json_required::<Vec<Row>, _>(&path).is_err());

        write_json_atomic(&path, &rows()).unwrap();
        let loaded: Vec<Row> = read_json_required(&path).unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
