//! Generic record collection backed by a JSON array file
//!
//! Records are kept in insertion order. Invoice numbering depends on that
//! order, so updates replace a record in place and inserts always append.

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{Client, ClientId, Invoice, InvoiceId, Project, ProjectId, TimeLog, TimeLogId};

use super::file_io::{read_json, write_json_atomic};

/// A record stored in a [`Collection`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + PartialEq + Display;

    /// Human-readable entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
}

impl Record for Client {
    type Id = ClientId;
    const ENTITY: &'static str = "Client";

    fn id(&self) -> ClientId {
        self.id
    }
}

impl Record for Project {
    type Id = ProjectId;
    const ENTITY: &'static str = "Project";

    fn id(&self) -> ProjectId {
        self.id
    }
}

impl Record for TimeLog {
    type Id = TimeLogId;
    const ENTITY: &'static str = "Time entry";

    fn id(&self) -> TimeLogId {
        self.id
    }
}

impl Record for Invoice {
    type Id = InvoiceId;
    const ENTITY: &'static str = "Invoice";

    fn id(&self) -> InvoiceId {
        self.id
    }
}

/// Repository for one record type
pub struct Collection<T: Record> {
    path: PathBuf,
    data: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> FreelanceResult<RwLockReadGuard<'_, Vec<T>>> {
        self.data
            .read()
            .map_err(|e| FreelanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FreelanceResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.data
            .write()
            .map_err(|e| FreelanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing anything held in memory
    pub fn load(&self) -> FreelanceResult<()> {
        let records: Vec<T> = read_json(&self.path)?;
        tracing::debug!(entity = T::ENTITY, count = records.len(), "loaded records");

        let mut data = self.write()?;
        *data = records;
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> FreelanceResult<()> {
        let data = self.read()?;
        write_json_atomic(&self.path, &*data)
    }

    pub fn get(&self, id: T::Id) -> FreelanceResult<Option<T>> {
        let data = self.read()?;
        Ok(data.iter().find(|r| r.id() == id).cloned())
    }

    /// All records in insertion order
    pub fn all(&self) -> FreelanceResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    /// First record matching a predicate
    pub fn find<F>(&self, predicate: F) -> FreelanceResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        let data = self.read()?;
        Ok(data.iter().find(|r| predicate(r)).cloned())
    }

    /// All records matching a predicate, in insertion order
    pub fn filter<F>(&self, predicate: F) -> FreelanceResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let data = self.read()?;
        Ok(data.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// Append a new record
    pub fn insert(&self, record: T) -> FreelanceResult<()> {
        let mut data = self.write()?;

        if data.iter().any(|r| r.id() == record.id()) {
            return Err(FreelanceError::Duplicate {
                entity_type: T::ENTITY,
                identifier: record.id().to_string(),
            });
        }

        data.push(record);
        Ok(())
    }

    /// Replace an existing record, keeping its position
    pub fn update(&self, record: T) -> FreelanceResult<()> {
        let mut data = self.write()?;

        let slot = data
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| FreelanceError::NotFound {
                entity_type: T::ENTITY,
                identifier: record.id().to_string(),
            })?;

        *slot = record;
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn remove(&self, id: T::Id) -> FreelanceResult<Option<T>> {
        let mut data = self.write()?;

        match data.iter().position(|r| r.id() == id) {
            Some(index) => Ok(Some(data.remove(index))),
            None => Ok(None),
        }
    }

    pub fn count(&self) -> FreelanceResult<usize> {
        Ok(self.read()?.len())
    }
}
