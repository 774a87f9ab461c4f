//! Entity Store
//!
//! One in-memory list of records per kind, mirrored to a single JSON file.
//! Every mutation rewrites the whole file. File errors are logged and never
//! reach the caller: a failed load yields an empty list and a failed save
//! leaves the in-memory mutation in place.

use crate::atomic::atomic_write;
use crate::error::{RecordsError, RecordsResult, StoreError};
use crate::types::{names_match, Draft, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// ============================================================
// FILE HELPERS
// ============================================================

/// Read a JSON array of records from `path`
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Overwrite `path` with the pretty-printed JSON array of `records`
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;
    atomic_write(path, &json)
}

/// Like [`read_records`], but any failure degrades to an empty list
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match read_records(path) {
        Ok(records) => records,
        Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::info!("[store] {:?} does not exist yet, starting empty", path);
            Vec::new()
        }
        Err(e) => {
            log::error!("[store] Error loading {:?}, using empty list: {}", path, e);
            Vec::new()
        }
    }
}

// ============================================================
// ENTITY STORE
// ============================================================

/// File-backed collection of one record kind
#[derive(Debug)]
pub struct EntityStore<T> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T: Record> EntityStore<T> {
    /// Open the store, loading whatever is currently on disk
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_records(&path);
        log::debug!("[store] Loaded {} {} record(s) from {:?}", records.len(), T::KIND, path);
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard the in-memory list and re-read the file
    pub fn reload(&mut self) {
        self.records = load_records(&self.path);
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next created record will receive: last id + 1, or 1 when empty
    pub fn next_id(&self) -> RecordsResult<u64> {
        match self.records.last() {
            None => Ok(1),
            Some(last) => last.id().checked_add(1).ok_or_else(|| {
                RecordsError::Conflict(format!("{} id space exhausted.", T::KIND))
            }),
        }
    }

    pub fn get(&self, id: u64) -> RecordsResult<&T> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>())
    }

    /// All records, or those whose filter field matches `filter` case-insensitively
    pub fn list(&self, filter: Option<&str>) -> Vec<T> {
        match filter {
            None => self.records.clone(),
            Some(wanted) => self
                .records
                .iter()
                .filter(|r| r.filter_key().is_some_and(|key| names_match(key, wanted)))
                .cloned()
                .collect(),
        }
    }

    /// First record whose name matches case-insensitively
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.records.iter().find(|r| names_match(r.name(), name))
    }

    /// Validate, check name uniqueness, assign an id, append and persist
    pub fn create<D>(&mut self, draft: D) -> RecordsResult<T>
    where
        D: Draft<Output = T>,
    {
        draft.validate()?;

        if let Some(name) = draft.unique_name() {
            if self.find_by_name(name).is_some() {
                return Err(RecordsError::Conflict(format!(
                    "{} '{}' already exists.",
                    T::KIND,
                    name
                )));
            }
        }

        let record = draft.into_record(self.next_id()?);
        self.records.push(record.clone());
        self.persist();

        log::info!("[store] Created {} #{}", T::KIND, record.id());
        Ok(record)
    }

    /// Remove the record with `id` and persist
    pub fn remove(&mut self, id: u64) -> RecordsResult<T> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>())?;

        let removed = self.records.remove(index);
        self.persist();

        log::info!("[store] Deleted {} #{}", T::KIND, id);
        Ok(removed)
    }

    /// Write the full list; failures are logged only
    fn persist(&self) {
        if let Err(e) = write_records(&self.path, &self.records) {
            log::error!("[store] Error saving {:?}: {}", self.path, e);
        }
    }
}

fn not_found<T: Record>() -> RecordsError {
    RecordsError::NotFound(format!("{} not found.", T::KIND))
}
