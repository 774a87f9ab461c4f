//! Error types for the records core.
//!
//! `RecordsError` is what callers see. `StoreError` covers file I/O and never
//! leaves the store: loads degrade to an empty list and saves are only logged.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordsError {
    /// A required field was missing or empty
    #[error("{0}")]
    Validation(String),

    /// No record with the requested id
    #[error("{0}")]
    NotFound(String),

    /// A record with the same name already exists
    #[error("{0}")]
    Conflict(String),

    /// Deletion refused because other records still reference this one
    #[error("{0}")]
    Blocked(String),
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to access data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize data file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RecordsResult<T> = Result<T, RecordsError>;
