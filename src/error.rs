//! Error Types
//!
//! One enum per concern. User-facing messages are German, the form's language.

use thiserror::Error;

/// Reasons an entry is rejected before it reaches a list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Bitte alle Felder ausfüllen.")]
    MissingField(&'static str),

    #[error("Bitte wähle ein Datum, das im ausgewählten Monat/Jahr liegt.")]
    DateOutsideMonth(String),

    #[error("Ungültige Uhrzeit: {0}")]
    InvalidTime(String),
}

/// Failures while talking to the time-record endpoint
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Server rejected request: {0}")]
    Rejected(String),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Local storage write failures (quota exceeded, storage disabled)
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Storage write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
