//! Ports
//!
//! Capabilities the core needs from its host. The browser adapters live in
//! `web`, tests use in-memory versions.

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::models::{ListKind, RowView};

/// Read and write form field values by id
pub trait FieldPort {
    /// Current value, empty when the field is unknown
    fn get_value(&self, id: &str) -> String;

    fn set_value(&self, id: &str, value: &str);
}

/// String key-value persistence (`localStorage`)
pub trait StoragePort {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Receives the rows of a list whenever it changes
pub trait ListView {
    fn render(&self, kind: ListKind, rows: Vec<RowView>);
}

/// Synchronous user dialogs
pub trait Notifier {
    fn alert(&self, message: &str);

    /// Ask before a destructive action
    fn confirm(&self, message: &str) -> bool;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Storage that lives as long as the page. Used when `localStorage` is
/// blocked, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
