use std::rc::Rc;

use crate::error::StorageError;
use crate::ports::{MemoryStorage, StoragePort};

/// `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn new() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl StoragePort for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Local storage, or page-lifetime memory when the browser blocks it
pub fn open_storage() -> Rc<dyn StoragePort> {
    match BrowserStorage::new() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("[STORAGE] {}, entries will not survive a reload", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
