//! List Store
//!
//! One ordered entry list bound to the partition it is stored under. Every
//! mutation sorts, persists and renders, so the stored blob always matches
//! the list in memory.

use std::rc::Rc;

use crate::cache::LocalCache;
use crate::calendar::DateBounds;
use crate::error::ValidationError;
use crate::models::ListEntry;
use crate::ports::{FieldPort, ListView};

pub struct ListStore<T: ListEntry> {
    cache: LocalCache,
    view: Rc<dyn ListView>,
    fields: Rc<dyn FieldPort>,
    key: Option<String>,
    entries: Vec<T>,
}

/// Ascending by date then start time. Empty values sort first, ties keep
/// insertion order.
pub fn sort_entries<T: ListEntry>(entries: &mut [T]) {
    entries.sort_by(|a, b| (a.date(), a.start()).cmp(&(b.date(), b.start())));
}

impl<T: ListEntry> ListStore<T> {
    pub fn new(cache: LocalCache, view: Rc<dyn ListView>, fields: Rc<dyn FieldPort>) -> Self {
        Self {
            cache,
            view,
            fields,
            key: None,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flush the current partition and load `new_key`.
    ///
    /// Returns false (nothing reloaded, nothing rendered) when `new_key` is
    /// already active.
    pub fn switch_context(&mut self, new_key: String) -> bool {
        if self.key.as_deref() == Some(new_key.as_str()) {
            return false;
        }
        if self.key.is_some() {
            self.persist();
        }
        log::debug!("[STORE] {:?} -> {}", T::KIND, new_key);

        self.entries = self.cache.get(&new_key);
        sort_entries(&mut self.entries);
        self.key = Some(new_key);
        self.render();
        true
    }

    /// Validate and append an entry.
    ///
    /// Times are rounded to 5 minutes first. With `bounds` set, the entry date
    /// must fall inside them.
    pub fn add(&mut self, mut entry: T, bounds: Option<&DateBounds>) -> Result<(), ValidationError> {
        entry.round_times()?;

        let missing = entry
            .required()
            .into_iter()
            .find(|(_, value)| value.is_empty())
            .map(|(field, _)| field);
        if let Some(field) = missing {
            return Err(ValidationError::MissingField(field));
        }
        if let Some(bounds) = bounds {
            if !bounds.contains(entry.date()) {
                return Err(ValidationError::DateOutsideMonth(entry.date().to_string()));
            }
        }

        self.entries.push(entry);
        self.commit();
        Ok(())
    }

    /// Remove the entry at a rendered position
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.commit();
        Some(removed)
    }

    /// Drop every entry and the stored partition blob
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(key) = &self.key {
            self.cache.remove(key);
        }
        self.render();
    }

    /// Install a list received from the server into the active partition
    pub fn replace(&mut self, entries: Vec<T>) {
        self.entries = entries;
        self.commit();
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn commit(&mut self) {
        sort_entries(&mut self.entries);
        self.persist();
        self.render();
    }

    fn persist(&self) {
        if let Some(key) = &self.key {
            self.cache.set(key, &self.entries);
        }
    }

    fn render(&self) {
        self.fields.set_value(T::KIND.mirror_field(), &self.to_json());
        self.view
            .render(T::KIND, self.entries.iter().map(ListEntry::row).collect());
    }
}
