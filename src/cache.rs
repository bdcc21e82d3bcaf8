//! Local Cache
//!
//! JSON blobs in local storage. Reads never fail: missing or malformed data
//! yields the type's default.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::keys::{self, PANELS_KEY, PROFILE_KEY};
use crate::models::{ServiceEntry, TimeDefaults};
use crate::ports::StoragePort;

#[derive(Clone)]
pub struct LocalCache {
    storage: Rc<dyn StoragePort>,
}

impl LocalCache {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Stored value, `None` when absent or unreadable
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[CACHE] Discarding malformed entry {}: {}", key, e);
                None
            }
        }
    }

    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get_opt(key).unwrap_or_default()
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("[CACHE] Cannot serialize {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(key, &raw) {
            log::warn!("[CACHE] Write to {} failed: {}", key, e);
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            log::warn!("[CACHE] Remove of {} failed: {}", key, e);
        }
    }
}

/// Profile fields, kept indefinitely and independent of partitions
#[derive(Clone)]
pub struct ProfileStore {
    cache: LocalCache,
}

impl ProfileStore {
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub fn load(&self) -> BTreeMap<String, String> {
        self.cache.get(PROFILE_KEY)
    }

    pub fn field(&self, id: &str) -> String {
        self.load().remove(id).unwrap_or_default()
    }

    pub fn save_field(&self, id: &str, value: &str) {
        let mut profile = self.load();
        profile.insert(id.to_string(), value.to_string());
        self.cache.set(PROFILE_KEY, &profile);
    }
}

/// Last-used start, end and rate per location and weekday, one map per parish
#[derive(Clone)]
pub struct TimeDefaultsStore {
    cache: LocalCache,
}

impl TimeDefaultsStore {
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub fn load(&self, parish: &str) -> BTreeMap<String, TimeDefaults> {
        self.cache.get(&keys::times_key(parish))
    }

    pub fn lookup(&self, parish: &str, location: &str, date: &str) -> Option<TimeDefaults> {
        let key = keys::defaults_entry_key(location, date)?;
        self.load(parish).remove(&key)
    }

    pub fn remember(&self, parish: &str, entry: &ServiceEntry) {
        let Some(key) = keys::defaults_entry_key(&entry.location, &entry.date) else {
            return;
        };
        let mut map = self.load(parish);
        map.insert(
            key,
            TimeDefaults {
                start: entry.start.clone(),
                end: entry.end.clone(),
                rate: entry.rate.clone(),
            },
        );
        self.cache.set(&keys::times_key(parish), &map);
    }
}

/// Collapsed flag per panel id
#[derive(Clone)]
pub struct PanelStateStore {
    cache: LocalCache,
}

impl PanelStateStore {
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub fn is_collapsed(&self, panel_id: &str) -> bool {
        self.cache
            .get::<BTreeMap<String, bool>>(PANELS_KEY)
            .get(panel_id)
            .copied()
            .unwrap_or(false)
    }

    /// Flip the panel and return the new collapsed state
    pub fn toggle(&self, panel_id: &str) -> bool {
        let mut state: BTreeMap<String, bool> = self.cache.get(PANELS_KEY);
        let collapsed = !state.get(panel_id).copied().unwrap_or(false);
        state.insert(panel_id.to_string(), collapsed);
        self.cache.set(PANELS_KEY, &state);
        collapsed
    }
}

/// Record of the last successful save of a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStamp {
    /// `updated_at` as returned by the server
    pub server_updated_at: String,
    /// Local wall clock when the server confirmed, epoch millis
    pub saved_at_ms: i64,
}

#[derive(Clone)]
pub struct SaveStampStore {
    cache: LocalCache,
}

impl SaveStampStore {
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub fn get(&self, month_key: &str) -> Option<SaveStamp> {
        self.cache.get_opt(&keys::save_stamp_key(month_key))
    }

    pub fn record(&self, month_key: &str, stamp: &SaveStamp) {
        self.cache.set(&keys::save_stamp_key(month_key), stamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::ports::MemoryStorage;

    /// Readable storage that rejects every change, like a full or locked quota
    struct FrozenStorage(MemoryStorage);

    impl StoragePort for FrozenStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".into()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".into()))
        }
    }

    fn cache() -> (Rc<MemoryStorage>, LocalCache) {
        let storage = Rc::new(MemoryStorage::new());
        (storage.clone(), LocalCache::new(storage))
    }

    #[test]
    fn malformed_blob_degrades_to_default() {
        let (storage, cache) = cache();
        storage.set_item("k", "{not json").unwrap();

        let list: Vec<ServiceEntry> = cache.get("k");
        assert!(list.is_empty());
        let map: BTreeMap<String, String> = cache.get("k");
        assert!(map.is_empty());
    }

    #[test]
    fn rejected_writes_and_removes_leave_stored_value() {
        let inner = MemoryStorage::new();
        inner.set_item("k", r#"["a"]"#).unwrap();
        let cache = LocalCache::new(Rc::new(FrozenStorage(inner)));

        cache.set("k", &vec!["b".to_string()]);
        cache.remove("k");

        let kept: Vec<String> = cache.get("k");
        assert_eq!(kept, vec!["a".to_string()]);
    }

    #[test]
    fn wrong_shape_degrades_to_default() {
        let (storage, cache) = cache();
        storage.set_item("k", r#"{"a": 1}"#).unwrap();

        let list: Vec<ServiceEntry> = cache.get("k");
        assert!(list.is_empty());
    }

    #[test]
    fn profile_fields_accumulate() {
        let (_, cache) = cache();
        let profile = ProfileStore::new(cache);
        profile.save_field("vorname_input", "Anna");
        profile.save_field("nachname_input", "Berg");

        assert_eq!(profile.field("vorname_input"), "Anna");
        assert_eq!(profile.field("nachname_input"), "Berg");
        assert_eq!(profile.field("geburtsdatum_input"), "");
    }

    #[test]
    fn time_defaults_are_scoped_per_parish() {
        let (_, cache) = cache();
        let defaults = TimeDefaultsStore::new(cache);
        let entry = ServiceEntry {
            location: "St. Georg Dom".into(),
            date: "2026-10-18".into(),
            rate: "1.0".into(),
            start: "09:05".into(),
            end: "10:05".into(),
        };
        defaults.remember("Parish A", &entry);

        // any Sunday matches
        let hit = defaults.lookup("Parish A", "St. Georg Dom", "2026-10-25").unwrap();
        assert_eq!(hit.start, "09:05");
        assert_eq!(hit.rate, "1.0");
        assert!(defaults.lookup("Parish A", "St. Georg Dom", "2026-10-19").is_none());
        assert!(defaults.lookup("Parish B", "St. Georg Dom", "2026-10-25").is_none());
    }

    #[test]
    fn panel_toggle_persists() {
        let (_, cache) = cache();
        let panels = PanelStateStore::new(cache.clone());
        assert!(!panels.is_collapsed("gottesdienste"));
        assert!(panels.toggle("gottesdienste"));
        assert!(PanelStateStore::new(cache).is_collapsed("gottesdienste"));
        assert!(!panels.toggle("gottesdienste"));
    }

    #[test]
    fn save_stamp_round_trip() {
        let (_, cache) = cache();
        let stamps = SaveStampStore::new(cache);
        assert!(stamps.get("2026-10").is_none());

        let stamp = SaveStamp { server_updated_at: "2026-10-18 10:00:00".into(), saved_at_ms: 42 };
        stamps.record("2026-10", &stamp);
        assert_eq!(stamps.get("2026-10"), Some(stamp));
    }
}
