//! Form Payload
//!
//! Flat map of field id → value that is stored on the server as one JSON
//! string. Lists travel as JSON text under their own underscore-prefixed keys.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ListKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload {
    values: BTreeMap<String, String>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn to_form_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored `form_data` string.
    ///
    /// Older records hold numbers, nulls or inline arrays; those become their
    /// JSON text, null becomes empty.
    pub fn from_form_data(raw: &str) -> Result<Self, serde_json::Error> {
        let object: BTreeMap<String, Value> = serde_json::from_str(raw)?;
        let values = object
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();
        Ok(Self { values })
    }

    /// Plain form fields, without the embedded lists
    pub fn plain_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(key, _)| !key.starts_with('_'))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn set_list(&mut self, kind: ListKind, json: String) {
        self.insert(kind.payload_field(), json);
    }

    /// Embedded list, `None` when absent or unreadable
    pub fn list<T: DeserializeOwned>(&self, kind: ListKind) -> Option<Vec<T>> {
        let raw = self.get(kind.payload_field())?;
        if raw.trim().is_empty() {
            return Some(Vec::new());
        }
        match serde_json::from_str(raw) {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!("[SYNC] Ignoring unreadable {}: {}", kind.payload_field(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServiceEntry, WorkTimeEntry};

    #[test]
    fn form_data_is_a_flat_string_map() {
        let mut payload = FormPayload::new();
        payload.insert("kirchengemeinde_input", "St. Peter");
        payload.set_list(ListKind::WorkTimes, "[]".to_string());

        let raw = payload.to_form_data().unwrap();
        assert_eq!(raw, r#"{"_arbeitszeiten_list":"[]","kirchengemeinde_input":"St. Peter"}"#);
        assert_eq!(FormPayload::from_form_data(&raw).unwrap(), payload);
    }

    #[test]
    fn lenient_about_non_string_values() {
        let payload = FormPayload::from_form_data(
            r#"{"a": 1, "b": null, "_gottesdienste_list": [{"kirchort":"X","datum":"2026-10-01","satz":"1","beginn":"10:00","ende":"11:00"}]}"#,
        )
        .unwrap();

        assert_eq!(payload.get("a"), Some("1"));
        assert_eq!(payload.get("b"), Some(""));
        let list: Vec<ServiceEntry> = payload.list(ListKind::Services).unwrap();
        assert_eq!(list[0].location, "X");
    }

    #[test]
    fn plain_fields_skip_lists() {
        let mut payload = FormPayload::new();
        payload.insert("vorname_input", "Anna");
        payload.set_list(ListKind::Services, "[]".to_string());

        let plain: Vec<_> = payload.plain_fields().collect();
        assert_eq!(plain, vec![("vorname_input", "Anna")]);
    }

    #[test]
    fn missing_or_broken_list_is_none() {
        let mut payload = FormPayload::new();
        assert!(payload.list::<WorkTimeEntry>(ListKind::WorkTimes).is_none());

        payload.set_list(ListKind::WorkTimes, "not json".to_string());
        assert!(payload.list::<WorkTimeEntry>(ListKind::WorkTimes).is_none());

        payload.set_list(ListKind::WorkTimes, String::new());
        assert_eq!(payload.list::<WorkTimeEntry>(ListKind::WorkTimes), Some(Vec::new()));
    }
}
