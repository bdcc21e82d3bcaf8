//! Application Configuration
//!
//! Defaults match the production form. A page can override any subset with a
//! `<script id="za-config" type="application/json">` element.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base path of the time-record endpoint
    pub api_base: String,
    /// Period of the background save
    pub autosave_interval_secs: u64,
    /// Quiet period before an edit is saved
    pub debounce_ms: u64,
    /// A local save younger than this is not overwritten by the server
    pub freshness_window_ms: u64,
    /// Month dropdown range around the current month
    pub past_months: u32,
    pub future_months: u32,
    pub log_buffer_lines: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/timerecords".to_string(),
            autosave_interval_secs: 30,
            debounce_ms: 2_000,
            freshness_window_ms: 5_000,
            past_months: 12,
            future_months: 24,
            log_buffer_lines: 500,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_millis(self.freshness_window_ms)
    }
}
