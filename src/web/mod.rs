//! Browser adapters for the ports, plus page-level lookups.

mod dialogs;
mod http;
mod storage;
mod timers;

pub use dialogs::BrowserDialogs;
pub use http::FetchTransport;
pub use storage::open_storage;
pub use timers::{start_autosave, TimeoutTimer};

use chrono::{DateTime, NaiveDate, Utc};
use wasm_bindgen::JsCast;

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::ports::Clock;

const CONFIG_ELEMENT_ID: &str = "za-config";

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

/// Local calendar date of the browser
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

/// CSRF token from `<meta name="csrf-token">` or a hidden `csrf_token` input
pub fn csrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let from_meta = document
        .query_selector("meta[name='csrf-token']")
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"));
    let token = from_meta.or_else(|| {
        document
            .query_selector("input[name='csrf_token']")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
            .map(|input| input.value())
    })?;
    (!token.is_empty()).then_some(token)
}

/// Settings from the page's `<script id="za-config" type="application/json">`,
/// defaults when the element is absent
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match raw {
        Some(raw) => AppConfig::from_json(&raw),
        None => Ok(AppConfig::default()),
    }
}
