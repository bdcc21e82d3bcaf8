//! Frontend Models
//!
//! Entry types and their storage shape. Field names on the wire stay German,
//! the form and the server already use them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calendar::{is_weekend, round_time_to_5_minutes};
use crate::error::ValidationError;
use crate::fields;
use crate::keys::KeyBuilder;

/// One recorded church service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "kirchort", default)]
    pub location: String,
    #[serde(rename = "datum", default)]
    pub date: String,
    #[serde(rename = "satz", default)]
    pub rate: String,
    #[serde(rename = "beginn", default)]
    pub start: String,
    #[serde(rename = "ende", default)]
    pub end: String,
}

/// One recorded stretch of work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTimeEntry {
    #[serde(rename = "datum", default)]
    pub date: String,
    #[serde(rename = "beginn", default)]
    pub start: String,
    #[serde(rename = "ende", default)]
    pub end: String,
}

/// Last-used times for a location on a weekday
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDefaults {
    #[serde(rename = "beginn", default)]
    pub start: String,
    #[serde(rename = "ende", default)]
    pub end: String,
    #[serde(rename = "satz", default)]
    pub rate: String,
}

/// The two lists the form keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Services,
    WorkTimes,
}

impl ListKind {
    pub fn key_builder(&self) -> KeyBuilder {
        match self {
            ListKind::Services => KeyBuilder::SERVICES,
            ListKind::WorkTimes => KeyBuilder::WORK_TIMES,
        }
    }

    /// Hidden input that mirrors the list as JSON
    pub fn mirror_field(&self) -> &'static str {
        match self {
            ListKind::Services => fields::SERVICES_JSON,
            ListKind::WorkTimes => fields::WORK_TIMES_JSON,
        }
    }

    /// Key of the serialized list inside the synced form payload
    pub fn payload_field(&self) -> &'static str {
        match self {
            ListKind::Services => "_gottesdienste_list",
            ListKind::WorkTimes => "_arbeitszeiten_list",
        }
    }

    pub fn clear_prompt(&self) -> &'static str {
        match self {
            ListKind::Services => "Alle Gottesdienste dieser Aufzeichnung löschen?",
            ListKind::WorkTimes => "Alle Arbeitszeiten dieser Aufzeichnung löschen?",
        }
    }
}

/// Colour class for the rate column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateBadge {
    None,
    Low,
    Mid,
    High,
}

impl RateBadge {
    /// Rates use either decimal comma or point
    pub fn for_rate(rate: &str) -> Self {
        match rate.trim().replace(',', ".").parse::<f64>() {
            Ok(value) if value <= 1.5 => RateBadge::Low,
            Ok(value) if value <= 3.0 => RateBadge::Mid,
            Ok(value) if value.is_finite() => RateBadge::High,
            _ => RateBadge::None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RateBadge::None => "badge--none",
            RateBadge::Low => "badge--low",
            RateBadge::Mid => "badge--mid",
            RateBadge::High => "badge--high",
        }
    }
}

/// What one table row shows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowView {
    pub cells: Vec<String>,
    pub weekend: bool,
    /// Index of the cell rendered as a badge, with its class
    pub badge: Option<(usize, RateBadge)>,
}

/// One-line overview of the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub parish: String,
    pub role: String,
    pub month: String,
    pub services: usize,
    pub work_times: usize,
}

impl Summary {
    pub fn label(&self) -> String {
        let or_dash = |value: &str| if value.trim().is_empty() { "–".to_string() } else { value.trim().to_string() };
        format!(
            "{} · {} · {} · {} Gottesdienste, {} Arbeitszeiten",
            or_dash(&self.parish),
            or_dash(&self.role),
            or_dash(&self.month),
            self.services,
            self.work_times
        )
    }
}

/// Behaviour shared by both entry types
pub trait ListEntry: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    const KIND: ListKind;

    fn date(&self) -> &str;

    fn start(&self) -> &str;

    /// Field ids paired with the values that must be filled
    fn required(&self) -> Vec<(&'static str, &str)>;

    /// Snap start and end to the 5-minute grid
    fn round_times(&mut self) -> Result<(), ValidationError>;

    fn row(&self) -> RowView;
}

impl ListEntry for ServiceEntry {
    const KIND: ListKind = ListKind::Services;

    fn date(&self) -> &str {
        &self.date
    }

    fn start(&self) -> &str {
        &self.start
    }

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            (fields::SERVICE_LOCATION, self.location.trim()),
            (fields::SERVICE_DATE, self.date.trim()),
            (fields::SERVICE_RATE, self.rate.trim()),
            (fields::SERVICE_START, self.start.trim()),
            (fields::SERVICE_END, self.end.trim()),
        ]
    }

    fn round_times(&mut self) -> Result<(), ValidationError> {
        self.start = round_time_to_5_minutes(&self.start)?;
        self.end = round_time_to_5_minutes(&self.end)?;
        Ok(())
    }

    fn row(&self) -> RowView {
        RowView {
            cells: vec![
                self.location.clone(),
                self.date.clone(),
                self.rate.clone(),
                self.start.clone(),
                self.end.clone(),
            ],
            weekend: is_weekend(&self.date),
            badge: Some((2, RateBadge::for_rate(&self.rate))),
        }
    }
}

impl ListEntry for WorkTimeEntry {
    const KIND: ListKind = ListKind::WorkTimes;

    fn date(&self) -> &str {
        &self.date
    }

    fn start(&self) -> &str {
        &self.start
    }

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            (fields::WORK_DATE, self.date.trim()),
            (fields::WORK_START, self.start.trim()),
            (fields::WORK_END, self.end.trim()),
        ]
    }

    fn round_times(&mut self) -> Result<(), ValidationError> {
        self.start = round_time_to_5_minutes(&self.start)?;
        self.end = round_time_to_5_minutes(&self.end)?;
        Ok(())
    }

    fn row(&self) -> RowView {
        RowView {
            cells: vec![self.date.clone(), self.start.clone(), self.end.clone()],
            weekend: is_weekend(&self.date),
            badge: None,
        }
    }
}
