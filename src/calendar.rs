//! Calendar Helpers
//!
//! Month selection (`MM/YYYY`), month bounds, dropdown options, 5-minute
//! rounding and weekday keys.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::error::ValidationError;

/// Month picked in the month/year dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSelection {
    pub year: i32,
    pub month: u32,
}

impl MonthSelection {
    /// Parse a dropdown value like `03/2026`
    pub fn parse(value: &str) -> Option<Self> {
        let (month, year) = value.trim().split_once('/')?;
        if month.len() != 2 || year.len() != 4 {
            return None;
        }
        if !month.chars().chain(year.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }
        let month: u32 = month.parse().ok()?;
        let year: i32 = year.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// Dropdown value, `MM/YYYY`
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }

    /// Path segment used by the time-record endpoint, `YYYY-MM`
    pub fn api_key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn bounds(&self) -> Option<DateBounds> {
        let first = self.first_day()?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(DateBounds { first, last })
    }
}

/// First and last calendar day of a month, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateBounds {
    /// Whether an ISO date string lies in the bounds. Unparsable dates never do.
    pub fn contains(&self, date: &str) -> bool {
        parse_iso_date(date).is_some_and(|d| d >= self.first && d <= self.last)
    }

    pub fn min_iso(&self) -> String {
        self.first.format("%Y-%m-%d").to_string()
    }

    pub fn max_iso(&self) -> String {
        self.last.format("%Y-%m-%d").to_string()
    }
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Dropdown values from `past` months before `today` to `future` months after
pub fn month_options(today: NaiveDate, past: u32, future: u32) -> Vec<String> {
    let Some(start) = today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(past)))
    else {
        return Vec::new();
    };
    (0..=past + future)
        .filter_map(|offset| start.checked_add_months(Months::new(offset)))
        .map(|d| MonthSelection::from_date(d).label())
        .collect()
}

/// Round `HH:MM` to the nearest 5 minutes, wrapping past midnight.
///
/// Empty input stays empty.
pub fn round_time_to_5_minutes(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    let invalid = || ValidationError::InvalidTime(value.to_string());
    let (h, m) = value.split_once(':').ok_or_else(invalid)?;
    let mut hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    let mut rounded = (minutes + 2) / 5 * 5;
    if rounded == 60 {
        hours = (hours + 1) % 24;
        rounded = 0;
    }
    Ok(format!("{:02}:{:02}", hours, rounded))
}

/// German two-letter weekday of an ISO date, as used in time-default keys
pub fn weekday_key(date: &str) -> Option<&'static str> {
    let key = match parse_iso_date(date)?.weekday() {
        Weekday::Sun => "So",
        Weekday::Mon => "Mo",
        Weekday::Tue => "Di",
        Weekday::Wed => "Mi",
        Weekday::Thu => "Do",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
    };
    Some(key)
}

pub fn is_weekend(date: &str) -> bool {
    parse_iso_date(date).is_some_and(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_dropdown_value() {
        assert_eq!(MonthSelection::parse(" 02/2024 "), Some(MonthSelection { year: 2024, month: 2 }));
        assert_eq!(MonthSelection::parse("2/2024"), None);
        assert_eq!(MonthSelection::parse("13/2024"), None);
        assert_eq!(MonthSelection::parse("00/2024"), None);
        assert_eq!(MonthSelection::parse(""), None);
    }

    #[test]
    fn bounds_cover_whole_month() {
        let bounds = MonthSelection { year: 2024, month: 2 }.bounds().unwrap();
        assert_eq!(bounds.min_iso(), "2024-02-01");
        assert_eq!(bounds.max_iso(), "2024-02-29");

        let december = MonthSelection { year: 2025, month: 12 }.bounds().unwrap();
        assert_eq!(december.max_iso(), "2025-12-31");
    }

    #[test]
    fn contains_checks_both_ends() {
        let bounds = MonthSelection { year: 2026, month: 4 }.bounds().unwrap();
        assert!(bounds.contains("2026-04-01"));
        assert!(bounds.contains("2026-04-30"));
        assert!(!bounds.contains("2026-03-31"));
        assert!(!bounds.contains("2026-05-01"));
        assert!(!bounds.contains(""));
        assert!(!bounds.contains("garbage"));
    }

    #[test]
    fn api_key_is_sortable() {
        assert_eq!(MonthSelection { year: 2026, month: 3 }.api_key(), "2026-03");
        assert_eq!(MonthSelection { year: 2026, month: 3 }.label(), "03/2026");
    }

    #[test]
    fn month_options_span_past_and_future() {
        let options = month_options(date(2026, 10, 18), 12, 24);
        assert_eq!(options.len(), 37);
        assert_eq!(options.first().unwrap(), "10/2025");
        assert_eq!(options[12], "10/2026");
        assert_eq!(options.last().unwrap(), "10/2028");
    }

    #[test]
    fn rounds_to_nearest_five_minutes() {
        assert_eq!(round_time_to_5_minutes("09:07").unwrap(), "09:05");
        assert_eq!(round_time_to_5_minutes("10:03").unwrap(), "10:05");
        assert_eq!(round_time_to_5_minutes("10:00").unwrap(), "10:00");
        assert_eq!(round_time_to_5_minutes("8:12").unwrap(), "08:10");
        assert_eq!(round_time_to_5_minutes("10:58").unwrap(), "11:00");
        assert_eq!(round_time_to_5_minutes("23:58").unwrap(), "00:00");
        assert_eq!(round_time_to_5_minutes("").unwrap(), "");
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(round_time_to_5_minutes("25:00").is_err());
        assert!(round_time_to_5_minutes("10:75").is_err());
        assert!(round_time_to_5_minutes("abc").is_err());
    }

    #[test]
    fn weekday_keys_are_german() {
        // 2026-10-18 is a Sunday
        assert_eq!(weekday_key("2026-10-18"), Some("So"));
        assert_eq!(weekday_key("2026-10-19"), Some("Mo"));
        assert_eq!(weekday_key(""), None);
        assert!(is_weekend("2026-10-17"));
        assert!(!is_weekend("2026-10-16"));
    }
}
