//! Storage Keys
//!
//! Every localStorage key the form uses is built here. Partition keys isolate
//! one entry list per parish, month and role.

use crate::calendar::weekday_key;

/// Separator between key components, never allowed inside a component
pub const SEPARATOR: char = '|';

pub const UNKNOWN_PARISH: &str = "UNKNOWN_PARISH";
pub const NO_MONTH: &str = "NO_MONTH";
pub const NO_ROLE: &str = "NO_ROLE";

pub const PROFILE_KEY: &str = "za_profile_v1";
pub const PANELS_KEY: &str = "za_panels_v1";
const TIMES_PREFIX: &str = "za_times_v1";
const SAVE_STAMP_PREFIX: &str = "za_saved_v1";

/// Trim, collapse inner whitespace to single spaces and drop the separator
pub fn normalize_key_part(part: &str) -> String {
    part.split_whitespace()
        .map(|word| word.replace(SEPARATOR, ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn part_or(part: &str, sentinel: &str) -> String {
    let normalized = normalize_key_part(part);
    if normalized.is_empty() {
        sentinel.to_string()
    } else {
        normalized
    }
}

/// Builds partition keys for one kind of list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBuilder {
    prefix: &'static str,
}

impl KeyBuilder {
    pub const SERVICES: KeyBuilder = KeyBuilder { prefix: "za_gd_v3" };
    pub const WORK_TIMES: KeyBuilder = KeyBuilder { prefix: "za_az_v2" };

    /// `prefix|parish|month[|role]`, never empty in any component
    pub fn partition_key(&self, parish: &str, month: &str, role: Option<&str>) -> String {
        let mut key = format!(
            "{prefix}{sep}{parish}{sep}{month}",
            prefix = self.prefix,
            sep = SEPARATOR,
            parish = part_or(parish, UNKNOWN_PARISH),
            month = part_or(month, NO_MONTH),
        );
        if let Some(role) = role {
            key.push(SEPARATOR);
            key.push_str(&part_or(role, NO_ROLE));
        }
        key
    }
}

/// Time defaults are remembered per parish
pub fn times_key(parish: &str) -> String {
    format!("{}{}{}", TIMES_PREFIX, SEPARATOR, part_or(parish, UNKNOWN_PARISH))
}

/// Entry key inside the time-defaults map: `location|weekday`
pub fn defaults_entry_key(location: &str, date: &str) -> Option<String> {
    let location = normalize_key_part(location);
    let weekday = weekday_key(date)?;
    if location.is_empty() {
        return None;
    }
    Some(format!("{}{}{}", location, SEPARATOR, weekday))
}

pub fn save_stamp_key(month_key: &str) -> String {
    format!("{}{}{}", SAVE_STAMP_PREFIX, SEPARATOR, part_or(month_key, NO_MONTH))
}
