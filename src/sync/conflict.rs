//! Conflict Policy
//!
//! Decides whether a record loaded from the server may overwrite local state.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::cache::SaveStamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A fresh local save exists, push it again instead of loading
    KeepLocal,
    TakeServer,
}

/// Server timestamps come as RFC 3339 or as SQL `YYYY-MM-DD HH:MM:SS` in UTC
pub fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Keep local only if the last local save is younger than `window` and the
/// record it produced is not older than the one on the server.
///
/// Age is measured on the local clock, ordering on server timestamps only.
/// An unparsable timestamp on either side does not count against the local
/// save.
pub fn resolve(
    local: Option<&SaveStamp>,
    server_updated_at: &str,
    now: DateTime<Utc>,
    window: Duration,
) -> Resolution {
    let Some(local) = local else {
        return Resolution::TakeServer;
    };
    let Some(saved_at) = DateTime::from_timestamp_millis(local.saved_at_ms) else {
        return Resolution::TakeServer;
    };
    let age = now.signed_duration_since(saved_at);
    let fresh = age >= chrono::Duration::zero()
        && age.to_std().map(|age| age < window).unwrap_or(false);
    if !fresh {
        return Resolution::TakeServer;
    }
    match (
        parse_server_timestamp(&local.server_updated_at),
        parse_server_timestamp(server_updated_at),
    ) {
        (Some(ours), Some(theirs)) if ours < theirs => Resolution::TakeServer,
        _ => Resolution::KeepLocal,
    }
}
