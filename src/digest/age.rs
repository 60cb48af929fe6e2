use chrono::{DateTime, Utc};

const HOURS_PER_DAY: i64 = 24;

/// Whole days elapsed between an RFC 3339 timestamp and `now`.
///
/// Unparseable timestamps count as 0 days.
pub fn days_since(timestamp: &str, now: DateTime<Utc>) -> i64 {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(created) => (now - created.with_timezone(&Utc)).num_hours() / HOURS_PER_DAY,
        Err(err) => {
            log::debug!("cannot parse timestamp '{}': {}", timestamp, err);
            0
        }
    }
}
