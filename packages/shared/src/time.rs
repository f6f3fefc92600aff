//! Time helpers: millisecond Unix timestamps and their RFC 3339 rendering.

use chrono::{DateTime, Utc};

/// Current Unix timestamp in milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a millisecond Unix timestamp as RFC 3339 in UTC.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339()
}
