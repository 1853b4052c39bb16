//! Timestamp helpers.
//!
//! All timestamps in the application are Unix milliseconds (UTC). Consumers
//! order messages by this value, not by arrival order.

use chrono::{DateTime, Utc};

/// Get the current Unix timestamp in milliseconds (UTC).
pub fn now_unix_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix millisecond timestamp to an RFC 3339 string.
///
/// Out-of-range values fall back to the Unix epoch rather than panicking.
pub fn unix_ms_to_rfc3339(unix_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(unix_ms)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp_millis(0).unwrap())
        .to_rfc3339()
}
