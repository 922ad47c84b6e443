//! Time utility functions

use chrono::Utc;

/// Current UTC time as ISO 8601 with microsecond precision and Z suffix.
///
/// Matches the timestamp format of exported observations, so lexicographic
/// comparisons against exported start/end times stay valid.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
