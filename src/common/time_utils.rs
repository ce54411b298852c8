use chrono::{DateTime, SecondsFormat, Utc};

/// Format an instant the way browsers print `Date.toISOString()`
pub fn to_iso_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Get current timestamp as an ISO-8601 UTC string
pub fn current_timestamp() -> String {
    to_iso_timestamp(Utc::now())
}

/// Parse an ISO-8601 timestamp, accepting any RFC 3339 offset
pub fn parse_iso_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
