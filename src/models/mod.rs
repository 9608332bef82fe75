pub mod product;

use chrono::{DateTime, SecondsFormat, Utc};

/// Millisecond timestamp used as a record id.
pub fn time_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// ISO-8601 creation stamp with millisecond precision.
pub fn created_at(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
