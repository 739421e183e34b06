use chrono::{DateTime, Utc};

/// Format used for audit-log timestamps, e.g. `2024-05-01 13:37:00 UTC`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Return the current time in UTC.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

pub fn format_log_timestamp(at: DateTime<Utc>) -> String {
    at.format(LOG_TIMESTAMP_FORMAT).to_string()
}
