//! Time parsing for snapshot timestamps.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parse a snapshot valid time.
///
/// Accepts RFC 3339 (`2024-05-10T12:30:00Z`), naive timestamps with a `T`
/// or space separator and optional seconds, and the compact `202405101230`
/// form. Naive timestamps are taken as UTC.
pub fn parse_valid_time(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    const FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y%m%d%H%M",
    ];
    for format in FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}
