//! Display Helpers
//!
//! Text truncation, Japanese-style date formatting and lenient timestamp
//! parsing for backend responses.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;

/// Excerpt length in the user's diary list
pub const LIST_EXCERPT_CHARS: usize = 80;

/// Excerpt length in the admin diary views
pub const ADMIN_EXCERPT_CHARS: usize = 150;

/// Cut `content` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts chars, not bytes, so Japanese text is never split mid-codepoint.
pub fn truncate(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        None => content.to_string(),
        Some((byte_idx, _)) => format!("{}...", &content[..byte_idx]),
    }
}

/// `2024年3月5日`
pub fn format_date<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%Y年%-m月%-d日").to_string()
}

/// `2024年3月5日 09:07`
pub fn format_date_time<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%Y年%-m月%-d日 %H:%M").to_string()
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 with an offset, or a naive ISO-8601 timestamp (what the
/// Python backend emits), which is taken to be UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(format!("invalid timestamp: {}", s))
}

/// serde adapter for [`parse_timestamp`]
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
