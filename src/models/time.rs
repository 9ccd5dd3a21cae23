//! Timestamp parsing and relative formatting.
//!
//! The API emits both RFC 3339 strings and naive ISO-8601 strings without an
//! offset; naive values are taken as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a server timestamp.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format `raw` relative to `now`, e.g. `5m ago`.
///
/// Unparseable input is returned unchanged.
pub fn format_relative_to(raw: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    let secs = (now - then).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 7 * 86_400 {
        format!("{}d ago", secs / 86_400)
    } else {
        then.format("%b %d, %Y").to_string()
    }
}

/// Format an optional server timestamp relative to the current time.
pub fn format_relative(raw: Option<&str>) -> String {
    raw.map(|raw| format_relative_to(raw, Utc::now()))
        .unwrap_or_default()
}

/// Format an uptime in seconds as `3d 4h` / `5h 2m` / `42s`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}
