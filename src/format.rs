use chrono::{DateTime, NaiveDate};

const MISSING: &str = "—";

/// Formats a playback position as `m:ss`.
pub fn format_time(milliseconds: i64) -> String {
    if milliseconds <= 0 {
        return "0:00".to_string();
    }

    let total_seconds = milliseconds / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Formats a track length as `Xm YYs`.
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) if s > 0 => format!("{}m {:02}s", s / 60, s % 60),
        _ => MISSING.to_string(),
    }
}

/// Formats an ISO date (`2010-05-14` or RFC 3339). Unparsable input is
/// returned unchanged.
pub fn format_release_date(iso: Option<&str>) -> String {
    let Some(iso) = iso.filter(|s| !s.trim().is_empty()) else {
        return MISSING.to_string();
    };

    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(iso).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => iso.to_string(),
    }
}
