//! ISO-8601 date parsing and display for article front matter.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Date-time layouts accepted without an explicit offset.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date or date-time.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` and either of those
/// with a `Z` or `±HH:MM` suffix. Values without an offset are taken as UTC.
pub fn parse_iso8601(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt);
    }

    let naive = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok()
        .or_else(|| {
            NAIVE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        })?;

    Some(naive.and_utc().fixed_offset())
}

/// Full human-readable date, e.g. `January 1, 2024`.
///
/// Rendered in the value's own offset, so the day written in the source
/// is the day displayed.
pub fn format_full_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// `YYYY-MM-DD` form used for the `datetime` attribute of `<time>`.
pub fn format_iso_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Instant used for ordering articles.
pub fn sort_key(dt: &DateTime<FixedOffset>) -> DateTime<Utc> {
    dt.with_timezone(&Utc)
}
