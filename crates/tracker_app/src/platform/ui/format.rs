use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Default cut-off for long cell text.
pub const DEFAULT_TRUNCATE: usize = 100;

/// Cuts `text` to `max_chars` characters and marks the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Renders an ISO date or timestamp as `Month D, YYYY`.
///
/// Anything unrecognised is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|stamp| stamp.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|stamp| stamp.date())
        });
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}
