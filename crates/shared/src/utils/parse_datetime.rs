use chrono::{DateTime, NaiveDate, Utc};

/// Parses an RFC 3339 timestamp, returning `None` for empty or malformed input.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if value.trim().is_empty() {
        None
    } else {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_query_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    if let Some(dt) = parse_datetime(value) {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("'{value}' is not a valid ISO date"))
}
