//! `generation` dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// `$Date: 2008/06/18 22:52:35 $`, as left behind by CVS keyword expansion.
const CVS_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Parses a `generation` date. Unparseable or empty values become the current time.
pub fn parse_generation_date(value: &str) -> DateTime<Utc> {
    let value = value.trim();
    if value.is_empty() {
        return Utc::now();
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return date.with_timezone(&Utc);
    }
    for format in NAIVE_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return date.and_utc();
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return midnight.and_utc();
    }
    if let Some(cvs) = value
        .strip_prefix("$Date:")
        .and_then(|rest| rest.strip_suffix('$'))
    {
        if let Ok(date) = NaiveDateTime::parse_from_str(cvs.trim(), CVS_FORMAT) {
            return date.and_utc();
        }
    }
    log::debug!("Unrecognized generation date '{}', using the current time", value);
    Utc::now()
}

/// Formats a date the way `generation` stores it: `2024-01-31T12:00:00`.
pub fn format_generation_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}
