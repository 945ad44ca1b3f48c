//! Non-fuzzy date and time parsing.
//!
//! [`parse_datetime`] accepts a value only when the whole trimmed string
//! matches one of a fixed list of layouts; nothing is skipped or guessed from
//! surrounding text. Month-first layouts are tried before day-first ones, so
//! `01/02/2023` reads as January 2nd while `25/12/2023` still parses.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static DATE_DMY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%B %d, %Y %H:%M:%S%.f",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M %p",
    "%d %B %Y %H:%M:%S%.f",
    "%d %B %Y %H:%M",
    "%Y%m%dT%H%M%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%Y%m%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Parses a date, date-time or bare time of day.
///
/// Dates without a time resolve to midnight. Bare times are anchored to
/// 1970-01-01. Values carrying a UTC offset keep their wall-clock time.
///
/// ```rust
/// use chrono::Timelike;
/// use schema_infer::temporal::parse_datetime;
///
/// let dt = parse_datetime("2023-04-01 14:30:00").unwrap();
/// assert_eq!(dt.hour(), 14);
/// assert!(parse_datetime("next tuesday").is_none());
/// ```
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(value, format) {
            return NaiveDate::from_ymd_opt(1970, 1, 1).map(|date| date.and_time(time));
        }
    }
    None
}

/// True when any of hour, minute or second is nonzero.
pub fn has_time_component(dt: &NaiveDateTime) -> bool {
    dt.hour() != 0 || dt.minute() != 0 || dt.second() != 0
}

/// True when hour, minute and second are all zero.
pub fn is_midnight(dt: &NaiveDateTime) -> bool {
    !has_time_component(dt)
}

/// Strict `YYYY-MM-DD` layout check, no calendar validation.
pub fn matches_ymd(value: &str) -> bool {
    DATE_YMD.is_match(value)
}

/// Strict `DD/MM/YYYY` layout check, no calendar validation.
pub fn matches_dmy(value: &str) -> bool {
    DATE_DMY.is_match(value)
}
