//! Time helpers - business timezone conversion
//!
//! The allocation engine only sees naive local date/times; every conversion
//! from UTC to the restaurant's wall clock happens here, at the service layer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse an IANA timezone name, falling back to `fallback` when unknown
pub fn parse_timezone(name: &str, fallback: Tz) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse timezone '{}': {}, falling back to {}",
            name,
            e,
            fallback
        );
        fallback
    })
}

/// Wall-clock time of `now` in the restaurant timezone
pub fn local_now(now: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    now.with_timezone(&tz).naive_local()
}
