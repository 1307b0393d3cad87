//! Release calendar helpers
//!
//! Dates travel through the version file as `YYYYMMDD`. The engine never reads
//! the wall clock; callers resolve "today" once with [`today_at_offset`] and
//! pass it down.

use crate::error::{ReleaseError, Result};
use chrono::{Datelike, Duration, FixedOffset, NaiveDate, Utc, Weekday};

const BUILD_DATE_FORMAT: &str = "%Y%m%d";

/// Today's date in the release timezone, given as whole hours east of UTC.
pub fn today_at_offset(utc_offset_hours: i32) -> Result<NaiveDate> {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).ok_or_else(|| {
        ReleaseError::config(format!(
            "utc_offset_hours out of range: {}",
            utc_offset_hours
        ))
    })?;
    Ok(Utc::now().with_timezone(&offset).date_naive())
}

/// Parse a forced build date given as `YYYYMMDD`.
pub fn parse_build_date(value: &str) -> Result<NaiveDate> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ReleaseError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, BUILD_DATE_FORMAT)
        .map_err(|_| ReleaseError::InvalidDate(value.to_string()))
}

/// Render a date as `YYYYMMDD`.
pub fn format_build_date(date: NaiveDate) -> String {
    date.format(BUILD_DATE_FORMAT).to_string()
}

/// The date as the integer `YYYYMMDD`.
pub fn date_number(date: NaiveDate) -> u64 {
    date.year() as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

/// Releases land on Mondays: today if it is one, otherwise the upcoming Monday.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(days_ahead))
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}
