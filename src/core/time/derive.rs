//! Timestamp derivation from date and time-of-day fragments
//!
//! Hospital systems record the arrival date once and every later workflow
//! stage as a bare time of day. These functions rebuild absolute instants in
//! the hospital's time zone. Later stages are anchored to an earlier instant
//! and roll over to the next day when their time of day precedes the anchor.

use crate::domain::FormatError;
use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;

/// Result of a derivation: `None` when a fragment is absent
pub type Derived = Result<Option<DateTime<Tz>>, FormatError>;

fn time_of_day_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d?\d):(\d\d)(?::\d\d)?$").unwrap())
}

/// Parses `H:MM`, `HH:MM`, `H:MM:SS` or `HH:MM:SS`; seconds are discarded
pub fn parse_time_of_day(time: &str) -> Result<NaiveTime, FormatError> {
    let invalid = || FormatError::TimeOfDay(time.to_string());

    let captures = time_of_day_pattern().captures(time).ok_or_else(invalid)?;
    let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
    let minute: u32 = captures[2].parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Keeps the date part of an ISO-style date or date-time string
pub fn normalize_date(date: &str) -> &str {
    match date.find('T') {
        Some(separator) => &date[..separator],
        None => date,
    }
}

/// Interprets a wall-clock time in `location`
///
/// An ambiguous time (clocks turned back) resolves to the earlier instant.
/// A time skipped by a daylight saving transition is an error.
pub fn localize(naive: NaiveDateTime, location: Tz) -> Result<DateTime<Tz>, FormatError> {
    match location.from_local_datetime(&naive) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(FormatError::NonexistentLocalTime(
            naive.format("%Y-%m-%d %H:%M").to_string(),
        )),
    }
}

/// Combines a date and a time of day into an instant in `location`
///
/// Returns `Ok(None)` if either fragment is empty. Anything after a `T` in
/// `date` is ignored, as are seconds in `time`.
///
/// # Errors
///
/// Returns a [`FormatError`] naming the offending string if `time` is not a
/// time of day, `date` is not `YYYY-MM-DD`, or the combination does not
/// exist in `location`.
///
/// # Examples
///
/// ```
/// use edflow::core::time::derive_absolute;
///
/// let arrival = derive_absolute("2017-01-01T12:21:25.65Z", "00:20:00", chrono_tz::Europe::Amsterdam)
///     .unwrap()
///     .unwrap();
/// assert_eq!(arrival.to_rfc3339(), "2017-01-01T00:20:00+01:00");
/// ```
pub fn derive_absolute(date: &str, time: &str, location: Tz) -> Derived {
    if date.is_empty() || time.is_empty() {
        return Ok(None);
    }

    let time_of_day = parse_time_of_day(time)?;
    let date_part = normalize_date(date);
    let day = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| FormatError::Date(date.to_string()))?;

    localize(day.and_time(time_of_day), location).map(Some)
}

/// Places a time of day on the anchor's calendar date in `location`
///
/// If the anchor's local time of day is strictly later than `time`, the
/// stage is taken to have happened after midnight and lands on the next
/// calendar day. Only the chosen date is interpreted in `location`, so a
/// time skipped on the anchor's date does not matter once it rolls over.
/// Gaps of more than one day are not representable.
///
/// Returns `Ok(None)` if the anchor is absent or `time` is empty.
///
/// # Errors
///
/// Returns a [`FormatError`] naming the offending string if `time` is not a
/// time of day or the result does not exist in `location`.
pub fn derive_relative(anchor: Option<&DateTime<Tz>>, time: &str, location: Tz) -> Derived {
    let Some(anchor) = anchor else {
        return Ok(None);
    };
    if time.is_empty() {
        return Ok(None);
    }

    let time_of_day = parse_time_of_day(time)?;
    let local_anchor = anchor.with_timezone(&location).naive_local();
    let mut day = local_anchor.date();
    if local_anchor.time() > time_of_day {
        day = day
            .checked_add_days(Days::new(1))
            .ok_or_else(|| FormatError::Date(day.to_string()))?;
    }

    localize(day.and_time(time_of_day), location).map(Some)
}
