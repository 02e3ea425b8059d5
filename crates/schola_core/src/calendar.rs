//! Calendar helpers shared by validation and day-scoped views.
//!
//! Dates travel as ISO calendar-day strings (`YYYY-MM-DD`) and clock times as
//! zero-padded 24-hour `HH:MM` strings. Zero padding is what makes plain
//! string comparison a valid ordering for both.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

/// Storage format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));
static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock time regex"));

/// Parses a strict `YYYY-MM-DD` day key.
///
/// Returns `None` for non-padded input (`2024-1-5`) or impossible days
/// (`2024-02-30`).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Formats a day as its storage key.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns whether `value` is a zero-padded 24-hour `HH:MM` time.
pub fn is_clock_time(value: &str) -> bool {
    CLOCK_TIME_RE.is_match(value)
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day-of-week index used by timetable entries: Sunday = 0 ... Saturday = 6.
pub fn day_of_week(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..=6
    date.weekday().num_days_from_sunday() as u8
}

/// English short label for a timetable day index.
pub fn day_label(day_of_week: u8) -> Option<&'static str> {
    const LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    LABELS.get(usize::from(day_of_week)).copied()
}

/// Monday of the week containing `anchor`.
pub fn week_start(anchor: NaiveDate) -> NaiveDate {
    anchor.week(Weekday::Mon).first_day()
}

/// The seven days (Monday first) of the week containing `anchor`.
pub fn week_days(anchor: NaiveDate) -> Vec<NaiveDate> {
    week_start(anchor).iter_days().take(7).collect()
}

/// Monday of the week before the one containing `anchor`.
pub fn previous_week(anchor: NaiveDate) -> NaiveDate {
    let start = week_start(anchor);
    start.checked_sub_days(Days::new(7)).unwrap_or(start)
}

/// Monday of the week after the one containing `anchor`.
pub fn next_week(anchor: NaiveDate) -> NaiveDate {
    let start = week_start(anchor);
    start.checked_add_days(Days::new(7)).unwrap_or(start)
}
