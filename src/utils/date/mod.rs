// Date utility functions
// Conversions between HH:MM strings, decimal hours and calendar dates.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Parse an `HH:MM` string into decimal hours (`9:30` -> `9.5`).
///
/// Missing or malformed input yields `0.0`. Minutes may be omitted (`"9"` -> `9.0`).
/// `24:00` is accepted so that end-of-day boundaries survive a round trip.
pub fn to_decimal_hours(time: &str) -> f64 {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let mut parts = trimmed.splitn(2, ':');
    let hour = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minute = match parts.next() {
        Some(m) => m.trim().parse::<u32>().ok(),
        None => Some(0),
    };

    match (hour, minute) {
        (Some(h), Some(m)) if h < 24 && m < 60 => h as f64 + m as f64 / 60.0,
        (Some(24), Some(0)) => 24.0,
        _ => 0.0,
    }
}

/// Format decimal hours as a zero-padded `HH:MM` string.
///
/// Minutes round to the nearest integer. Hour 24 (and anything past it) wraps,
/// so `24.0` formats as `00:00`. Negative and non-finite input clamps to `00:00`.
pub fn decimal_to_time(decimal: f64) -> String {
    let total = decimal_to_minutes(decimal) % MINUTES_PER_DAY;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Convert decimal hours into whole minutes since midnight (rounded, never negative).
pub fn decimal_to_minutes(decimal: f64) -> u32 {
    if !decimal.is_finite() || decimal <= 0.0 {
        return 0;
    }
    (decimal * MINUTES_PER_HOUR as f64).round() as u32
}

/// Decimal hours for a wall-clock time.
pub fn time_to_decimal(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0
}

/// Decimal hours of the wall clock at `now`.
pub fn now_decimal(now: NaiveDateTime) -> f64 {
    time_to_decimal(now.time())
}

/// End hour with the midnight-rollover convention applied.
///
/// An end of `00:00` after a non-zero start means "midnight at the end of the
/// same day", so it becomes `24.0`.
pub fn effective_end_decimal(start: f64, end: f64) -> f64 {
    if end == 0.0 && start > 0.0 {
        24.0
    } else {
        end
    }
}

/// Strip the time of day.
pub fn normalize_to_midnight(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Inclusive, ascending list of dates between `start` and `end`.
///
/// The bounds may be given in either order; the result always runs from the
/// earlier to the later date.
pub fn enumerate_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let (first, last) = if start <= end { (start, end) } else { (end, start) };
    first.iter_days().take_while(|d| *d <= last).collect()
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 12-hour display string (`hh:MM AM/PM`) for minutes since midnight.
///
/// Both 0 and 1440 (hour 24) display as `12:00 AM`.
pub fn format_12h(total_minutes: u32) -> String {
    let minutes = total_minutes % MINUTES_PER_DAY;
    let hour = minutes / 60;
    let minute = minutes % 60;
    let period = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02} {}", display_hour, minute, period)
}
