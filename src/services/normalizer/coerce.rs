//! Lenient value coercion. Every function returns `None` (or empty) instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::Value;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const EMPLOYEE_ID_KEYS: &[&str] = &["_id", "id", "employeeId", "employee_id", "value", "email", "name"];

/// Non-blank text, with numbers and booleans stringified.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Any parsable date-like value: ISO dates, RFC 3339 timestamps (wall-clock date
/// as written), common US/EU layouts, epoch milliseconds (UTC) and `{"$date": ...}`.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc().date())
        }
        Value::Object(map) => map.get("$date").and_then(coerce_date),
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }

    // "2024-06-10T..." with a timestamp tail we do not understand
    let separator = s.as_bytes().get(10).copied()?;
    if separator != b'T' && separator != b' ' {
        return None;
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Any time-like value: `9:5`, `09:05:00`, `9:05 PM`, timestamps (time part),
/// or decimal hours as a number. `24:00` becomes `00:00`.
pub fn coerce_time(value: &Value) -> Option<NaiveTime> {
    match value {
        Value::String(s) => parse_time_str(s),
        Value::Number(n) => {
            let decimal = n.as_f64()?;
            if !(0.0..=24.0).contains(&decimal) {
                return None;
            }
            let minutes = (decimal * 60.0).round() as u32 % (24 * 60);
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        }
        Value::Object(map) => map.get("$date").and_then(coerce_time),
        _ => None,
    }
}

fn parse_time_str(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0);
    }

    let mut s = strip_date_prefix(trimmed).to_ascii_uppercase();

    let meridiem = if let Some(rest) = s.strip_suffix("AM") {
        s = rest.trim_end().to_string();
        Some(false)
    } else if let Some(rest) = s.strip_suffix("PM") {
        s = rest.trim_end().to_string();
        Some(true)
    } else {
        None
    };

    // drop zone designators
    let clock = s.split(['Z', '+', '-']).next().unwrap_or_default().trim();
    let (mut hour, minute) = parse_clock(clock)?;

    if let Some(pm) = meridiem {
        if hour == 0 || hour > 12 {
            return None;
        }
        hour = hour % 12 + if pm { 12 } else { 0 };
    }

    if hour == 24 && minute == 0 {
        return Some(NaiveTime::MIN);
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Time portion of `YYYY-MM-DDThh:mm...` or `YYYY-MM-DD hh:mm...`, otherwise the input.
fn strip_date_prefix(s: &str) -> &str {
    let has_date = s
        .get(..10)
        .is_some_and(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok());
    match s.as_bytes().get(10) {
        Some(b'T' | b't' | b' ') if has_date => s[11..].trim_start(),
        _ => s,
    }
}

/// `H`, `H:M`, `HH:MM:SS[.fff]` or dotted `HH.MM`. Seconds are dropped.
fn parse_clock(clock: &str) -> Option<(u32, u32)> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    if clock.contains(':') {
        let mut parts = clock.split(':');
        let hour = parts.next().filter(|p| all_digits(p))?;
        let minute = parts.next().filter(|p| all_digits(p))?;
        if let Some(seconds) = parts.next() {
            let whole = seconds.split('.').next().unwrap_or_default();
            if !all_digits(whole) || parts.next().is_some() {
                return None;
            }
        }
        return Some((hour.parse().ok()?, minute.parse().ok()?));
    }

    if let Some((hour, minute)) = clock.split_once('.') {
        if all_digits(hour) && minute.len() == 2 && all_digits(minute) {
            return Some((hour.parse().ok()?, minute.parse().ok()?));
        }
        return None;
    }

    all_digits(clock).then(|| clock.parse().ok()).flatten().map(|hour| (hour, 0))
}

/// Flatten an attendee list (strings, numbers, objects, or a comma-separated
/// string) into unique identifiers, first occurrence wins.
pub fn coerce_employees(value: &Value) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let mut push = |id: String| {
        if !ids.contains(&id) {
            ids.push(id);
        }
    };

    match value {
        Value::Array(items) => {
            for item in items {
                if let Some(id) = employee_id(item) {
                    push(id);
                }
            }
        }
        Value::String(s) => {
            for part in s.split(',') {
                let part = part.trim();
                if !part.is_empty() {
                    push(part.to_string());
                }
            }
        }
        other => {
            if let Some(id) = employee_id(other) {
                push(id);
            }
        }
    }

    ids
}

fn employee_id(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => EMPLOYEE_ID_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(coerce_string),
        other => coerce_string(other),
    }
}
