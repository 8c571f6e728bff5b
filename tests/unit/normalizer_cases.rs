// Parameterised cases for the event normalizer
// One row per input shape the external API is known to produce

use calendar_layout::services::normalizer::{coerce_date, coerce_time, normalize};
use calendar_layout::{EventStatus, Priority, ViewKind};
use serde_json::{json, Value};
use test_case::test_case;

#[test_case(json!("2024-06-10"), Some("2024-06-10") ; "iso date")]
#[test_case(json!("06/10/2024"), Some("2024-06-10") ; "us slashes")]
#[test_case(json!("2024/06/10"), Some("2024-06-10") ; "ymd slashes")]
#[test_case(json!("10.06.2024"), Some("2024-06-10") ; "european dots")]
#[test_case(json!("Jun 10, 2024"), Some("2024-06-10") ; "short month name")]
#[test_case(json!("10 June 2024"), Some("2024-06-10") ; "day month year")]
#[test_case(json!("2024-06-10T00:30:00-07:00"), Some("2024-06-10") ; "offset timestamp keeps written date")]
#[test_case(json!({"$date": "2024-06-10T08:00:00Z"}), Some("2024-06-10") ; "extended json")]
#[test_case(json!(1_717_977_600_000i64), Some("2024-06-10") ; "epoch millis")]
#[test_case(json!("31/02/2024"), None ; "impossible date")]
#[test_case(json!(""), None ; "blank")]
#[test_case(json!(["2024-06-10"]), None ; "array")]
fn test_coerce_date(input: Value, expected: Option<&str>) {
    let actual = coerce_date(&input).map(|d| d.format("%Y-%m-%d").to_string());
    assert_eq!(actual.as_deref(), expected);
}

#[test_case(json!("9:5"), Some("09:05") ; "unpadded")]
#[test_case(json!("09:05"), Some("09:05") ; "padded")]
#[test_case(json!("9"), Some("09:00") ; "hour only")]
#[test_case(json!("09:05:45.123"), Some("09:05") ; "fractional seconds")]
#[test_case(json!("11:45 pm"), Some("23:45") ; "lowercase pm")]
#[test_case(json!("12:15AM"), Some("00:15") ; "midnight hour am")]
#[test_case(json!("2024-06-10T07:20:00+02:00"), Some("07:20") ; "timestamp with offset")]
#[test_case(json!("24:00"), Some("00:00") ; "end of day")]
#[test_case(json!(13.25), Some("13:15") ; "decimal hours")]
#[test_case(json!("2024-06-10 14:00"), Some("14:00") ; "space separated timestamp")]
#[test_case(json!("2024-06-10 14:00:30.25"), Some("14:00") ; "space separated with seconds")]
#[test_case(json!("9.30"), Some("09:30") ; "dotted clock")]
#[test_case(json!("10.45 pm"), Some("22:45") ; "dotted clock with meridiem")]
#[test_case(json!("9.3"), None ; "dotted clock single minute digit")]
#[test_case(json!("24:30"), None ; "past end of day")]
#[test_case(json!("9:75"), None ; "bad minutes")]
#[test_case(json!(null), None ; "null")]
fn test_coerce_time(input: Value, expected: Option<&str>) {
    let actual = coerce_time(&input).map(|t| t.format("%H:%M").to_string());
    assert_eq!(actual.as_deref(), expected);
}

#[test_case(json!({"eventType": "a"}) ; "camel case")]
#[test_case(json!({"event_type": "a"}) ; "snake case")]
#[test_case(json!({"eventtype": "a"}) ; "flat lowercase")]
#[test_case(json!({"type": "a"}) ; "bare type")]
#[test_case(json!({"eventType": "a", "event_type": "b", "eventtype": "c"}) ; "camel case wins")]
fn test_event_type_aliases(record: Value) {
    assert_eq!(normalize(&record).event_type.as_deref(), Some("a"));
}

#[test_case("high", Some(Priority::High))]
#[test_case("Medium", Some(Priority::Medium))]
#[test_case(" low ", Some(Priority::Low))]
#[test_case("whenever", None)]
fn test_priority_values(raw: &str, expected: Option<Priority>) {
    assert_eq!(normalize(&json!({"priority": raw})).priority, expected);
}

#[test_case("Pending", Some(EventStatus::Pending))]
#[test_case("In Progress", Some(EventStatus::InProgress))]
#[test_case("in_progress", Some(EventStatus::InProgress))]
#[test_case("canceled", Some(EventStatus::Cancelled))]
#[test_case("done", Some(EventStatus::Completed))]
#[test_case("??", None)]
fn test_status_values(raw: &str, expected: Option<EventStatus>) {
    assert_eq!(normalize(&json!({"eventStatus": raw})).event_status, expected);
}

#[test_case("day", Some(ViewKind::Day))]
#[test_case("WEEK", Some(ViewKind::Week))]
#[test_case("monthly", Some(ViewKind::Month))]
#[test_case("year", None)]
fn test_form_type_values(raw: &str, expected: Option<ViewKind>) {
    assert_eq!(normalize(&json!({"form_type": raw})).form_type, expected);
}

#[test]
fn test_space_separated_timestamps_stay_timed() {
    let event = normalize(&json!({"start": "2024-06-10 14:00", "end": "2024-06-10 15:00"}));
    assert_eq!(event.date.map(|d| d.to_string()).as_deref(), Some("2024-06-10"));
    assert_eq!(event.start_time.map(|t| t.format("%H:%M").to_string()).as_deref(), Some("14:00"));
    assert_eq!(event.end_time.map(|t| t.format("%H:%M").to_string()).as_deref(), Some("15:00"));
    assert!(event.is_timed());
}

#[test]
fn test_dotted_clock_times() {
    let event = normalize(&json!({"date": "2024-06-10", "startTime": "9.30", "endTime": "10.45"}));
    assert_eq!(event.start_time.map(|t| t.format("%H:%M").to_string()).as_deref(), Some("09:30"));
    assert_eq!(event.end_time.map(|t| t.format("%H:%M").to_string()).as_deref(), Some("10:45"));
}

#[test]
fn test_canonical_output_shape() {
    let event = normalize(&json!({
        "event_type": "meeting",
        "start_time": "9:5",
        "date": "06/10/2024"
    }));
    let out = serde_json::to_value(&event).unwrap();
    assert_eq!(out["eventtype"], json!("meeting"));
    assert_eq!(out["startTime"], json!("09:05"));
    assert_eq!(out["date"], json!("2024-06-10"));
    assert_eq!(out["endTime"], json!(""));
}
