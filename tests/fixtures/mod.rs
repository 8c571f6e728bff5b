// Test fixtures - reusable test data
// Raw API records in the shapes the normalizer has to cope with, plus the
// reference dates the integration tests are written against.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, June 10 2024
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    pub fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()
    }

    /// Sunday that starts the week containing `today()`
    pub fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
    }

    /// Today at 08:30
    pub fn morning() -> NaiveDateTime {
        today().and_hms_opt(8, 30, 0).unwrap()
    }

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

/// Raw event records as the external API returns them
pub mod records {
    use super::*;

    /// A week of records using every naming convention the API has produced.
    pub fn mixed_week() -> Vec<Value> {
        vec![
            json!({
                "id": "standup",
                "date": "2024-06-10",
                "startTime": "09:00",
                "endTime": "09:30",
                "eventtype": "meeting",
                "employees": ["ana", "bo"]
            }),
            json!({
                "event_id": "review",
                "start_date": "06/10/2024",
                "start_time": "9:15",
                "end_time": "10:00",
                "event_type": "review",
                "attendees": [{"_id": "ana"}, {"name": "cy"}]
            }),
            json!({
                "_id": "lunch",
                "start": "2024-06-10T12:00:00",
                "end": "2024-06-10T13:00:00",
                "status": "pending"
            }),
            json!({
                "id": "offsite",
                "startDate": "2024-06-11",
                "endDate": "2024-06-13",
                "formType": "month"
            }),
            json!({
                "id": "conference",
                "date": "2024-06-12",
                "end_date": "2024-06-18"
            }),
            json!({
                "id": "broken",
                "date": "2024-06-14",
                "startTime": "sometime"
            }),
            json!({
                "id": "late-shift",
                "date": "2024-06-14",
                "startTime": "22:00",
                "endTime": "00:00"
            }),
            json!({
                "id": "next-month",
                "date": "2024-07-02",
                "startTime": "10:00",
                "endTime": "11:00"
            }),
        ]
    }

    pub fn mixed_week_json() -> String {
        Value::Array(mixed_week()).to_string()
    }
}
