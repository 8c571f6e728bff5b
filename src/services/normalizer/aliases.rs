//! Canonical field -> ordered source aliases.
//!
//! camelCase first, then snake_case, then the alternate spellings seen in the wild.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Id,
    Date,
    EndDate,
    StartTime,
    EndTime,
    Priority,
    EventType,
    Subtype,
    Mode,
    Agenda,
    Link,
    Employees,
    EventStatus,
    FormType,
}

pub const FIELD_ALIASES: &[(CanonicalField, &[&str])] = &[
    (CanonicalField::Id, &["id", "eventId", "event_id", "_id", "eventid"]),
    (
        CanonicalField::Date,
        &["date", "startDate", "start_date", "eventDate", "event_date", "startdate", "start"],
    ),
    (CanonicalField::EndDate, &["endDate", "end_date", "enddate", "end"]),
    (
        CanonicalField::StartTime,
        &["startTime", "start_time", "starttime", "time", "start"],
    ),
    (CanonicalField::EndTime, &["endTime", "end_time", "endtime", "end"]),
    (CanonicalField::Priority, &["priority", "eventPriority", "event_priority"]),
    (
        CanonicalField::EventType,
        &["eventType", "event_type", "eventtype", "category", "type"],
    ),
    (CanonicalField::Subtype, &["subtype", "subType", "sub_type", "eventSubtype"]),
    (CanonicalField::Mode, &["mode", "meetingMode", "meeting_mode"]),
    (CanonicalField::Agenda, &["agenda", "title", "description"]),
    (CanonicalField::Link, &["link", "meetingLink", "meeting_link", "url"]),
    (
        CanonicalField::Employees,
        &["employees", "employeeIds", "employee_ids", "attendees", "participants"],
    ),
    (
        CanonicalField::EventStatus,
        &["eventStatus", "event_status", "eventstatus", "status"],
    ),
    (CanonicalField::FormType, &["formType", "form_type", "formtype", "view"]),
];

pub fn aliases_for(field: CanonicalField) -> &'static [&'static str] {
    FIELD_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// First alias present with a meaningful value (not null, not a blank string).
pub fn lookup(record: &Map<String, Value>, field: CanonicalField) -> Option<&Value> {
    aliases_for(field)
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}
