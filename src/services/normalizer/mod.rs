// Event normalizer
//
// Turns loosely-typed records from the event API into canonical `Event`s.
// Nothing here fails: unreadable fields are dropped and the event degrades
// to a header-only (untimed) entry.

pub mod aliases;
pub mod coerce;

pub use aliases::{aliases_for, lookup, CanonicalField, FIELD_ALIASES};
pub use coerce::{coerce_date, coerce_employees, coerce_string, coerce_time};

use serde_json::{Map, Value};

use crate::models::event::{Event, EventId, EventStatus, Priority, ViewKind};

/// Normalize one external record.
pub fn normalize(record: &Value) -> Event {
    match record {
        Value::Object(map) => normalize_map(map),
        other => {
            log::debug!("skipping non-object event record: {}", other);
            Event::default()
        }
    }
}

/// Normalize a batch. Records without an id get a positional `anon-N` id so
/// track assignments stay addressable.
pub fn normalize_all(records: &[Value]) -> Vec<Event> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut event = normalize(record);
            if event.id.as_str().is_empty() {
                event.id = EventId::new(format!("anon-{}", index));
            }
            event
        })
        .collect()
}

fn normalize_map(map: &Map<String, Value>) -> Event {
    let text = |field| lookup(map, field).and_then(coerce_string);

    let mut date = lookup(map, CanonicalField::Date).and_then(coerce_date);
    let mut end_date = lookup(map, CanonicalField::EndDate).and_then(coerce_date);
    match (date, end_date) {
        (None, Some(end)) => date = Some(end),
        (Some(start), None) => end_date = Some(start),
        (Some(start), Some(end)) if end < start => {
            log::debug!("end date {} precedes start {}, collapsing to one day", end, start);
            end_date = Some(start);
        }
        _ => {}
    }

    let start_time = lookup(map, CanonicalField::StartTime).and_then(coerce_time);
    let end_time = lookup(map, CanonicalField::EndTime).and_then(coerce_time);

    let priority = text(CanonicalField::Priority).and_then(|p| Priority::parse(&p));
    let event_status = text(CanonicalField::EventStatus).and_then(|s| EventStatus::parse(&s));
    let form_type = text(CanonicalField::FormType).and_then(|f| ViewKind::parse(&f));

    let employees = lookup(map, CanonicalField::Employees)
        .map(coerce_employees)
        .unwrap_or_default();

    Event {
        id: EventId::new(text(CanonicalField::Id).unwrap_or_default()),
        date,
        end_date,
        start_time,
        end_time,
        priority,
        event_type: text(CanonicalField::EventType),
        subtype: text(CanonicalField::Subtype),
        mode: text(CanonicalField::Mode),
        agenda: text(CanonicalField::Agenda),
        link: text(CanonicalField::Link),
        employees,
        event_status,
        form_type,
    }
}
