//! Boundary to the external event API.
//!
//! Reads hand back loosely-typed JSON records that still need normalizing;
//! writes take an [`EventDraft`] built from a create intent or an edited event.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::event::{Event, EventId, EventStatus, ViewKind};
use crate::models::layout::CreateIntent;
use crate::services::normalizer::normalize;

#[cfg_attr(test, mockall::automock)]
pub trait EventReader {
    fn list_all(&self) -> Result<Vec<Value>>;
    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Value>>;
    /// Records whose date range intersects the inclusive `[start, end]`.
    fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Value>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait EventWriter {
    fn create(&self, draft: &EventDraft) -> Result<EventId>;
    fn update(&self, id: &EventId, draft: &EventDraft) -> Result<()>;
    fn delete(&self, id: &EventId) -> Result<()>;
}

/// Field set sent to the write API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub form_type: ViewKind,
    pub event_status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    #[serde(rename = "eventtype", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub employees: Vec<String>,
}

impl EventDraft {
    /// Prefill a new event from a gesture or click.
    pub fn from_intent(intent: &CreateIntent) -> Self {
        Self {
            date: intent.date,
            end_date: intent.end_date,
            start_time: intent.start_time.clone(),
            end_time: intent.end_time.clone(),
            form_type: intent.source_view,
            event_status: EventStatus::Pending,
            agenda: None,
            event_type: None,
            employees: Vec::new(),
        }
    }

    /// Draft for editing an existing event. `None` when the event has no date.
    pub fn from_event(event: &Event) -> Option<Self> {
        let date = event.first_date()?;
        Some(Self {
            date,
            end_date: event.last_date().unwrap_or(date),
            start_time: event.start_time.map(|t| t.format("%H:%M").to_string()),
            end_time: event.end_time.map(|t| t.format("%H:%M").to_string()),
            form_type: event.form_type.unwrap_or(ViewKind::Day),
            event_status: event.event_status.unwrap_or(EventStatus::Pending),
            agenda: event.agenda.clone(),
            event_type: event.event_type.clone(),
            employees: event.employees.clone(),
        })
    }

    pub fn with_agenda(mut self, agenda: impl Into<String>) -> Self {
        self.agenda = Some(agenda.into());
        self
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn to_record(&self) -> Result<Value> {
        serde_json::to_value(self).context("Failed to serialize event draft")
    }
}

/// Reader over records already in memory, e.g. loaded from a JSON export.
///
/// Range queries normalize each record to decide membership but return the
/// raw records untouched.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    records: Vec<Value>,
}

impl StaticEventSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Accepts either a top-level array or an object with an `events` array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Failed to parse events JSON")?;
        let records = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("events") {
                Some(Value::Array(items)) => items,
                _ => anyhow::bail!("Events JSON object has no \"events\" array"),
            },
            _ => anyhow::bail!("Events JSON must be an array of records"),
        };
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EventReader for StaticEventSource {
    fn list_all(&self) -> Result<Vec<Value>> {
        Ok(self.records.clone())
    }

    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Value>> {
        self.list_by_range(date, date)
    }

    fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Value>> {
        Ok(self
            .records
            .iter()
            .filter(|record| normalize(record).intersects_range(start, end))
            .cloned()
            .collect())
    }
}
