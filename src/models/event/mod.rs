// Event module
// Canonical calendar event as seen by the layout engine.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::layout::TimeSpan;
use crate::utils::date::{decimal_to_minutes, effective_end_decimal, time_to_decimal};

/// Duration assumed for a timed event that carries a start but no end.
pub const DEFAULT_EVENT_HOURS: f64 = 1.0;

/// Opaque event identifier, kept as the string form of whatever the API sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" | "h" | "urgent" => Some(Priority::High),
            "medium" | "med" | "m" | "normal" => Some(Priority::Medium),
            "low" | "l" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    Missed,
}

impl EventStatus {
    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.trim().to_ascii_lowercase();
        let compact: String = lowered.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        match compact.as_str() {
            "pending" | "scheduled" | "upcoming" => Some(EventStatus::Pending),
            "inprogress" | "ongoing" => Some(EventStatus::InProgress),
            "completed" | "complete" | "done" => Some(EventStatus::Completed),
            "cancelled" | "canceled" => Some(EventStatus::Cancelled),
            "missed" => Some(EventStatus::Missed),
            _ => None,
        }
    }

    /// Statuses that still expect the event to happen.
    pub fn is_open(&self) -> bool {
        matches!(self, EventStatus::Pending | EventStatus::InProgress)
    }
}

/// Calendar view a grid belongs to. Also records which view an event was authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Day,
    Week,
    Month,
}

impl ViewKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Some(ViewKind::Day),
            "week" | "weekly" => Some(ViewKind::Week),
            "month" | "monthly" => Some(ViewKind::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Day => "day",
            ViewKind::Week => "week",
            ViewKind::Month => "month",
        }
    }
}

/// Canonical calendar event.
///
/// Dates and times are optional because the normalizer degrades unparseable
/// values instead of failing; an event without a usable start time renders as
/// a header event. On the wire, missing dates and times serialize as `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: EventId,
    #[serde(with = "blank_date")]
    pub date: Option<NaiveDate>,
    #[serde(with = "blank_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(with = "blank_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "blank_time")]
    pub end_time: Option<NaiveTime>,
    pub priority: Option<Priority>,
    #[serde(rename = "eventtype")]
    pub event_type: Option<String>,
    pub subtype: Option<String>,
    pub mode: Option<String>,
    pub agenda: Option<String>,
    pub link: Option<String>,
    pub employees: Vec<String>,
    pub event_status: Option<EventStatus>,
    pub form_type: Option<ViewKind>,
}

impl Event {
    /// Create a builder for constructing events with optional fields
    pub fn builder(id: impl Into<String>) -> EventBuilder {
        EventBuilder::new(id)
    }

    /// First date the event covers.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Last date the event covers; never earlier than the first date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        let start = self.date?;
        Some(self.end_date.map_or(start, |end| end.max(start)))
    }

    pub fn is_multi_day(&self) -> bool {
        matches!((self.first_date(), self.last_date()), (Some(a), Some(b)) if b > a)
    }

    /// True when `date` falls inside `[date, endDate]`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }

    /// True when the event's date range intersects the inclusive range `[from, to]`.
    pub fn intersects_range(&self, from: NaiveDate, to: NaiveDate) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first <= to && last >= from,
            _ => false,
        }
    }

    pub fn start_decimal(&self) -> Option<f64> {
        self.start_time.map(time_to_decimal)
    }

    /// End hour with midnight rollover applied. Falls back to a one-hour block
    /// when only the start is known.
    pub fn end_decimal(&self) -> Option<f64> {
        let start = self.start_decimal()?;
        match self.end_time {
            Some(end) => Some(effective_end_decimal(start, time_to_decimal(end))),
            None => Some((start + DEFAULT_EVENT_HOURS).min(24.0)),
        }
    }

    /// Time-of-day interval, or `None` when the event has no usable times.
    pub fn time_span(&self) -> Option<TimeSpan> {
        let start = self.start_decimal()?;
        let end = self.end_decimal()?;
        (end > start).then_some(TimeSpan::new(start, end))
    }

    /// A timed event has a valid time span and fits on a single date.
    pub fn is_timed(&self) -> bool {
        self.date.is_some() && !self.is_multi_day() && self.time_span().is_some()
    }

    /// Wall-clock instant at which the event ends.
    pub fn end_instant(&self) -> Option<NaiveDateTime> {
        let last = self.last_date()?;
        let midnight = last.and_time(NaiveTime::MIN);
        match self.end_decimal() {
            Some(end) if end < 24.0 => {
                Some(midnight + Duration::minutes(decimal_to_minutes(end) as i64))
            }
            _ => Some(midnight + Duration::days(1)),
        }
    }

    /// Status with "missed" derived for open events that already ended.
    pub fn effective_status(&self, now: NaiveDateTime) -> Option<EventStatus> {
        let status = self.event_status?;
        if status.is_open() && self.end_instant().is_some_and(|end| end < now) {
            Some(EventStatus::Missed)
        } else {
            Some(status)
        }
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("Event id cannot be empty".to_string());
        }

        if let (Some(start), Some(end)) = (self.date, self.end_date) {
            if end < start {
                return Err("Event end date must not be before start date".to_string());
            }
        }

        Ok(())
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            event: Event {
                id: EventId::new(id),
                ..Event::default()
            },
        }
    }

    /// Single-day event on `date`.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.event.date = Some(date);
        if self.event.end_date.is_none() {
            self.event.end_date = Some(date);
        }
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.event.end_date = Some(date);
        self
    }

    pub fn times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.event.start_time = Some(start);
        self.event.end_time = Some(end);
        self
    }

    pub fn start_time(mut self, start: NaiveTime) -> Self {
        self.event.start_time = Some(start);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.event.priority = Some(priority);
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event.event_type = Some(event_type.into());
        self
    }

    pub fn agenda(mut self, agenda: impl Into<String>) -> Self {
        self.event.agenda = Some(agenda.into());
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.event.event_status = Some(status);
        self
    }

    pub fn form_type(mut self, view: ViewKind) -> Self {
        self.event.form_type = Some(view);
        self
    }

    pub fn employees<I, S>(mut self, employees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event.employees = employees.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Event, String> {
        self.event.validate()?;
        Ok(self.event)
    }
}

/// `Option<NaiveDate>` as `YYYY-MM-DD`, with `""` standing for "none".
mod blank_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}

/// `Option<NaiveTime>` as `HH:MM`, with `""` standing for "none".
mod blank_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.format("%H:%M").to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        Ok(NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok())
    }
}
