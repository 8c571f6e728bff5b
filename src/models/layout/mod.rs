//! Layout value types shared by the allocator, the composer and the gesture machines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::event::{EventId, ViewKind};

/// Something the lane allocator can place: it has an ordering key, a width and
/// a pairwise overlap test.
pub trait LaneSpan {
    /// Primary sort key (earlier first).
    fn sort_start(&self) -> f64;
    /// Secondary sort key (wider first).
    fn width(&self) -> f64;
    fn overlaps(&self, other: &Self) -> bool;
}

/// Half-open time-of-day interval in decimal hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
}

impl TimeSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// One hour row, `[hour, hour + 1)`.
    pub fn hour(hour: u32) -> Self {
        Self::new(hour as f64, hour as f64 + 1.0)
    }

    pub fn duration_hours(&self) -> f64 {
        self.end - self.start
    }
}

impl LaneSpan for TimeSpan {
    fn sort_start(&self) -> f64 {
        self.start
    }

    fn width(&self) -> f64 {
        self.duration_hours()
    }

    /// Back-to-back spans (`a.end == b.start`) do not overlap.
    fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Inclusive range of day columns (0..=6) covered by a multi-day bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpan {
    pub start_column: usize,
    pub end_column: usize,
}

impl ColumnSpan {
    pub fn new(start_column: usize, end_column: usize) -> Self {
        Self {
            start_column,
            end_column,
        }
    }

    pub fn columns(&self) -> usize {
        self.end_column - self.start_column + 1
    }
}

impl LaneSpan for ColumnSpan {
    fn sort_start(&self) -> f64 {
        self.start_column as f64
    }

    fn width(&self) -> f64 {
        self.columns() as f64
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.start_column <= other.end_column && self.end_column >= other.start_column
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEntry {
    pub event_id: EventId,
    pub lane: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_span: Option<ColumnSpan>,
}

/// Lane per event for one rendering unit. Entries keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAssignment {
    pub entries: Vec<TrackEntry>,
    pub lane_count: usize,
}

impl TrackAssignment {
    pub fn lane_of(&self, id: &EventId) -> Option<usize> {
        self.entry(id).map(|e| e.lane)
    }

    pub fn span_of(&self, id: &EventId) -> Option<ColumnSpan> {
        self.entry(id).and_then(|e| e.column_span)
    }

    pub fn entry(&self, id: &EventId) -> Option<&TrackEntry> {
        self.entries.iter().find(|e| &e.event_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Placement handed to the renderer for one event in one rendering unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    pub event_id: EventId,
    pub top_offset_px: f64,
    pub height_px: f64,
    pub lane_index: usize,
    /// Horizontal shift for stacked lanes, capped by settings.
    pub left_offset_px: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_span: Option<ColumnSpan>,
}

/// "Open the create/edit form" request emitted by gestures and clicks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntent {
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub source_view: ViewKind,
}
