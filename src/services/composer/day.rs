// Day column composition, shared by the day view and each week-view column.

use chrono::NaiveDate;
use serde::Serialize;

use super::is_header_event;
use crate::models::event::{Event, EventId};
use crate::models::layout::{LaneSpan, LayoutDescriptor, TimeSpan, TrackAssignment};
use crate::models::settings::EngineSettings;
use crate::models::viewport::ViewportSpec;
use crate::services::layout::{allocate_time_tracks, lane_offset_px, span_geometry};

/// Timed events intersecting one `[hour, hour + 1)` row, with lanes local to the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    pub hour: u32,
    pub event_ids: Vec<EventId>,
    pub tracks: TrackAssignment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_past: bool,
    /// Untimed or multi-day events, shown in the header strip.
    pub header_events: Vec<EventId>,
    pub hours: Vec<HourBucket>,
    /// One descriptor per timed event visible in the window; lanes span the whole day.
    pub timed: Vec<LayoutDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub viewport: ViewportSpec,
    pub column: DayColumn,
}

impl DayColumn {
    pub fn descriptor(&self, id: &EventId) -> Option<&LayoutDescriptor> {
        self.timed.iter().find(|d| &d.event_id == id)
    }

    pub fn bucket(&self, hour: u32) -> Option<&HourBucket> {
        self.hours.iter().find(|b| b.hour == hour)
    }
}

/// Compose a single date. `events` may contain anything; only events occurring
/// on `date` are considered.
pub fn compose_day_column(
    events: &[Event],
    date: NaiveDate,
    today: NaiveDate,
    viewport: &ViewportSpec,
    settings: &EngineSettings,
) -> DayColumn {
    let (header, timed): (Vec<&Event>, Vec<&Event>) = events
        .iter()
        .filter(|e| e.occurs_on(date))
        .partition(|e| is_header_event(e));

    let hours = viewport
        .hour_rows()
        .map(|hour| {
            let row = TimeSpan::hour(hour);
            let in_row: Vec<&Event> = timed
                .iter()
                .copied()
                .filter(|e| e.time_span().is_some_and(|span| span.overlaps(&row)))
                .collect();
            HourBucket {
                hour,
                event_ids: in_row.iter().map(|e| e.id.clone()).collect(),
                tracks: allocate_time_tracks(in_row),
            }
        })
        .collect();

    let day_tracks = allocate_time_tracks(timed.iter().copied());
    let descriptors = timed
        .iter()
        .filter_map(|event| {
            let span = event.time_span()?;
            let (top, height) = span_geometry(span, viewport)?;
            let lane = day_tracks.lane_of(&event.id).unwrap_or(0);
            Some(LayoutDescriptor {
                event_id: event.id.clone(),
                top_offset_px: top,
                height_px: height,
                lane_index: lane,
                left_offset_px: lane_offset_px(
                    lane,
                    settings.lane_stride_px,
                    settings.max_lane_offset_px,
                ),
                column_span: None,
            })
        })
        .collect();

    DayColumn {
        date,
        is_today: date == today,
        is_past: date < today,
        header_events: header.iter().map(|e| e.id.clone()).collect(),
        hours,
        timed: descriptors,
    }
}
