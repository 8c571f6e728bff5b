//! Overlap detection and greedy lane (track) allocation.
//!
//! Events are sorted by start, wider spans first, ties kept in input order,
//! then each one goes into the first lane whose occupants it does not overlap.
//! Lane count is unbounded; heavy overlap just opens more lanes.

use chrono::NaiveDate;

use crate::models::event::{Event, EventId};
use crate::models::layout::{ColumnSpan, LaneSpan, TimeSpan, TrackAssignment, TrackEntry};
use crate::utils::date::days_between;

pub const DAYS_PER_WEEK: i64 = 7;

/// Half-open time overlap between two events. Events without times never overlap.
pub fn events_overlap(a: &Event, b: &Event) -> bool {
    match (a.time_span(), b.time_span()) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// Lane index for each input span, in input order.
pub fn assign_lanes<S: LaneSpan>(spans: &[S]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    // sort_by is stable, so equal keys keep input order
    order.sort_by(|&a, &b| {
        spans[a]
            .sort_start()
            .total_cmp(&spans[b].sort_start())
            .then_with(|| spans[b].width().total_cmp(&spans[a].width()))
    });

    let mut lanes: Vec<Vec<usize>> = Vec::new();
    let mut result = vec![0; spans.len()];

    for idx in order {
        let span = &spans[idx];
        let slot = lanes
            .iter()
            .position(|occupants| occupants.iter().all(|&other| !span.overlaps(&spans[other])));
        let lane = match slot {
            Some(lane) => lane,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[lane].push(idx);
        result[idx] = lane;
    }

    result
}

/// Column span of a date range within the 7-day window starting at `week_start`,
/// or `None` when the range misses the window.
pub fn column_span_in_week(
    first: NaiveDate,
    last: NaiveDate,
    week_start: NaiveDate,
) -> Option<ColumnSpan> {
    let start_offset = days_between(week_start, first);
    let end_offset = days_between(week_start, last);
    if end_offset < 0 || start_offset >= DAYS_PER_WEEK || end_offset < start_offset {
        return None;
    }
    let start_column = start_offset.max(0) as usize;
    let end_column = end_offset.min(DAYS_PER_WEEK - 1) as usize;
    Some(ColumnSpan::new(start_column, end_column))
}

/// Column span of an event within a week, using its `[date, endDate]` range.
pub fn event_column_span(event: &Event, week_start: NaiveDate) -> Option<ColumnSpan> {
    column_span_in_week(event.first_date()?, event.last_date()?, week_start)
}

/// Lanes for timed events sharing one column (an hour row or a day).
///
/// Events without a usable time span are skipped.
pub fn allocate_time_tracks<'a, I>(events: I) -> TrackAssignment
where
    I: IntoIterator<Item = &'a Event>,
{
    let (ids, spans): (Vec<EventId>, Vec<TimeSpan>) = events
        .into_iter()
        .filter_map(|e| e.time_span().map(|span| (e.id.clone(), span)))
        .unzip();
    build_assignment(ids, &spans, |_| None)
}

/// Lanes for multi-day bars across the week starting at `week_start`.
///
/// Events outside the week are skipped.
pub fn allocate_week_tracks<'a, I>(events: I, week_start: NaiveDate) -> TrackAssignment
where
    I: IntoIterator<Item = &'a Event>,
{
    let (ids, spans): (Vec<EventId>, Vec<ColumnSpan>) = events
        .into_iter()
        .filter_map(|e| event_column_span(e, week_start).map(|span| (e.id.clone(), span)))
        .unzip();
    build_assignment(ids, &spans, |span| Some(*span))
}

fn build_assignment<S, F>(ids: Vec<EventId>, spans: &[S], column: F) -> TrackAssignment
where
    S: LaneSpan,
    F: Fn(&S) -> Option<ColumnSpan>,
{
    let lanes = assign_lanes(spans);
    let lane_count = lanes.iter().max().map_or(0, |max| max + 1);
    let entries = ids
        .into_iter()
        .zip(lanes)
        .zip(spans)
        .map(|((event_id, lane), span)| TrackEntry {
            event_id,
            lane,
            column_span: column(span),
        })
        .collect();

    log::trace!("allocated {} lanes", lane_count);
    TrackAssignment {
        entries,
        lane_count,
    }
}
