// Month composition: a fixed 6x7 grid of day cells.
//
// Multi-day events get bar tracks per week row; single-day events are listed
// inside their cell, capped with an overflow count.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::event::{Event, EventId};
use crate::models::layout::TrackAssignment;
use crate::services::layout::allocate_week_tracks;
use crate::services::layout::tracks::DAYS_PER_WEEK;
use crate::utils::date::{first_of_month, get_week_start};

pub const MONTH_GRID_WEEKS: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    /// Single-day events rendered in the cell, at most the configured cap.
    pub events: Vec<EventId>,
    /// Single-day events that did not fit ("+N more").
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthWeek {
    pub week_start: NaiveDate,
    pub bars: TrackAssignment,
    pub cells: Vec<MonthCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthLayout {
    pub month_start: NaiveDate,
    pub grid_start: NaiveDate,
    pub weeks: Vec<MonthWeek>,
}

impl MonthLayout {
    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.weeks
            .iter()
            .flat_map(|w| w.cells.iter())
            .find(|c| c.date == date)
    }

    pub fn grid_end(&self) -> NaiveDate {
        self.grid_start + Duration::days(MONTH_GRID_WEEKS * DAYS_PER_WEEK - 1)
    }
}

/// First date shown by the month grid containing `date`.
pub fn month_grid_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    get_week_start(first_of_month(date), first_day_of_week)
}

pub fn compose_month(
    events: &[Event],
    date: NaiveDate,
    today: NaiveDate,
    first_day_of_week: u8,
    max_events_per_cell: usize,
) -> MonthLayout {
    let month_start = first_of_month(date);
    let grid_start = month_grid_start(date, first_day_of_week);

    let (multi_day, single_day): (Vec<&Event>, Vec<&Event>) = events
        .iter()
        .filter(|e| e.first_date().is_some())
        .partition(|e| e.is_multi_day());

    let weeks = (0..MONTH_GRID_WEEKS)
        .map(|row| {
            let week_start = grid_start + Duration::days(row * DAYS_PER_WEEK);
            let cells = (0..DAYS_PER_WEEK)
                .map(|col| {
                    let day = week_start + Duration::days(col);
                    month_cell(&single_day, day, month_start, today, max_events_per_cell)
                })
                .collect();
            MonthWeek {
                week_start,
                bars: allocate_week_tracks(multi_day.iter().copied(), week_start),
                cells,
            }
        })
        .collect();

    MonthLayout {
        month_start,
        grid_start,
        weeks,
    }
}

fn month_cell(
    single_day: &[&Event],
    day: NaiveDate,
    month_start: NaiveDate,
    today: NaiveDate,
    cap: usize,
) -> MonthCell {
    let mut on_day: Vec<&Event> = single_day
        .iter()
        .copied()
        .filter(|e| e.first_date() == Some(day))
        .collect();
    // untimed first, then by start time; stable for equal keys
    on_day.sort_by(|a, b| {
        a.start_decimal()
            .unwrap_or(-1.0)
            .total_cmp(&b.start_decimal().unwrap_or(-1.0))
    });

    let overflow = on_day.len().saturating_sub(cap);
    MonthCell {
        date: day,
        in_month: day.year() == month_start.year() && day.month() == month_start.month(),
        is_today: day == today,
        is_past: day < today,
        events: on_day.iter().take(cap).map(|e| e.id.clone()).collect(),
        overflow,
    }
}
