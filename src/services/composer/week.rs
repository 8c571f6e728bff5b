// Week composition: seven day columns plus the multi-day bar strip.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::day::{compose_day_column, DayColumn};
use super::is_header_event;
use crate::models::event::Event;
use crate::models::layout::TrackAssignment;
use crate::models::settings::EngineSettings;
use crate::models::viewport::ViewportSpec;
use crate::services::layout::allocate_week_tracks;
use crate::services::layout::tracks::DAYS_PER_WEEK;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub viewport: ViewportSpec,
    /// Header events placed as bars over the day columns they cover.
    pub bars: TrackAssignment,
    pub days: Vec<DayColumn>,
}

impl WeekLayout {
    pub fn column(&self, date: NaiveDate) -> Option<&DayColumn> {
        self.days.iter().find(|d| d.date == date)
    }
}

pub fn compose_week(
    events: &[Event],
    week_start: NaiveDate,
    today: NaiveDate,
    viewport: &ViewportSpec,
    settings: &EngineSettings,
) -> WeekLayout {
    let week_end = week_start + Duration::days(DAYS_PER_WEEK - 1);
    let in_week: Vec<Event> = events
        .iter()
        .filter(|e| e.intersects_range(week_start, week_end))
        .cloned()
        .collect();

    let bars = allocate_week_tracks(in_week.iter().filter(|e| is_header_event(e)), week_start);

    let days = (0..DAYS_PER_WEEK)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            compose_day_column(&in_week, date, today, viewport, settings)
        })
        .collect();

    WeekLayout {
        week_start,
        viewport: *viewport,
        bars,
        days,
    }
}
