// View composer
//
// Pure functions of (events, view, date, today, settings) -> layout. Each view
// selects the events it needs, splits header from timed events and runs the
// track allocator and viewport geometry over them.

pub mod cache;
pub mod day;
pub mod month;
pub mod week;

pub use cache::{LayoutCache, LayoutKey};
pub use day::{compose_day_column, DayColumn, DayLayout, HourBucket};
pub use month::{compose_month, month_grid_start, MonthCell, MonthLayout, MonthWeek};
pub use week::{compose_week, WeekLayout};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::event::{Event, ViewKind};
use crate::models::settings::EngineSettings;
use crate::models::viewport::GridKind;
use crate::services::layout::tracks::DAYS_PER_WEEK;
use crate::utils::date::get_week_start;

/// Whether an event belongs in the header strip instead of the time grid.
///
/// Events flagged with a month form type always render there, as do events
/// without a usable time span and events covering more than one date.
pub fn is_header_event(event: &Event) -> bool {
    event.form_type == Some(ViewKind::Month) || !event.is_timed()
}

/// Inclusive date range a view shows for `date`.
pub fn visible_range(view: ViewKind, date: NaiveDate, first_day_of_week: u8) -> (NaiveDate, NaiveDate) {
    match view {
        ViewKind::Day => (date, date),
        ViewKind::Week => {
            let start = get_week_start(date, first_day_of_week);
            (start, start + Duration::days(DAYS_PER_WEEK - 1))
        }
        ViewKind::Month => {
            let start = month_grid_start(date, first_day_of_week);
            (start, start + Duration::days(month::MONTH_GRID_WEEKS * DAYS_PER_WEEK - 1))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewLayout {
    Day(DayLayout),
    Week(WeekLayout),
    Month(MonthLayout),
}

impl ViewLayout {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewLayout::Day(_) => ViewKind::Day,
            ViewLayout::Week(_) => ViewKind::Week,
            ViewLayout::Month(_) => ViewKind::Month,
        }
    }
}

/// Composes views with one set of engine settings.
#[derive(Debug, Clone, Default)]
pub struct ViewComposer {
    settings: EngineSettings,
}

impl ViewComposer {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn compose(&self, view: ViewKind, events: &[Event], date: NaiveDate, today: NaiveDate) -> ViewLayout {
        match view {
            ViewKind::Day => ViewLayout::Day(self.compose_day(events, date, today)),
            ViewKind::Week => ViewLayout::Week(self.compose_week(events, date, today)),
            ViewKind::Month => ViewLayout::Month(self.compose_month(events, date, today)),
        }
    }

    pub fn compose_day(&self, events: &[Event], date: NaiveDate, today: NaiveDate) -> DayLayout {
        let viewport = *self.settings.viewport(GridKind::Day);
        DayLayout {
            viewport,
            column: compose_day_column(events, date, today, &viewport, &self.settings),
        }
    }

    /// Week containing `date`, starting on the configured first day.
    pub fn compose_week(&self, events: &[Event], date: NaiveDate, today: NaiveDate) -> WeekLayout {
        let week_start = get_week_start(date, self.settings.first_day_of_week);
        compose_week(
            events,
            week_start,
            today,
            self.settings.viewport(GridKind::Week),
            &self.settings,
        )
    }

    pub fn compose_month(&self, events: &[Event], date: NaiveDate, today: NaiveDate) -> MonthLayout {
        compose_month(
            events,
            date,
            today,
            self.settings.first_day_of_week,
            self.settings.month_max_events_per_cell,
        )
    }
}
