// Date-range drag (month grid)
//
// Same lifecycle as the time-slot drag, but anchor and cursor are whole dates.

use chrono::NaiveDate;

use super::{DragGesture, PointerTarget};
use crate::models::event::ViewKind;
use crate::models::layout::CreateIntent;
use crate::utils::date::enumerate_dates;

#[derive(Debug, Clone, Default)]
pub struct DateRangeDragMachine {
    gesture: DragGesture<NaiveDate>,
}

impl DateRangeDragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    /// Dates currently selected, ascending. Empty while idle.
    pub fn preview(&self) -> Vec<NaiveDate> {
        self.gesture
            .state()
            .map(|s| enumerate_dates(s.anchor, s.cursor))
            .unwrap_or_default()
    }

    pub fn pointer_down(&mut self, target: PointerTarget, today: NaiveDate) -> bool {
        if target.on_event {
            log::debug!("ignoring pointer-down on an existing event");
            return false;
        }
        if target.date < today {
            log::debug!("ignoring pointer-down on past date {}", target.date);
            return false;
        }
        self.gesture.start(target.date)
    }

    /// Pointer entered another day cell. Past cells do not move the cursor.
    pub fn pointer_enter(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return false;
        }
        self.gesture.update(date)
    }

    pub fn pointer_up(&mut self, today: NaiveDate) -> Option<CreateIntent> {
        let state = self.gesture.commit()?;
        let dates = enumerate_dates(state.anchor, state.cursor);
        let (first, last) = (*dates.first()?, *dates.last()?);
        if first < today {
            log::debug!("date range starting {} is in the past", first);
            return None;
        }

        Some(CreateIntent {
            date: first,
            end_date: last,
            start_time: None,
            end_time: None,
            source_view: ViewKind::Month,
        })
    }

    pub fn cancel(&mut self) {
        if self.gesture.cancel() {
            log::debug!("date range drag cancelled");
        }
    }
}
