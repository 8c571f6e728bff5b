// Time-slot drag (day and week grids)
//
// pointer-down anchors a snapped time on a future (or today's) date, moves
// update the cursor and drive auto-scroll, release emits a create intent when
// the selection is at least the minimum duration.

use chrono::{NaiveDate, NaiveDateTime};

use super::auto_scroll::{scroll_direction_for, AutoScroll};
use super::{DragGesture, PointerTarget};
use crate::models::event::ViewKind;
use crate::models::layout::CreateIntent;
use crate::models::settings::EngineSettings;
use crate::models::viewport::{ContainerRect, GridKind};
use crate::services::layout::geometry::{SnappedTime, TimeGridMapper};
use crate::utils::date::{decimal_to_minutes, now_decimal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub time: SnappedTime,
}

pub struct TimeDragMachine<S: AutoScroll> {
    gesture: DragGesture<TimePoint>,
    mapper: TimeGridMapper,
    source_view: ViewKind,
    min_minutes: u32,
    scroll_zone_px: f64,
    scroller: S,
}

impl<S: AutoScroll> TimeDragMachine<S> {
    pub fn new(settings: &EngineSettings, grid: GridKind, scroller: S) -> Self {
        let mapper = TimeGridMapper::new(*settings.viewport(grid), grid, settings.snap_minutes);
        let source_view = match grid {
            GridKind::Day => ViewKind::Day,
            GridKind::Week => ViewKind::Week,
        };
        Self {
            gesture: DragGesture::new(),
            mapper,
            source_view,
            min_minutes: settings.min_drag_minutes,
            scroll_zone_px: settings.scroll_zone_px,
            scroller,
        }
    }

    pub fn mapper(&self) -> &TimeGridMapper {
        &self.mapper
    }

    pub fn scroller(&self) -> &S {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut S {
        &mut self.scroller
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    /// Anchor and cursor of the live drag.
    pub fn points(&self) -> Option<(&TimePoint, &TimePoint)> {
        self.gesture.state().map(|s| (&s.anchor, &s.cursor))
    }

    /// Ordered `(start, end)` of the current selection, for highlighting.
    pub fn preview(&self) -> Option<(SnappedTime, SnappedTime)> {
        let state = self.gesture.state()?;
        let (a, b) = (&state.anchor.time, &state.cursor.time);
        if a.total_minutes <= b.total_minutes {
            Some((a.clone(), b.clone()))
        } else {
            Some((b.clone(), a.clone()))
        }
    }

    /// Start a drag. Rejected for past dates, for already-elapsed slots of
    /// today, for presses on existing events and while another drag is live.
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        pointer_y: f64,
        container: ContainerRect,
        now: NaiveDateTime,
    ) -> bool {
        if self.gesture.is_active() {
            log::debug!("ignoring pointer-down: drag already active");
            return false;
        }
        if target.on_event {
            log::debug!("ignoring pointer-down on an existing event");
            return false;
        }
        if target.date < now.date() {
            log::debug!("ignoring pointer-down on past date {}", target.date);
            return false;
        }

        let time = self.mapper.pointer_to_time(pointer_y, container);
        if is_elapsed(target.date, &time, now) {
            log::debug!("ignoring pointer-down at elapsed time {}", time.display);
            return false;
        }
        log::debug!("drag started on {} at {}", target.date, time.display);
        self.gesture.start(TimePoint {
            date: target.date,
            time,
        })
    }

    /// Track the pointer. Returns true when the cursor moved.
    ///
    /// On today's date the cursor may not enter time that has already passed.
    pub fn pointer_move(
        &mut self,
        pointer_y: f64,
        container: ContainerRect,
        now: NaiveDateTime,
    ) -> bool {
        let Some(state) = self.gesture.state() else {
            return false;
        };
        let date = state.anchor.date;

        let header = if self.mapper.has_header {
            self.mapper.viewport.header_offset_px
        } else {
            0.0
        };
        match scroll_direction_for(pointer_y, container, header, self.scroll_zone_px) {
            Some(direction) => self.scroller.start(direction),
            None => self.scroller.stop(),
        }

        let time = self.mapper.pointer_to_time(pointer_y, container);
        if is_elapsed(date, &time, now) {
            log::trace!("cursor {} is before the current time", time.display);
            return false;
        }

        self.gesture.update(TimePoint { date, time })
    }

    /// Finish the drag. Emits an intent when the selection spans at least the
    /// minimum duration; shorter selections count as clicks.
    pub fn pointer_up(&mut self) -> Option<CreateIntent> {
        self.scroller.stop();
        let state = self.gesture.commit()?;

        let (start, end) = if state.anchor.time.total_minutes <= state.cursor.time.total_minutes {
            (state.anchor.time, state.cursor.time)
        } else {
            (state.cursor.time, state.anchor.time)
        };

        let duration = end.total_minutes - start.total_minutes;
        if duration < self.min_minutes {
            log::debug!("drag of {} minutes discarded as a click", duration);
            return None;
        }

        let intent = CreateIntent {
            date: state.anchor.date,
            end_date: state.anchor.date,
            start_time: Some(start.hhmm()),
            end_time: Some(end.hhmm()),
            source_view: self.source_view,
        };
        log::debug!("drag produced create intent {:?}", intent);
        Some(intent)
    }

    /// Global pointer-up outside the grid, view change or teardown.
    pub fn cancel(&mut self) {
        self.scroller.stop();
        if self.gesture.cancel() {
            log::debug!("drag cancelled");
        }
    }
}

fn is_elapsed(date: NaiveDate, time: &SnappedTime, now: NaiveDateTime) -> bool {
    date == now.date() && time.total_minutes < decimal_to_minutes(now_decimal(now))
}

impl<S: AutoScroll> Drop for TimeDragMachine<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gesture::auto_scroll::{FrameAutoScroll, ScrollDirection};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap()
    }

    const RECT: ContainerRect = ContainerRect {
        top: 0.0,
        height: 720.0,
    };

    fn day_machine() -> TimeDragMachine<FrameAutoScroll> {
        let settings = EngineSettings::default();
        TimeDragMachine::new(&settings, GridKind::Day, FrameAutoScroll::from_settings(&settings))
    }

    /// Pointer Y for a wall-clock time in the default day viewport (08:00, 60px/h).
    fn y_for(hour: u32, minute: u32) -> f64 {
        (hour as f64 - 8.0) * 60.0 + minute as f64
    }

    #[test]
    fn test_drag_emits_snapped_intent() {
        let mut machine = day_machine();
        let target = PointerTarget::cell(date(2024, 6, 10));

        assert!(machine.pointer_down(target, y_for(9, 5), RECT, now()));
        assert!(machine.pointer_move(y_for(9, 30), RECT, now()));
        let intent = machine.pointer_up().unwrap();

        assert_eq!(
            intent,
            CreateIntent {
                date: date(2024, 6, 10),
                end_date: date(2024, 6, 10),
                start_time: Some("09:00".to_string()),
                end_time: Some("09:30".to_string()),
                source_view: ViewKind::Day,
            }
        );
        assert!(!machine.is_dragging());
    }

    #[test]
    fn test_upward_drag_orders_range() {
        let mut machine = day_machine();
        machine.pointer_down(PointerTarget::cell(date(2024, 6, 10)), y_for(11, 0), RECT, now());
        machine.pointer_move(y_for(10, 0), RECT, now());
        let intent = machine.pointer_up().unwrap();
        assert_eq!(intent.start_time.as_deref(), Some("10:00"));
        assert_eq!(intent.end_time.as_deref(), Some("11:00"));
    }

    #[test]
    fn test_minimum_duration_threshold() {
        let mut machine = day_machine();
        let target = PointerTarget::cell(date(2024, 6, 10));

        machine.pointer_down(target, y_for(9, 0), RECT, now());
        assert!(machine.pointer_up().is_none(), "zero-length drag is a click");

        machine.pointer_down(target, y_for(9, 0), RECT, now());
        machine.pointer_move(y_for(9, 15), RECT, now());
        let intent = machine.pointer_up().unwrap();
        assert_eq!(intent.end_time.as_deref(), Some("09:15"));
    }

    #[test]
    fn test_past_date_rejected() {
        let mut machine = day_machine();
        assert!(!machine.pointer_down(PointerTarget::cell(date(2024, 5, 31)), 100.0, RECT, now()));
        assert!(!machine.is_dragging());
        assert!(machine.pointer_up().is_none());
    }

    #[test]
    fn test_press_on_event_rejected() {
        let mut machine = day_machine();
        assert!(!machine.pointer_down(PointerTarget::event(date(2024, 6, 10)), 100.0, RECT, now()));
        assert!(!machine.is_dragging());
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let mut machine = day_machine();
        let target = PointerTarget::cell(date(2024, 6, 10));
        assert!(machine.pointer_down(target, y_for(9, 0), RECT, now()));
        assert!(!machine.pointer_down(target, y_for(15, 0), RECT, now()));
        assert_eq!(machine.points().unwrap().0.time.hour, 9);
    }

    #[test]
    fn test_today_cannot_drag_into_elapsed_time() {
        let mut machine = day_machine();
        let today = now().date();
        machine.pointer_down(PointerTarget::cell(today), y_for(13, 0), RECT, now());

        assert!(!machine.pointer_move(y_for(11, 0), RECT, now()));
        assert_eq!(machine.points().unwrap().1.time.hour, 13);
        assert!(machine.pointer_move(y_for(14, 0), RECT, now()));
    }

    #[test]
    fn test_today_cannot_anchor_in_elapsed_time() {
        let mut machine = day_machine();
        let today = now().date();

        assert!(!machine.pointer_down(PointerTarget::cell(today), y_for(9, 0), RECT, now()));
        assert!(!machine.is_dragging());
        assert!(!machine.pointer_move(y_for(13, 0), RECT, now()));
        assert!(machine.pointer_up().is_none());

        // the current slot itself is still open
        assert!(machine.pointer_down(PointerTarget::cell(today), y_for(12, 0), RECT, now()));
        machine.pointer_move(y_for(13, 0), RECT, now());
        let intent = machine.pointer_up().unwrap();
        assert_eq!(intent.start_time.as_deref(), Some("12:00"));
    }

    #[test]
    fn test_auto_scroll_follows_pointer_and_stops_on_release() {
        let mut machine = day_machine();
        machine.pointer_down(PointerTarget::cell(date(2024, 6, 10)), 300.0, RECT, now());

        machine.pointer_move(680.0, RECT, now());
        assert_eq!(machine.scroller().direction(), Some(ScrollDirection::Down));
        machine.pointer_move(690.0, RECT, now());
        assert_eq!(machine.scroller().start_count(), 1);

        machine.pointer_move(30.0, RECT, now());
        assert_eq!(machine.scroller().direction(), Some(ScrollDirection::Up));

        machine.pointer_move(300.0, RECT, now());
        assert!(!machine.scroller().is_running());

        machine.pointer_move(700.0, RECT, now());
        assert!(machine.scroller().is_running());
        machine.pointer_up();
        assert!(!machine.scroller().is_running());
    }

    #[test]
    fn test_cancel_clears_state_and_scroll() {
        let mut machine = day_machine();
        machine.pointer_down(PointerTarget::cell(date(2024, 6, 10)), 300.0, RECT, now());
        machine.pointer_move(710.0, RECT, now());
        assert!(machine.scroller().is_running());

        machine.cancel();
        assert!(!machine.is_dragging());
        assert!(!machine.scroller().is_running());
        assert!(machine.pointer_up().is_none());
    }

    #[test]
    fn test_week_grid_allows_full_day_and_reports_week_view() {
        let settings = EngineSettings::default();
        let mut machine =
            TimeDragMachine::new(&settings, GridKind::Week, FrameAutoScroll::from_settings(&settings));
        let rect = ContainerRect::new(0.0, 2000.0);
        // header 40px, 48px per hour
        machine.pointer_down(PointerTarget::cell(date(2024, 6, 10)), 40.0 + 22.0 * 48.0, rect, now());
        machine.pointer_move(5000.0, rect, now());
        let intent = machine.pointer_up().unwrap();
        assert_eq!(intent.start_time.as_deref(), Some("22:00"));
        assert_eq!(intent.end_time.as_deref(), Some("00:00"));
        assert_eq!(intent.source_view, ViewKind::Week);
    }

    #[test]
    fn test_preview_is_ordered() {
        let mut machine = day_machine();
        assert!(machine.preview().is_none());
        machine.pointer_down(PointerTarget::cell(date(2024, 6, 10)), y_for(12, 0), RECT, now());
        machine.pointer_move(y_for(10, 30), RECT, now());
        let (start, end) = machine.preview().unwrap();
        assert_eq!((start.hour, start.minute), (10, 30));
        assert_eq!((end.hour, end.minute), (12, 0));
    }
}
