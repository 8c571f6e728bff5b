// Drag gesture state machines
//
// One shared Idle -> Dragging -> Idle core, specialised for time-slot drags
// (day/week grids) and date-range drags (month grid).

use chrono::NaiveDate;

pub mod auto_scroll;
pub mod click;
pub mod date_drag;
pub mod time_drag;

pub use auto_scroll::{
    scroll_direction_for, AutoScroll, FrameAutoScroll, ScrollDirection, ScrollTarget,
    TimerAutoScroll,
};
pub use click::click_intent;
pub use date_drag::DateRangeDragMachine;
pub use time_drag::{TimeDragMachine, TimePoint};

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTarget {
    pub date: NaiveDate,
    /// True when the pointer landed on an existing event block.
    pub on_event: bool,
}

impl PointerTarget {
    pub fn cell(date: NaiveDate) -> Self {
        Self {
            date,
            on_event: false,
        }
    }

    pub fn event(date: NaiveDate) -> Self {
        Self {
            date,
            on_event: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState<P> {
    pub anchor: P,
    pub cursor: P,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase<P> {
    Idle,
    Dragging(DragState<P>),
}

/// Single-owner drag state with explicit start/update/commit/cancel transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture<P> {
    phase: DragPhase<P>,
}

impl<P> Default for DragGesture<P> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }
}

impl<P: Clone> DragGesture<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase<P> {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn state(&self) -> Option<&DragState<P>> {
        match &self.phase {
            DragPhase::Dragging(state) => Some(state),
            DragPhase::Idle => None,
        }
    }

    /// Enter `Dragging` with anchor and cursor at `point`.
    /// Returns false (and changes nothing) if a drag is already live.
    pub fn start(&mut self, point: P) -> bool {
        if self.is_active() {
            return false;
        }
        self.phase = DragPhase::Dragging(DragState {
            anchor: point.clone(),
            cursor: point,
        });
        true
    }

    /// Move the cursor. Ignored while idle.
    pub fn update(&mut self, point: P) -> bool {
        match &mut self.phase {
            DragPhase::Dragging(state) => {
                state.cursor = point;
                true
            }
            DragPhase::Idle => false,
        }
    }

    /// Leave `Dragging`, handing back the final state.
    pub fn commit(&mut self) -> Option<DragState<P>> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(state) => Some(state),
            DragPhase::Idle => None,
        }
    }

    /// Drop any live drag. Returns whether one was live.
    pub fn cancel(&mut self) -> bool {
        self.commit().is_some()
    }
}
