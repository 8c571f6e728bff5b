//! Viewport geometry: decimal hours <-> pixel offsets inside a scrollable time grid.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::layout::TimeSpan;
use crate::models::viewport::{ContainerRect, GridKind, ViewportSpec};
use crate::utils::date::{decimal_to_time, format_12h, now_decimal, MINUTES_PER_DAY};

pub const DEFAULT_SNAP_MINUTES: u32 = 15;

/// A pointer position resolved to a snapped time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnappedTime {
    pub hour: u32,
    pub minute: u32,
    /// Minutes since midnight, 0..=1440.
    pub total_minutes: u32,
    /// 12-hour display string.
    pub display: String,
}

impl SnappedTime {
    pub fn from_minutes(total_minutes: u32) -> Self {
        let total_minutes = total_minutes.min(MINUTES_PER_DAY);
        Self {
            hour: total_minutes / 60,
            minute: total_minutes % 60,
            total_minutes,
            display: format_12h(total_minutes),
        }
    }

    pub fn decimal(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }

    /// 24-hour `HH:MM`; hour 24 wraps to `00:00` (the midnight-rollover form).
    pub fn hhmm(&self) -> String {
        decimal_to_time(self.decimal())
    }
}

/// Pixel offset of `decimal_hour` from the top of the visible window.
pub fn hour_to_offset(decimal_hour: f64, viewport: &ViewportSpec) -> f64 {
    (decimal_hour - viewport.visible_hour_start) * viewport.pixels_per_hour
}

/// Unsnapped inverse of [`hour_to_offset`].
pub fn offset_to_hour(offset_px: f64, viewport: &ViewportSpec) -> f64 {
    viewport.visible_hour_start + offset_px / viewport.pixels_per_hour
}

/// The part of `span` that falls inside the visible window, if any.
pub fn clip_to_viewport(span: TimeSpan, viewport: &ViewportSpec) -> Option<TimeSpan> {
    let start = span.start.max(viewport.visible_hour_start);
    let end = span.end.min(viewport.visible_hour_end);
    (end > start).then_some(TimeSpan::new(start, end))
}

/// `(top, height)` in pixels for a span, clipped to the visible window.
pub fn span_geometry(span: TimeSpan, viewport: &ViewportSpec) -> Option<(f64, f64)> {
    let clipped = clip_to_viewport(span, viewport)?;
    Some((
        hour_to_offset(clipped.start, viewport),
        clipped.duration_hours() * viewport.pixels_per_hour,
    ))
}

/// Offset of the current-time line, or `None` outside the visible window.
pub fn now_indicator_offset(now: NaiveDateTime, viewport: &ViewportSpec) -> Option<f64> {
    let hour = now_decimal(now);
    (viewport.visible_hour_start..=viewport.visible_hour_end)
        .contains(&hour)
        .then(|| hour_to_offset(hour, viewport))
}

/// Horizontal shift for an event stacked in `lane`, capped so deep stacks stay on the grid.
pub fn lane_offset_px(lane: usize, stride_px: f64, max_offset_px: f64) -> f64 {
    (lane as f64 * stride_px).min(max_offset_px)
}

/// Maps pointer coordinates over one time grid to snapped times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGridMapper {
    pub viewport: ViewportSpec,
    pub grid: GridKind,
    pub snap_minutes: u32,
    pub has_header: bool,
}

impl TimeGridMapper {
    pub fn new(viewport: ViewportSpec, grid: GridKind, snap_minutes: u32) -> Self {
        Self {
            viewport,
            grid,
            snap_minutes: snap_minutes.max(1),
            has_header: grid == GridKind::Week,
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Clamp window in decimal hours. Day grids keep to the visible window;
    /// week grids allow the full day.
    pub fn clamp_hours(&self) -> (f64, f64) {
        match self.grid {
            GridKind::Day => (self.viewport.visible_hour_start, self.viewport.visible_hour_end),
            GridKind::Week => (0.0, 24.0),
        }
    }

    /// Clamp window in whole minutes, shrunk inward to snap boundaries.
    fn clamp_minutes(&self) -> (u32, u32) {
        let snap = self.snap_minutes as f64;
        let (lo, hi) = self.clamp_hours();
        let lo = ((lo * 60.0 / snap).ceil() * snap) as u32;
        let hi = ((hi * 60.0 / snap).floor() * snap) as u32;
        (lo, hi.max(lo))
    }

    pub fn pointer_to_time(&self, pointer_y: f64, container: ContainerRect) -> SnappedTime {
        let header = if self.has_header {
            self.viewport.header_offset_px
        } else {
            0.0
        };
        let relative_y = pointer_y - container.top - header;
        let elapsed_minutes = relative_y / self.viewport.pixels_per_hour * 60.0;
        let total = self.viewport.visible_hour_start * 60.0 + elapsed_minutes;

        let (lo, hi) = self.clamp_minutes();
        let snap = self.snap_minutes as f64;
        let snapped = if total.is_finite() {
            ((total / snap).round() * snap).clamp(lo as f64, hi as f64) as u32
        } else {
            lo
        };

        SnappedTime::from_minutes(snapped)
    }

    /// Pointer Y (in container coordinates) at which `decimal_hour` is drawn.
    pub fn time_to_pointer(&self, decimal_hour: f64, container: ContainerRect) -> f64 {
        let header = if self.has_header {
            self.viewport.header_offset_px
        } else {
            0.0
        };
        container.top + header + hour_to_offset(decimal_hour, &self.viewport)
    }
}

/// Free-function form with the default 15-minute snap.
pub fn pointer_to_time(
    pointer_y: f64,
    container: ContainerRect,
    viewport: &ViewportSpec,
    grid: GridKind,
    has_header: bool,
) -> SnappedTime {
    TimeGridMapper::new(*viewport, grid, DEFAULT_SNAP_MINUTES)
        .with_header(has_header)
        .pointer_to_time(pointer_y, container)
}
