// Viewport module
// Visible hour window and pixel scale of a scrollable time grid.

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Which time grid a pointer is over. Controls how pointer times are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    /// Day view: clamps to the visible working window.
    Day,
    /// Week view: clamps to the full 24 hours.
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSpec {
    pub visible_hour_start: f64,
    pub visible_hour_end: f64,
    pub pixels_per_hour: f64,
    /// Height of a sticky header drawn inside the scroll container.
    pub header_offset_px: f64,
}

impl ViewportSpec {
    pub fn new(
        visible_hour_start: f64,
        visible_hour_end: f64,
        pixels_per_hour: f64,
        header_offset_px: f64,
    ) -> CalendarResult<Self> {
        let spec = Self {
            visible_hour_start,
            visible_hour_end,
            pixels_per_hour,
            header_offset_px,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> CalendarResult<()> {
        let finite = [
            self.visible_hour_start,
            self.visible_hour_end,
            self.pixels_per_hour,
            self.header_offset_px,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(CalendarError::invalid_viewport("values must be finite"));
        }

        if self.visible_hour_start < 0.0 || self.visible_hour_end > 24.0 {
            return Err(CalendarError::invalid_viewport(format!(
                "hour window {}..{} must lie within 0..24",
                self.visible_hour_start, self.visible_hour_end
            )));
        }

        if self.visible_hour_start >= self.visible_hour_end {
            return Err(CalendarError::invalid_viewport(format!(
                "start hour {} must be before end hour {}",
                self.visible_hour_start, self.visible_hour_end
            )));
        }

        if self.pixels_per_hour <= 0.0 {
            return Err(CalendarError::invalid_viewport("pixels per hour must be positive"));
        }

        if self.header_offset_px < 0.0 {
            return Err(CalendarError::invalid_viewport("header offset cannot be negative"));
        }

        Ok(())
    }

    pub fn visible_hours(&self) -> f64 {
        self.visible_hour_end - self.visible_hour_start
    }

    /// Pixel height of the whole visible window (header excluded).
    pub fn content_height_px(&self) -> f64 {
        self.visible_hours() * self.pixels_per_hour
    }

    /// Whole hour rows drawn by this viewport.
    pub fn hour_rows(&self) -> std::ops::Range<u32> {
        let first = self.visible_hour_start.floor().max(0.0) as u32;
        let last = self.visible_hour_end.ceil().min(24.0) as u32;
        first..last
    }
}

/// Bounding box of a scroll container in client coordinates (vertical axis only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub top: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}
