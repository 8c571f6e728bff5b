// Settings module
// Tunable constants for layout, snapping, auto-scroll and fetching.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::viewport::{GridKind, ViewportSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub day_viewport: ViewportSpec,
    pub week_viewport: ViewportSpec,
    pub snap_minutes: u32,
    pub min_drag_minutes: u32,
    /// Length of a plain click-to-create event.
    pub click_create_minutes: u32,
    pub scroll_zone_px: f64,
    pub scroll_tick_ms: u64,
    pub scroll_step_px: f64,
    pub lane_stride_px: f64,
    pub max_lane_offset_px: f64,
    pub month_max_events_per_cell: usize,
    pub fetch_debounce_ms: u64,
    pub first_day_of_week: u8,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            day_viewport: ViewportSpec {
                visible_hour_start: 8.0,
                visible_hour_end: 20.0,
                pixels_per_hour: 60.0,
                header_offset_px: 0.0,
            },
            week_viewport: ViewportSpec {
                visible_hour_start: 0.0,
                visible_hour_end: 24.0,
                pixels_per_hour: 48.0,
                header_offset_px: 40.0,
            },
            snap_minutes: 15,
            min_drag_minutes: 15,
            click_create_minutes: 60,
            scroll_zone_px: 100.0,
            scroll_tick_ms: 16,
            scroll_step_px: 8.0,
            lane_stride_px: 12.0,
            max_lane_offset_px: 48.0,
            month_max_events_per_cell: 3,
            fetch_debounce_ms: 400,
            first_day_of_week: 0, // Sunday
        }
    }
}

impl EngineSettings {
    pub fn viewport(&self, grid: GridKind) -> &ViewportSpec {
        match grid {
            GridKind::Day => &self.day_viewport,
            GridKind::Week => &self.week_viewport,
        }
    }

    pub fn scroll_tick(&self) -> Duration {
        Duration::from_millis(self.scroll_tick_ms)
    }

    pub fn fetch_debounce(&self) -> Duration {
        Duration::from_millis(self.fetch_debounce_ms)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        self.day_viewport
            .validate()
            .map_err(|e| format!("day viewport: {}", e))?;
        self.week_viewport
            .validate()
            .map_err(|e| format!("week viewport: {}", e))?;

        if self.snap_minutes == 0 || 60 % self.snap_minutes != 0 {
            return Err(format!(
                "snap interval {} must be a positive divisor of 60",
                self.snap_minutes
            ));
        }

        for (name, viewport) in [("day", &self.day_viewport), ("week", &self.week_viewport)] {
            if viewport.visible_hours() * 60.0 + 1e-9 < self.snap_minutes as f64 {
                return Err(format!(
                    "{} viewport must show at least one {}-minute snap interval",
                    name, self.snap_minutes
                ));
            }
        }

        if self.min_drag_minutes == 0 {
            return Err("minimum drag duration must be positive".to_string());
        }

        if self.month_max_events_per_cell == 0 {
            return Err("month cells must show at least one event".to_string());
        }

        if self.click_create_minutes == 0 {
            return Err("click-create duration must be positive".to_string());
        }

        if self.scroll_tick_ms == 0 {
            return Err("scroll tick must be positive".to_string());
        }

        if self.scroll_zone_px < 0.0 || self.scroll_step_px <= 0.0 {
            return Err("scroll zone must be non-negative and scroll step positive".to_string());
        }

        if self.lane_stride_px < 0.0 || self.max_lane_offset_px < 0.0 {
            return Err("lane offsets cannot be negative".to_string());
        }

        if self.first_day_of_week > 6 {
            return Err(format!(
                "first day of week {} must be between 0 (Sunday) and 6 (Saturday)",
                self.first_day_of_week
            ));
        }

        Ok(())
    }
}
