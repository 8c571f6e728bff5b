//! Layout engines: viewport geometry and the overlap/track allocator.

pub mod geometry;
pub mod tracks;

pub use geometry::{
    hour_to_offset, lane_offset_px, now_indicator_offset, pointer_to_time, span_geometry,
    SnappedTime, TimeGridMapper,
};
pub use tracks::{
    allocate_time_tracks, allocate_week_tracks, assign_lanes, column_span_in_week,
    event_column_span, events_overlap,
};
