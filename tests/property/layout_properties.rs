// Property-based tests for the layout core
// Snapping, clamping, lane safety and input tolerance under random inputs

use calendar_layout::models::layout::{ColumnSpan, LaneSpan, TimeSpan};
use calendar_layout::services::layout::{assign_lanes, TimeGridMapper};
use calendar_layout::services::normalizer::normalize;
use calendar_layout::utils::date::{decimal_to_time, enumerate_dates, to_decimal_hours};
use calendar_layout::{ContainerRect, EngineSettings, GridKind};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use serde_json::json;

fn mapper(grid: GridKind) -> TimeGridMapper {
    let settings = EngineSettings::default();
    TimeGridMapper::new(*settings.viewport(grid), grid, settings.snap_minutes)
}

fn time_span() -> impl Strategy<Value = TimeSpan> {
    (0u32..96, 1u32..16).prop_map(|(start, len)| {
        let start = start as f64 / 4.0;
        TimeSpan::new(start, (start + len as f64 / 4.0).min(24.0))
    })
}

fn column_span() -> impl Strategy<Value = ColumnSpan> {
    (0usize..7, 0usize..7).prop_map(|(a, b)| ColumnSpan::new(a.min(b), a.max(b)))
}

fn assert_no_shared_lane<S: LaneSpan>(spans: &[S], lanes: &[usize]) -> Result<(), TestCaseError> {
    for i in 0..spans.len() {
        for j in (i + 1)..spans.len() {
            if spans[i].overlaps(&spans[j]) {
                prop_assert_ne!(lanes[i], lanes[j], "spans {} and {} overlap but share a lane", i, j);
            }
        }
    }
    Ok(())
}

proptest! {
    /// Property: every pointer position snaps to a 15-minute boundary
    #[test]
    fn prop_pointer_snaps_to_quarter_hours(y in -2000.0f64..4000.0, top in -500.0f64..500.0) {
        for grid in [GridKind::Day, GridKind::Week] {
            let time = mapper(grid).pointer_to_time(y, ContainerRect::new(top, 600.0));
            prop_assert_eq!(time.total_minutes % 15, 0);
            prop_assert_eq!(time.hour * 60 + time.minute, time.total_minutes);
        }
    }

    /// Property: day grids stay inside the visible window, week grids inside the day
    #[test]
    fn prop_pointer_clamps_per_grid(y in -5000.0f64..5000.0) {
        let container = ContainerRect::new(0.0, 600.0);
        let day = mapper(GridKind::Day).pointer_to_time(y, container);
        prop_assert!((8 * 60..=20 * 60).contains(&day.total_minutes));
        let week = mapper(GridKind::Week).pointer_to_time(y, container);
        prop_assert!(week.total_minutes <= 24 * 60);
    }

    /// Property: drawing a snapped time and reading it back is lossless
    #[test]
    fn prop_time_pointer_round_trip(quarter in 0u32..=96) {
        let m = mapper(GridKind::Week);
        let container = ContainerRect::new(25.0, 800.0);
        let decimal = quarter as f64 / 4.0;
        let y = m.time_to_pointer(decimal, container);
        prop_assert_eq!(m.pointer_to_time(y, container).total_minutes, quarter * 15);
    }

    /// Property: HH:MM formatting and parsing agree on whole minutes
    #[test]
    fn prop_hhmm_round_trip(minutes in 0u32..1440) {
        let decimal = minutes as f64 / 60.0;
        let back = to_decimal_hours(&decimal_to_time(decimal));
        prop_assert!((back - decimal).abs() < 1e-9);
    }

    /// Property: overlapping time spans never share a lane, and allocation is deterministic
    #[test]
    fn prop_time_lanes_are_safe(spans in prop::collection::vec(time_span(), 0..40)) {
        let lanes = assign_lanes(&spans);
        prop_assert_eq!(lanes.len(), spans.len());
        assert_no_shared_lane(&spans, &lanes)?;
        prop_assert_eq!(assign_lanes(&spans), lanes);
    }

    /// Property: overlapping column spans never share a lane, and no lane is skipped
    #[test]
    fn prop_column_lanes_are_safe(spans in prop::collection::vec(column_span(), 0..20)) {
        let lanes = assign_lanes(&spans);
        assert_no_shared_lane(&spans, &lanes)?;
        if let Some(&max) = lanes.iter().max() {
            for lane in 0..=max {
                prop_assert!(lanes.contains(&lane));
            }
        }
    }

    /// Property: date enumeration is inclusive, ascending and order-independent
    #[test]
    fn prop_enumerate_dates(offset in 0i64..3650, len in 0i64..60) {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset);
        let end = start + Duration::days(len);
        let forward = enumerate_dates(start, end);
        prop_assert_eq!(forward.len() as i64, len + 1);
        prop_assert_eq!(forward.first().copied(), Some(start));
        prop_assert_eq!(forward.last().copied(), Some(end));
        prop_assert!(forward.windows(2).all(|w| w[1] == w[0] + Duration::days(1)));
        prop_assert_eq!(enumerate_dates(end, start), forward);
    }

    /// Property: the normalizer accepts any text without panicking
    #[test]
    fn prop_normalizer_never_panics(text in ".*", number in any::<f64>()) {
        let event = normalize(&json!({
            "date": text,
            "endDate": number,
            "startTime": text,
            "end_time": number,
            "employees": [text, number, {"id": text}],
            "priority": text
        }));
        prop_assert!(event.end_date >= event.date);
    }
}
