// Click-to-create on an empty slot or day cell.

use chrono::NaiveDate;

use super::PointerTarget;
use crate::models::event::ViewKind;
use crate::models::layout::CreateIntent;
use crate::models::settings::EngineSettings;
use crate::services::layout::geometry::SnappedTime;
use crate::utils::date::MINUTES_PER_DAY;

/// Intent for a plain click. Time grids get a slot of the configured length
/// (cut off at midnight); month cells get a date-only intent.
pub fn click_intent(
    target: PointerTarget,
    time: Option<&SnappedTime>,
    view: ViewKind,
    settings: &EngineSettings,
    today: NaiveDate,
) -> Option<CreateIntent> {
    if target.on_event || target.date < today {
        return None;
    }

    let (start_time, end_time) = match (view, time) {
        (ViewKind::Month, _) | (_, None) => (None, None),
        (_, Some(start)) => {
            if start.total_minutes >= MINUTES_PER_DAY {
                return None;
            }
            let end_minutes =
                (start.total_minutes + settings.click_create_minutes).min(MINUTES_PER_DAY);
            let end = SnappedTime::from_minutes(end_minutes);
            (Some(start.hhmm()), Some(end.hhmm()))
        }
    };

    Some(CreateIntent {
        date: target.date,
        end_date: target.date,
        start_time,
        end_time,
        source_view: view,
    })
}
