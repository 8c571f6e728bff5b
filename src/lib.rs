// Calendar layout engine
// Event normalization, time-grid geometry, lane allocation, view composition
// and drag-to-create gestures for day, week and month calendar views.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{CalendarError, CalendarResult};
pub use models::event::{Event, EventId, EventStatus, Priority, ViewKind};
pub use models::layout::{CreateIntent, LayoutDescriptor, TrackAssignment};
pub use models::settings::EngineSettings;
pub use models::viewport::{ContainerRect, GridKind, ViewportSpec};
pub use services::composer::{LayoutCache, ViewComposer, ViewLayout};
pub use services::normalizer::{normalize, normalize_all};
