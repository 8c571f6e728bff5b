//! Event data flow around the layout core.
//! External read/write API traits, debounced fetch scheduling and the
//! canonical event store that fetch responses replace wholesale.

pub mod api;
pub mod feed;
pub mod store;

pub use api::{EventDraft, EventReader, EventWriter, StaticEventSource};
pub use feed::{FetchRequest, FetchScheduler, FetchTicket};
pub use store::EventStore;
