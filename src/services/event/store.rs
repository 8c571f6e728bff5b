//! Canonical event list.
//!
//! The list is only ever replaced wholesale. Every replacement bumps the
//! revision, which layout caches use as part of their key.

use chrono::NaiveDate;
use serde_json::Value;

use super::feed::{FetchRequest, FetchScheduler, FetchTicket};
use crate::models::event::{Event, EventId};
use crate::services::normalizer::normalize_all;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    revision: u64,
    loaded: Option<FetchRequest>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Range covered by the last accepted fetch, if any.
    pub fn loaded_range(&self) -> Option<FetchRequest> {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.occurs_on(date))
    }

    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
        self.revision += 1;
        log::debug!("event store now holds {} events (rev {})", self.events.len(), self.revision);
    }

    /// Normalize and install a fetch response. Responses for a ticket that is
    /// no longer the scheduler's latest are discarded; returns whether the
    /// store changed.
    pub fn apply_response(
        &mut self,
        scheduler: &FetchScheduler,
        ticket: &FetchTicket,
        records: &[Value],
    ) -> bool {
        if !scheduler.is_current(ticket) {
            log::debug!(
                "discarding stale response for ticket {} ({} to {})",
                ticket.id,
                ticket.request.start,
                ticket.request.end
            );
            return false;
        }
        self.replace_all(normalize_all(records));
        self.loaded = Some(ticket.request);
        true
    }
}
