//! Debounced fetch scheduling.
//!
//! Navigation records a pending request; a ticket is only issued once the
//! debounce interval has passed without a newer request. Tickets carry a
//! monotonically increasing id so late responses for an older ticket can be
//! recognised and dropped.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;

use super::api::EventReader;
use crate::models::event::ViewKind;
use crate::services::composer::visible_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    pub view: ViewKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchRequest {
    pub fn for_view(view: ViewKind, date: NaiveDate, first_day_of_week: u8) -> Self {
        let (start, end) = visible_range(view, date, first_day_of_week);
        Self { view, start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub request: FetchRequest,
}

impl FetchTicket {
    /// Run the range query for this ticket.
    pub fn execute<R: EventReader + ?Sized>(&self, reader: &R) -> Result<Vec<Value>> {
        reader
            .list_by_range(self.request.start, self.request.end)
            .with_context(|| {
                format!(
                    "Failed to fetch events for {} to {}",
                    self.request.start, self.request.end
                )
            })
    }
}

#[derive(Debug)]
pub struct FetchScheduler {
    debounce: Duration,
    pending: Option<(FetchRequest, Instant)>,
    latest: Option<FetchTicket>,
    next_id: u64,
}

impl FetchScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
            latest: None,
            next_id: 1,
        }
    }

    /// Record a navigation. Replaces any pending request and restarts the wait.
    pub fn request(&mut self, request: FetchRequest, now: Instant) {
        self.pending = Some((request, now));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Issue a ticket if the pending request has been quiet long enough.
    ///
    /// A request identical to the last issued one is dropped; call
    /// [`invalidate`](Self::invalidate) first to force a refetch.
    pub fn poll(&mut self, now: Instant) -> Option<FetchTicket> {
        let (request, requested_at) = self.pending?;
        if now.saturating_duration_since(requested_at) < self.debounce {
            return None;
        }
        self.pending = None;

        if self.latest.is_some_and(|t| t.request == request) {
            log::debug!("skipping fetch for unchanged range {} to {}", request.start, request.end);
            return None;
        }

        let ticket = FetchTicket {
            id: self.next_id,
            request,
        };
        self.next_id += 1;
        self.latest = Some(ticket);
        Some(ticket)
    }

    /// Time left before the pending request may be issued.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, at)| self.debounce.saturating_sub(now.saturating_duration_since(at)))
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.latest.is_some_and(|latest| latest.id == ticket.id)
    }

    pub fn latest(&self) -> Option<FetchTicket> {
        self.latest
    }

    /// Forget the last issued request so the same range is fetched again
    /// (after a write, for instance).
    pub fn invalidate(&mut self) {
        self.latest = None;
    }
}
