// Memoised view layouts.
//
// A layout is a pure function of its inputs, so the key holds everything that
// can change the result: view, the first date the view shows, the layout
// settings, the event store revision and today's date.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::NaiveDate;

use super::{visible_range, ViewComposer, ViewLayout};
use crate::models::event::{Event, ViewKind};
use crate::models::viewport::{GridKind, ViewportSpec};

const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    pub view: ViewKind,
    pub range_start: NaiveDate,
    /// Viewport fields as raw bits; `None` for the month grid.
    pub viewport: Option<[u64; 4]>,
    /// Lane stride and lane offset cap as raw bits.
    pub lane_offsets: [u64; 2],
    pub month_cell_cap: usize,
    pub revision: u64,
    pub today: NaiveDate,
}

impl LayoutKey {
    pub fn new(
        composer: &ViewComposer,
        view: ViewKind,
        date: NaiveDate,
        revision: u64,
        today: NaiveDate,
    ) -> Self {
        let settings = composer.settings();
        let (range_start, _) = visible_range(view, date, settings.first_day_of_week);
        let viewport = match view {
            ViewKind::Day => Some(viewport_bits(settings.viewport(GridKind::Day))),
            ViewKind::Week => Some(viewport_bits(settings.viewport(GridKind::Week))),
            ViewKind::Month => None,
        };
        Self {
            view,
            range_start,
            viewport,
            lane_offsets: [
                settings.lane_stride_px.to_bits(),
                settings.max_lane_offset_px.to_bits(),
            ],
            month_cell_cap: settings.month_max_events_per_cell,
            revision,
            today,
        }
    }
}

fn viewport_bits(viewport: &ViewportSpec) -> [u64; 4] {
    [
        viewport.visible_hour_start.to_bits(),
        viewport.visible_hour_end.to_bits(),
        viewport.pixels_per_hour.to_bits(),
        viewport.header_offset_px.to_bits(),
    ]
}

/// Bounded cache; the oldest entry is evicted first.
#[derive(Debug)]
pub struct LayoutCache {
    entries: HashMap<LayoutKey, Arc<ViewLayout>>,
    order: VecDeque<LayoutKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached layout for the inputs, composing it on a miss.
    pub fn get_or_compose(
        &mut self,
        composer: &ViewComposer,
        view: ViewKind,
        events: &[Event],
        revision: u64,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Arc<ViewLayout> {
        let key = LayoutKey::new(composer, view, date, revision, today);
        if let Some(layout) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(layout);
        }

        self.misses += 1;
        log::debug!("layout cache miss for {} view at {} (rev {})", view.as_str(), date, revision);
        let layout = Arc::new(composer.compose(view, events, date, today));
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.entries.insert(key, Arc::clone(&layout));
        layout
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
