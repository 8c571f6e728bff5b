// Auto-scroll resource
//
// Started and stopped only by gesture transitions. Starting is idempotent and
// every exit path (release, cancel, drop) stops it.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::models::settings::EngineSettings;
use crate::models::viewport::ContainerRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Sign of the scroll delta (up scrolls toward earlier hours).
    pub fn sign(&self) -> f64 {
        match self {
            ScrollDirection::Up => -1.0,
            ScrollDirection::Down => 1.0,
        }
    }
}

/// Direction to scroll when the pointer sits within `zone_px` of the top
/// (below the header) or bottom edge of the scroll container.
pub fn scroll_direction_for(
    pointer_y: f64,
    container: ContainerRect,
    header_px: f64,
    zone_px: f64,
) -> Option<ScrollDirection> {
    let content_top = container.top + header_px;
    if pointer_y - content_top < zone_px {
        Some(ScrollDirection::Up)
    } else if container.bottom() - pointer_y < zone_px {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}

/// A periodic scroller owned by a drag gesture.
pub trait AutoScroll {
    /// Begin scrolling in `direction`. No-op when already scrolling that way.
    fn start(&mut self, direction: ScrollDirection);
    /// Stop scrolling. No-op when idle.
    fn stop(&mut self);
    fn direction(&self) -> Option<ScrollDirection>;

    fn is_running(&self) -> bool {
        self.direction().is_some()
    }
}

/// Tick-driven scroller for hosts that run their own frame loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAutoScroll {
    direction: Option<ScrollDirection>,
    step_px: f64,
    starts: usize,
}

impl FrameAutoScroll {
    pub fn new(step_px: f64) -> Self {
        Self {
            direction: None,
            step_px,
            starts: 0,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.scroll_step_px)
    }

    /// Scroll delta for one tick; zero while stopped.
    pub fn tick(&mut self) -> f64 {
        self.direction
            .map_or(0.0, |direction| direction.sign() * self.step_px)
    }

    /// Number of times scrolling actually (re)started.
    pub fn start_count(&self) -> usize {
        self.starts
    }
}

impl AutoScroll for FrameAutoScroll {
    fn start(&mut self, direction: ScrollDirection) {
        if self.direction == Some(direction) {
            return;
        }
        self.direction = Some(direction);
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.direction = None;
    }

    fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }
}

/// The scrollable container an auto-scroll timer moves.
pub trait ScrollTarget: Send + Sync + 'static {
    fn scroll_by(&self, delta_px: f64);
}

/// Fixed-period scroller backed by a tokio interval task.
pub struct TimerAutoScroll<T: ScrollTarget> {
    runtime: Handle,
    target: Arc<T>,
    tick: Duration,
    step_px: f64,
    running: Option<(ScrollDirection, JoinHandle<()>)>,
}

impl<T: ScrollTarget> TimerAutoScroll<T> {
    pub fn new(runtime: Handle, target: Arc<T>, settings: &EngineSettings) -> Self {
        Self {
            runtime,
            target,
            tick: settings.scroll_tick(),
            step_px: settings.scroll_step_px,
            running: None,
        }
    }

    pub fn target(&self) -> &Arc<T> {
        &self.target
    }
}

impl<T: ScrollTarget> AutoScroll for TimerAutoScroll<T> {
    fn start(&mut self, direction: ScrollDirection) {
        if self.direction() == Some(direction) {
            return;
        }
        self.stop();

        let target = Arc::clone(&self.target);
        let period = self.tick;
        let delta = direction.sign() * self.step_px;
        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                log::trace!("auto-scroll by {}px", delta);
                target.scroll_by(delta);
            }
        });

        log::debug!("auto-scroll started ({:?})", direction);
        self.running = Some((direction, task));
    }

    fn stop(&mut self) {
        if let Some((direction, task)) = self.running.take() {
            task.abort();
            log::debug!("auto-scroll stopped ({:?})", direction);
        }
    }

    fn direction(&self) -> Option<ScrollDirection> {
        self.running.as_ref().map(|(direction, _)| *direction)
    }
}

impl<T: ScrollTarget> Drop for TimerAutoScroll<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTarget {
        scrolled: Mutex<f64>,
    }

    impl RecordingTarget {
        fn total(&self) -> f64 {
            *self.scrolled.lock().unwrap()
        }
    }

    impl ScrollTarget for RecordingTarget {
        fn scroll_by(&self, delta_px: f64) {
            *self.scrolled.lock().unwrap() += delta_px;
        }
    }

    #[test]
    fn test_scroll_zone_detection() {
        let rect = ContainerRect::new(100.0, 600.0);
        assert_eq!(scroll_direction_for(150.0, rect, 0.0, 100.0), Some(ScrollDirection::Up));
        assert_eq!(scroll_direction_for(400.0, rect, 0.0, 100.0), None);
        assert_eq!(scroll_direction_for(650.0, rect, 0.0, 100.0), Some(ScrollDirection::Down));
        // header pushes the top zone down
        assert_eq!(scroll_direction_for(230.0, rect, 40.0, 100.0), Some(ScrollDirection::Up));
        assert_eq!(scroll_direction_for(250.0, rect, 40.0, 100.0), None);
    }

    #[test]
    fn test_frame_scroller_is_idempotent() {
        let mut scroller = FrameAutoScroll::new(8.0);
        assert_eq!(scroller.tick(), 0.0);

        scroller.start(ScrollDirection::Down);
        scroller.start(ScrollDirection::Down);
        assert_eq!(scroller.start_count(), 1);
        assert_eq!(scroller.tick(), 8.0);

        scroller.start(ScrollDirection::Up);
        assert_eq!(scroller.tick(), -8.0);
        assert_eq!(scroller.start_count(), 2);

        scroller.stop();
        assert!(!scroller.is_running());
        assert_eq!(scroller.tick(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_scroller_ticks_until_stopped() {
        let target = Arc::new(RecordingTarget::default());
        let mut scroller =
            TimerAutoScroll::new(Handle::current(), Arc::clone(&target), &EngineSettings::default());

        scroller.start(ScrollDirection::Down);
        tokio::time::sleep(Duration::from_millis(16 * 5 + 1)).await;
        let scrolled = target.total();
        assert!((32.0..=48.0).contains(&scrolled), "scrolled {}", scrolled);

        scroller.stop();
        assert!(!scroller.is_running());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(target.total(), scrolled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_scroller_stops_on_drop() {
        let target = Arc::new(RecordingTarget::default());
        {
            let mut scroller = TimerAutoScroll::new(
                Handle::current(),
                Arc::clone(&target),
                &EngineSettings::default(),
            );
            scroller.start(ScrollDirection::Up);
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        let scrolled = target.total();
        assert!(scrolled < 0.0);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(target.total(), scrolled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_scroller_restart_same_direction_keeps_task() {
        let target = Arc::new(RecordingTarget::default());
        let mut scroller =
            TimerAutoScroll::new(Handle::current(), Arc::clone(&target), &EngineSettings::default());
        scroller.start(ScrollDirection::Down);
        scroller.start(ScrollDirection::Down);
        assert_eq!(scroller.direction(), Some(ScrollDirection::Down));
        scroller.start(ScrollDirection::Up);
        assert_eq!(scroller.direction(), Some(ScrollDirection::Up));
    }
}
