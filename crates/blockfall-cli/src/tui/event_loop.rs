use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state management.
///
/// Ticks come from two sources: a fixed `tick_interval` and a one-shot
/// wake-up requested with [`EventLoop::wake_at`]. Whichever comes first
/// produces the next `Tick`. Without either, only crossterm events and renders
/// are produced.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    wake_at: Option<Instant>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            wake_at: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Requests a tick at `at`, replacing any earlier request.
    pub(super) fn wake_at(&mut self, at: Option<Instant>) {
        self.wake_at = at;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.next_tick_at().is_some_and(|at| now >= at) {
                self.last_tick = now;
                self.wake_at = None;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            let do_render = match self.render_mode {
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if do_render {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn next_tick_at(&self) -> Option<Instant> {
        let interval_at = self.tick_interval.map(|interval| self.last_tick + interval);
        [interval_at, self.wake_at].into_iter().flatten().min()
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [self.next_tick_at(), next_render_at]
            .into_iter()
            .flatten()
            .min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_up_precedes_tick_interval() {
        let mut events = EventLoop::new();
        let base = events.last_tick;
        events.set_tick_interval(Some(Duration::from_millis(100)));
        events.wake_at(Some(base + Duration::from_millis(30)));
        assert_eq!(
            events.next_tick_at(),
            Some(base + Duration::from_millis(30))
        );
        events.wake_at(None);
        assert_eq!(
            events.next_tick_at(),
            Some(base + Duration::from_millis(100))
        );
    }

    #[test]
    fn test_no_tick_source_means_no_tick() {
        let events = EventLoop::new();
        assert_eq!(events.next_tick_at(), None);
    }

    #[test]
    fn test_throttled_timeout_waits_for_interval() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.set_render_mode(RenderMode::Throttled(Duration::from_millis(20)));
        events.last_render = now;
        events.dirty = true;
        assert_eq!(
            events.compute_timeout(now),
            Some(Duration::from_millis(20))
        );
        events.dirty = false;
        assert_eq!(events.compute_timeout(now), None);
    }
}
