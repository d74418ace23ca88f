use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state.
///
/// Gravity and frame deadlines are tracked independently; whichever is due
/// first is returned by [`EventLoop::next`]. Terminal input is read while
/// waiting for the next deadline.
#[derive(Debug)]
pub(super) struct EventLoop {
    gravity_interval: Option<Duration>,
    frame_interval: Duration,
    last_gravity: Instant,
    last_frame: Instant,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates an event loop with gravity disabled and 60 frames per second.
    pub(super) fn new() -> Self {
        let now = Instant::now();
        Self {
            gravity_interval: None,
            frame_interval: Duration::from_secs_f64(1.0 / 60.0),
            last_gravity: now,
            last_frame: now,
        }
    }

    /// Sets the gravity interval. Pass `None` to stop gravity ticks.
    ///
    /// The gravity clock restarts, so re-enabling gravity never fires immediately.
    pub(super) fn set_gravity_interval(&mut self, interval: Option<Duration>) {
        self.gravity_interval = interval;
        self.last_gravity = Instant::now();
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until a gravity or frame deadline is reached or a terminal event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.gravity_interval
                && now.duration_since(self.last_gravity) >= interval
            {
                self.last_gravity = now;
                return Ok(TuiEvent::Gravity);
            }

            let since_frame = now.duration_since(self.last_frame);
            if since_frame >= self.frame_interval {
                self.last_frame = now;
                return Ok(TuiEvent::Frame(since_frame));
            }

            if !event::poll(self.compute_timeout(now))? {
                continue;
            }
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Duration {
        let next_frame_at = self.last_frame + self.frame_interval;
        let next_gravity_at = self
            .gravity_interval
            .map(|interval| self.last_gravity + interval);
        let next_at = next_gravity_at.map_or(next_frame_at, |at| at.min(next_frame_at));
        next_at.saturating_duration_since(now)
    }
}
