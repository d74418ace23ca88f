use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime.
///
/// Owns the event loop and funnels gravity, frame and input events into a
/// single [`App`], so the game state is only ever touched from one place.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gravity interval. `None` disables gravity ticks.
    pub fn set_gravity_interval(&mut self, interval: Option<Duration>) {
        self.events.set_gravity_interval(interval);
    }

    /// Sets the frame rate (frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.events
            .set_frame_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// - `Gravity`: calls `app.on_gravity()`
    /// - `Frame(dt)`: calls `app.update()` with `dt` in seconds, then `app.draw()`
    /// - `Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Gravity => {
                        app.on_gravity(&mut self);
                    }
                    TuiEvent::Frame(dt) => {
                        app.update(&mut self, dt.as_secs_f64());
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, &event);
                    }
                }
            }
            Ok(())
        })
    }
}
