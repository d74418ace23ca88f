use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for applications driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Use this to configure gravity and frame rate.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: &Event);

    /// Called on each gravity tick.
    fn on_gravity(&mut self, tui: &mut Tui);

    /// Advances time-based state by `dt` seconds; called right before each draw.
    fn update(&mut self, tui: &mut Tui, dt: f64);

    fn draw(&self, frame: &mut Frame);
}
