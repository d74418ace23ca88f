use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by the game loop.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Fixed-interval gravity step.
    Gravity,
    /// Frame timing, carrying the real time elapsed since the previous frame.
    Frame(Duration),
    /// Terminal events such as key input, mouse, and resize.
    #[from]
    Crossterm(CrosstermEvent),
}
