//! Falling-block puzzle game engine.
//!
//! The engine owns the board, the active and queued pieces, movement and
//! rotation legality, line-clear detection with its fade-out animation, and
//! scoring. It performs no I/O and has no timers: the host drives it with
//! discrete commands, a periodic gravity call and a per-frame animation tick.
//!
//! ```
//! use stackfall_engine::GameState;
//!
//! let mut game = GameState::new();
//! game.start();
//! game.move_left();
//! game.rotate_right();
//! while game.move_down() {}
//! assert_eq!(game.stats().completed_pieces(), 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A board coordinate outside the visible grid was addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the board")]
pub struct OutOfRangeError {
    pub row: i32,
    pub col: i32,
}
