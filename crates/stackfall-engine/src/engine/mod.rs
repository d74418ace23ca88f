//! Game state machine and the pieces it orchestrates.
//!
//! - [`GameState`] - board, active piece, status and the full command API
//! - [`ClearAnimation`] - timed phase between a line-completing lock and row removal
//! - [`GameStats`] - score, cleared lanes and line-clear counters
//! - [`PieceQueue`] - upcoming pieces with a selectable [`Randomizer`]
//! - [`Surface`] - drawing target for [`GameState::render`]
//!
//! # Game Flow
//!
//! 1. Construct a [`GameState`] and call [`GameState::start`]
//! 2. Move and rotate the active piece; call [`GameState::move_down`] on a fixed interval
//! 3. A piece that cannot fall further is locked into the board
//! 4. Full rows fade out while [`GameState::update_clearing_animation`] is fed frame time,
//!    then disappear and the next piece spawns
//! 5. Repeat until a new piece collides at its spawn position
//!
//! # Status transitions
//!
//! ```text
//! Ready --start--> Playing <--pause/unpause--> Paused
//! Playing --lock with full rows--> Clearing --animation done--> Playing
//! Playing/Clearing --spawn collides--> GameOver
//! ```

pub use self::{clear_animation::*, game_state::*, game_stats::*, piece_queue::*, render::*};

mod clear_animation;
mod game_state;
mod game_stats;
mod piece_queue;
mod render;
