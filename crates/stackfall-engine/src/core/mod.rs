pub use self::{board::*, piece::*, position::*, rotation::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod position;
pub(crate) mod rotation;

/// Number of visible columns.
pub const BOARD_WIDTH: usize = 10;
/// Number of visible rows.
pub const BOARD_HEIGHT: usize = 20;
