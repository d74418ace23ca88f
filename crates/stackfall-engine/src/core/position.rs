use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A signed `(row, col)` coordinate.
///
/// Rows grow downward. Negative rows lie in the hidden spawn area above the
/// visible board, which is why coordinates are signed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const LEFT: Self = Self::new(0, -1);
    pub const RIGHT: Self = Self::new(0, 1);
    pub const DOWN: Self = Self::new(1, 0);
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}
