//! Wall kick offsets of the standard rotation system.
//!
//! When a rotated piece collides, up to four alternative positions are tried
//! before the rotation is rejected. J, L, S, T and Z share one table, I has
//! its own, and O never needs a kick.

use super::{piece::PieceKind, piece::PieceRotation, position::Position};

/// Direction of a single rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    /// Counterclockwise.
    Left,
    /// Clockwise.
    Right,
}

impl RotationDirection {
    const fn as_usize(self) -> usize {
        match self {
            RotationDirection::Right => 0,
            RotationDirection::Left => 1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            RotationDirection::Left => RotationDirection::Right,
            RotationDirection::Right => RotationDirection::Left,
        }
    }
}

type Kicks = [Position; 5];

/// Converts a table written as `(x, y)` with y pointing up into board offsets.
const fn kicks(table: [(i32, i32); 5]) -> Kicks {
    let mut out = [Position::new(0, 0); 5];
    let mut i = 0;
    while i < 5 {
        out[i] = Position::new(-table[i].1, table[i].0);
        i += 1;
    }
    out
}

// Indexed by [from rotation][direction]; direction 0 is clockwise.
const JLSTZ_KICKS: [[Kicks; 2]; 4] = [
    [
        kicks([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]), // 0 -> R
        kicks([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),    // 0 -> L
    ],
    [
        kicks([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]), // R -> 2
        kicks([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]), // R -> 0
    ],
    [
        kicks([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),    // 2 -> L
        kicks([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]), // 2 -> R
    ],
    [
        kicks([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]), // L -> 0
        kicks([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]), // L -> 2
    ],
];

const I_KICKS: [[Kicks; 2]; 4] = [
    [
        kicks([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]), // 0 -> R
        kicks([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]), // 0 -> L
    ],
    [
        kicks([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]), // R -> 2
        kicks([(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]), // R -> 0
    ],
    [
        kicks([(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]), // 2 -> L
        kicks([(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]), // 2 -> R
    ],
    [
        kicks([(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]), // L -> 0
        kicks([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]), // L -> 2
    ],
];

const NO_KICK: [Position; 1] = [Position::new(0, 0)];

/// Returns the offsets to try, in order, when rotating `kind` from `from` in `direction`.
///
/// The first offset is always the unshifted position.
#[must_use]
pub fn kick_offsets(
    kind: PieceKind,
    from: PieceRotation,
    direction: RotationDirection,
) -> &'static [Position] {
    let table = match kind {
        PieceKind::O => return &NO_KICK,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    &table[from.index() % 4][direction.as_usize()]
}
