use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    board::Board,
    position::Position,
    rotation::{self, RotationDirection},
};

/// Anchor of a freshly spawned piece: the top-left corner of its bounding box.
///
/// The box starts one row above the board so that the flat side of every
/// piece in its spawn state lies on row 0.
pub const SPAWN_ANCHOR: Position = Position::new(-1, 3);

/// A tetromino at a specific location and orientation.
///
/// Pieces are values: moving or rotating returns a new `Piece` and leaves the
/// original untouched, so a rejected command simply produces nothing.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, Piece, PieceKind, Position, RotationDirection};
///
/// let board = Board::EMPTY;
/// let piece = Piece::spawn(PieceKind::T);
/// let moved = piece.try_move(&board, Position::RIGHT).unwrap();
/// let rotated = moved.try_rotate(&board, RotationDirection::Right).unwrap();
/// assert_eq!(rotated.rotation().index(), 1);
///
/// // The walls stop it.
/// let mut at_wall = piece;
/// while let Some(next) = at_wall.try_move(&board, Position::LEFT) {
///     at_wall = next;
/// }
/// assert!(at_wall.try_move(&board, Position::LEFT).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    anchor: Position,
}

impl Piece {
    /// Creates a piece at the spawn anchor in its spawn orientation.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: PieceRotation(0),
            anchor: SPAWN_ANCHOR,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Returns the absolute board cells covered by this piece.
    #[must_use]
    pub fn footprint(&self) -> [Position; 4] {
        self.kind
            .offsets(self.rotation)
            .map(|offset| self.anchor + offset)
    }

    #[must_use]
    pub fn shifted(&self, delta: Position) -> Self {
        Self {
            anchor: self.anchor + delta,
            ..*self
        }
    }

    #[must_use]
    pub(crate) fn with_rotation(&self, rotation: PieceRotation) -> Self {
        Self { rotation, ..*self }
    }

    /// Returns whether this piece overlaps a wall, the floor or a locked cell.
    #[must_use]
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(self.footprint())
    }

    /// Returns the piece shifted by `delta`, or `None` if it would collide.
    #[must_use]
    pub fn try_move(&self, board: &Board, delta: Position) -> Option<Self> {
        Some(self.shifted(delta)).filter(|piece| !piece.collides(board))
    }

    /// Rotates the piece one step, trying wall kicks if the plain rotation collides.
    ///
    /// Offsets are tried in the standard rotation system order; the first one
    /// that fits wins.
    #[must_use]
    pub fn try_rotate(&self, board: &Board, direction: RotationDirection) -> Option<Self> {
        let target = self.rotation.rotated(direction, self.kind.rotation_count());
        let rotated = self.with_rotation(target);
        rotation::kick_offsets(self.kind, self.rotation, direction)
            .iter()
            .map(|&kick| rotated.shifted(kick))
            .find(|piece| !piece.collides(board))
    }

    /// Returns the lowest position this piece can fall to without colliding.
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while let Some(piece) = dropped.try_move(board, Position::DOWN) {
            dropped = piece;
        }
        dropped
    }
}

/// Rotation state index of a piece.
///
/// `0` is the spawn orientation; each clockwise step adds one, wrapping at
/// the kind's rotation count (4, or 1 for the O piece).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn rotated(self, direction: RotationDirection, count: u8) -> Self {
        debug_assert!(count > 0, "a piece has at least one rotation state");
        let step = match direction {
            RotationDirection::Right => 1,
            RotationDirection::Left => count - 1,
        };
        Self((self.0 + step) % count)
    }
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Number of distinct rotation states.
    #[must_use]
    pub const fn rotation_count(self) -> u8 {
        match self {
            PieceKind::O => 1,
            _ => 4,
        }
    }

    /// Side length of the square bounding box the piece rotates in.
    #[must_use]
    pub const fn box_size(self) -> usize {
        match self {
            PieceKind::I | PieceKind::O => 4,
            _ => 3,
        }
    }

    /// Returns the occupied cells of `rotation`, relative to the bounding box's top-left.
    #[must_use]
    pub fn offsets(self, rotation: PieceRotation) -> [Position; 4] {
        PIECE_STATES[self as usize][rotation.index() % usize::from(self.rotation_count())]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::from_char('T'), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

type PieceCells = [Position; 4];

/// Generates the four rotation states by turning the spawn state 90° clockwise
/// inside a `size`×`size` box.
const fn cell_rotations(size: i32, spawn: PieceCells) -> [PieceCells; 4] {
    let mut states = [spawn; 4];
    let mut i = 1;
    while i < 4 {
        let mut j = 0;
        while j < 4 {
            let Position { row, col } = states[i - 1][j];
            states[i][j] = Position::new(col, size - 1 - row);
            j += 1;
        }
        i += 1;
    }
    states
}

const PIECE_STATES: [[PieceCells; 4]; PieceKind::LEN] = {
    const fn c(cells: [(i32, i32); 4]) -> PieceCells {
        let mut out = [Position::new(0, 0); 4];
        let mut i = 0;
        while i < 4 {
            out[i] = Position::new(cells[i].0, cells[i].1);
            i += 1;
        }
        out
    }

    [
        // I: ....
        //    IIII
        cell_rotations(4, c([(1, 0), (1, 1), (1, 2), (1, 3)])),
        // O: .OO.
        //    .OO.
        [c([(0, 1), (0, 2), (1, 1), (1, 2)]); 4],
        // T: .T.
        //    TTT
        cell_rotations(3, c([(0, 1), (1, 0), (1, 1), (1, 2)])),
        // S: .SS
        //    SS.
        cell_rotations(3, c([(0, 1), (0, 2), (1, 0), (1, 1)])),
        // Z: ZZ.
        //    .ZZ
        cell_rotations(3, c([(0, 0), (0, 1), (1, 1), (1, 2)])),
        // J: J..
        //    JJJ
        cell_rotations(3, c([(0, 0), (1, 0), (1, 1), (1, 2)])),
        // L: ..L
        //    LLL
        cell_rotations(3, c([(0, 2), (1, 0), (1, 1), (1, 2)])),
    ]
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sorted(mut cells: [Position; 4]) -> [Position; 4] {
        cells.sort_by_key(|p| (p.row, p.col));
        cells
    }

    #[test]
    fn test_t_rotation_states() {
        let expected = [
            [(0, 1), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 1), (1, 2), (2, 1)],
            [(1, 0), (1, 1), (1, 2), (2, 1)],
            [(0, 1), (1, 0), (1, 1), (2, 1)],
        ];
        for (i, cells) in expected.iter().enumerate() {
            let cells = cells.map(|(r, c)| Position::new(r, c));
            let rotation = PieceRotation(u8::try_from(i).unwrap());
            assert_eq!(sorted(PieceKind::T.offsets(rotation)), cells, "state {i}");
        }
    }

    #[test]
    fn test_i_vertical_state() {
        let east = sorted(PieceKind::I.offsets(PieceRotation(1)));
        assert_eq!(
            east,
            [(0, 2), (1, 2), (2, 2), (3, 2)].map(|(r, c)| Position::new(r, c))
        );
    }

    #[test]
    fn test_states_stay_inside_box_and_are_distinct_cells() {
        for kind in PieceKind::ALL {
            let size = i32::try_from(kind.box_size()).unwrap();
            for i in 0..kind.rotation_count() {
                let cells = kind.offsets(PieceRotation(i));
                let unique: HashSet<_> = cells.iter().collect();
                assert_eq!(unique.len(), 4, "{kind:?} state {i}");
                for p in cells {
                    assert!((0..size).contains(&p.row) && (0..size).contains(&p.col));
                }
            }
        }
    }

    #[test]
    fn test_spawn_lies_on_top_row() {
        for kind in PieceKind::ALL {
            let footprint = Piece::spawn(kind).footprint();
            let lowest = footprint.iter().map(|p| p.row).max().unwrap();
            assert_eq!(lowest, 0, "{kind:?}");
            let cols: Vec<_> = footprint.iter().map(|p| p.col).collect();
            assert!(cols.iter().all(|c| (3..7).contains(c)), "{kind:?}");
        }
    }

    #[test]
    fn test_o_piece_rotation_is_identity() {
        let board = Board::EMPTY;
        let piece = Piece::spawn(PieceKind::O).shifted(Position::new(5, 0));
        let rotated = piece.try_rotate(&board, RotationDirection::Right).unwrap();
        assert_eq!(rotated, piece);
        assert_eq!(rotated.rotation().index(), 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let r = PieceRotation::default();
        assert_eq!(r.rotated(RotationDirection::Left, 4), PieceRotation(3));
        assert_eq!(r.rotated(RotationDirection::Right, 4), PieceRotation(1));
        assert_eq!(PieceRotation(3).rotated(RotationDirection::Right, 4), r);
        assert_eq!(r.rotated(RotationDirection::Left, 1), r);
    }

    #[test]
    fn test_try_move_rejects_collision() {
        let board = Board::from_rows(&["..........", "....I....."]).unwrap();
        let piece = Piece::spawn(PieceKind::O).shifted(Position::new(18, 0));
        // columns 4-5, rows 17-18; the I block sits under column 4
        assert_eq!(piece.footprint().iter().map(|p| p.row).max(), Some(18));
        assert!(piece.try_move(&board, Position::DOWN).is_none());
        assert!(piece.try_move(&board, Position::RIGHT).is_some());
    }

    #[test]
    fn test_drop_position() {
        let board = Board::from_rows(&["IIII......"]).unwrap();
        let piece = Piece::spawn(PieceKind::I);
        let dropped = piece.drop_position(&board);
        assert!(dropped.footprint().iter().all(|p| p.row == 18));
        assert!(dropped.try_move(&board, Position::DOWN).is_none());
    }

    #[test]
    fn test_rotation_is_invertible_in_open_space() {
        let board = Board::EMPTY;
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind).shifted(Position::new(8, 0));
            for (there, back) in [
                (RotationDirection::Right, RotationDirection::Left),
                (RotationDirection::Left, RotationDirection::Right),
            ] {
                let turned = piece.try_rotate(&board, there).unwrap();
                let restored = turned.try_rotate(&board, back).unwrap();
                assert_eq!(sorted(restored.footprint()), sorted(piece.footprint()));
            }
        }
    }

    #[test]
    fn test_kicked_rotation_is_not_undone_at_wall() {
        let board = Board::EMPTY;
        let vertical = Piece::spawn(PieceKind::I)
            .try_rotate(&board, RotationDirection::Right)
            .unwrap();
        // Hug the left wall: column 0, rows 5-8.
        let vertical = vertical.shifted(Position::new(6, -5));
        assert!(vertical.footprint().iter().all(|p| p.col == 0));
        assert!(!vertical.collides(&board));

        // The horizontal state only fits after a two-column kick away from the
        // wall, and turning back needs no kick, so the piece stays displaced.
        let turned = vertical.try_rotate(&board, RotationDirection::Right).unwrap();
        let restored = turned.try_rotate(&board, RotationDirection::Left).unwrap();
        assert_eq!(restored.rotation(), vertical.rotation());
        let displaced = vertical.footprint().map(|p| p + Position::new(0, 2));
        assert_eq!(sorted(restored.footprint()), sorted(displaced));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }
}
