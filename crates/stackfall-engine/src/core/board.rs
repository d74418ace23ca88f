use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::OutOfRangeError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, piece::PieceKind, position::Position};

const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// A single board cell.
///
/// Occupied cells remember the kind of the piece that was locked into them,
/// which is what gives each cell its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind),
        }
    }

    const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Piece(kind) => kind.as_char(),
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Block::Empty);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Block::Piece(kind)),
            None => None,
        }
    }
}

/// Error returned when a board text layout cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected at most {BOARD_HEIGHT} rows, got {_0}")]
    TooManyRows(#[error(not(source))] usize),
    #[display("row {row} has {len} cells, expected {BOARD_WIDTH}")]
    RowWidth { row: usize, len: usize },
    #[display("invalid cell character {_0:?}")]
    InvalidCell(#[error(not(source))] char),
}

/// The 10×20 playing field.
///
/// Cells are stored in a flat row-major array (`row * BOARD_WIDTH + col`).
/// Row 0 is the top visible row. The area above row 0 is unbounded and always
/// empty: pieces may hang into it, but nothing is ever stored there.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, PieceKind, Position};
///
/// let mut board = Board::EMPTY;
/// let cells = [Position::new(19, 0), Position::new(19, 1)];
/// assert!(!board.collides(cells));
/// board.lock(cells, PieceKind::O);
/// assert!(board.collides([Position::new(19, 1)]));
/// assert_eq!(board.is_occupied(19, 0), Ok(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Block; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        cells: [Block::Empty; BOARD_SIZE],
    };

    #[inline]
    fn index(row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&r| r < BOARD_HEIGHT)?;
        let col = usize::try_from(col).ok().filter(|&c| c < BOARD_WIDTH)?;
        Some(row * BOARD_WIDTH + col)
    }

    /// Returns the block stored at `(row, col)`.
    pub fn block_at(&self, row: i32, col: i32) -> Result<Block, OutOfRangeError> {
        Self::index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(OutOfRangeError { row, col })
    }

    /// Returns whether `(row, col)` holds a locked block.
    pub fn is_occupied(&self, row: i32, col: i32) -> Result<bool, OutOfRangeError> {
        self.block_at(row, col).map(|block| !block.is_empty())
    }

    /// Returns whether any of `cells` is blocked.
    ///
    /// A cell is blocked when it is left of column 0, right of the last column,
    /// below the bottom row, or on an occupied cell. Cells above row 0 are
    /// never blocked.
    pub fn collides<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = Position>,
    {
        cells.into_iter().any(|Position { row, col }| {
            let Ok(col_idx) = usize::try_from(col) else {
                return true;
            };
            if col_idx >= BOARD_WIDTH {
                return true;
            }
            let Ok(row_idx) = usize::try_from(row) else {
                return false;
            };
            if row_idx >= BOARD_HEIGHT {
                return true;
            }
            !self.cells[row_idx * BOARD_WIDTH + col_idx].is_empty()
        })
    }

    /// Writes `kind` into every cell of `cells`.
    ///
    /// The caller must have checked [`Self::collides`] first. Cells above the
    /// top row are dropped.
    pub fn lock<I>(&mut self, cells: I, kind: PieceKind)
    where
        I: IntoIterator<Item = Position>,
    {
        for Position { row, col } in cells {
            if let Some(idx) = Self::index(row, col) {
                self.cells[idx] = Block::Piece(kind);
            }
        }
    }

    fn row(&self, row: usize) -> &[Block] {
        &self.cells[row * BOARD_WIDTH..][..BOARD_WIDTH]
    }

    /// Returns whether every cell in `row` is occupied.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        row < BOARD_HEIGHT && self.row(row).iter().all(|b| !b.is_empty())
    }

    /// Returns the indices of all full rows in ascending order.
    #[must_use]
    pub fn full_rows(&self) -> ArrayVec<usize, BOARD_HEIGHT> {
        (0..BOARD_HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Removes the given rows and lets everything above them fall.
    ///
    /// `rows` is treated as a set of indices into the board as it is now, so
    /// order and duplicates do not matter. Emptied rows appear at the top.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut removed = [false; BOARD_HEIGHT];
        for &y in rows {
            debug_assert!(y < BOARD_HEIGHT, "row {y} is outside the board");
            if let Some(flag) = removed.get_mut(y) {
                *flag = true;
            }
        }

        let mut write = BOARD_HEIGHT;
        for read in (0..BOARD_HEIGHT).rev() {
            if removed[read] {
                continue;
            }
            write -= 1;
            if write != read {
                self.cells
                    .copy_within(read * BOARD_WIDTH..(read + 1) * BOARD_WIDTH, write * BOARD_WIDTH);
            }
        }
        self.cells[..write * BOARD_WIDTH].fill(Block::Empty);
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.cells.chunks_exact(BOARD_WIDTH)
    }

    /// Builds a board from a text layout.
    ///
    /// Each string is one row, `.` for empty and a piece letter for occupied.
    /// Rows are aligned to the bottom of the board; missing rows on top are empty.
    ///
    /// ```
    /// use stackfall_engine::Board;
    ///
    /// let board = Board::from_rows(&["IIIIIIIII."]).unwrap();
    /// assert_eq!(board.is_occupied(19, 0), Ok(true));
    /// assert_eq!(board.is_occupied(19, 9), Ok(false));
    /// ```
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, ParseBoardError>
    where
        S: AsRef<str>,
    {
        if rows.len() > BOARD_HEIGHT {
            return Err(ParseBoardError::TooManyRows(rows.len()));
        }
        let mut board = Self::EMPTY;
        let top = BOARD_HEIGHT - rows.len();
        for (i, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let len = text.chars().count();
            if len != BOARD_WIDTH {
                return Err(ParseBoardError::RowWidth { row: i, len });
            }
            for (x, c) in text.chars().enumerate() {
                let block = Block::from_char(c).ok_or(ParseBoardError::InvalidCell(c))?;
                board.cells[(top + i) * BOARD_WIDTH + x] = block;
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for block in row {
                write!(f, "{}", block.as_char())?;
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "........../........../..." (top to bottom, '/'-separated)
        let text = self.to_string().replace('\n', "/");
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let rows: Vec<&str> = s.split('/').collect();
        Board::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_index_bounds() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(19, 9), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(20, 0), None);
    }

    #[test]
    fn test_is_occupied_out_of_range() {
        let board = Board::EMPTY;
        assert_eq!(board.is_occupied(0, 0), Ok(false));
        assert_eq!(
            board.is_occupied(20, 0),
            Err(OutOfRangeError { row: 20, col: 0 })
        );
        assert_eq!(
            board.is_occupied(0, -1),
            Err(OutOfRangeError { row: 0, col: -1 })
        );
        assert_eq!(
            board.is_occupied(-1, 3),
            Err(OutOfRangeError { row: -1, col: 3 })
        );
    }

    #[test]
    fn test_collides_bounds() {
        let board = Board::EMPTY;
        assert!(!board.collides(cells(&[(0, 0), (19, 9)])));
        // left, right and bottom are walls
        assert!(board.collides(cells(&[(5, -1)])));
        assert!(board.collides(cells(&[(5, 10)])));
        assert!(board.collides(cells(&[(20, 5)])));
        // top is open
        assert!(!board.collides(cells(&[(-1, 5), (-3, 0)])));
        // but not beside the walls
        assert!(board.collides(cells(&[(-2, -1)])));
        assert!(!board.collides(Vec::new()));
    }

    #[test]
    fn test_collides_with_locked_cells() {
        let mut board = Board::EMPTY;
        board.lock(cells(&[(10, 4)]), PieceKind::T);
        assert!(board.collides(cells(&[(0, 0), (10, 4)])));
        assert!(!board.collides(cells(&[(10, 3), (10, 5), (9, 4), (11, 4)])));
    }

    #[test]
    fn test_lock_stores_kind_and_skips_hidden_rows() {
        let mut board = Board::EMPTY;
        board.lock(cells(&[(-1, 4), (0, 4), (0, 5)]), PieceKind::L);
        assert_eq!(board.block_at(0, 4), Ok(Block::Piece(PieceKind::L)));
        assert_eq!(board.block_at(0, 5), Ok(Block::Piece(PieceKind::L)));
        let occupied = board.rows().flatten().filter(|b| !b.is_empty()).count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_full_rows_after_lock() {
        let mut board = Board::from_rows(&[
            "JJJJJJJJ..", //
            "SSSSSSSS..",
            "ZZZZZZZZZ.",
        ])
        .unwrap();
        assert!(board.full_rows().is_empty());

        let footprint = cells(&[(17, 8), (17, 9), (18, 8), (18, 9)]);
        assert!(!board.collides(footprint.iter().copied()));
        board.lock(footprint, PieceKind::O);
        assert_eq!(board.full_rows().as_slice(), &[17, 18]);
    }

    #[test]
    fn test_remove_rows_shifts_down() {
        let mut board = Board::from_rows(&[
            "T.........", //
            "IIIIIIIIII",
            ".L........",
            "OOOOOOOOOO",
        ])
        .unwrap();
        board.remove_rows(&[17, 19]);
        let expected = Board::from_rows(&[
            "T.........", //
            ".L........",
        ])
        .unwrap();
        assert_eq!(board, expected);
    }

    #[test]
    fn test_remove_rows_is_order_independent() {
        let original = Board::from_rows(&[
            "IIIIIIIIII", // 14
            "J.........",
            "..S.......",
            "IIIIIIIIII", // 17
            "....Z.....",
        ])
        .unwrap();

        let mut at_once = original.clone();
        at_once.remove_rows(&[14, 17]);

        let mut reversed = original.clone();
        reversed.remove_rows(&[17, 14, 17]);

        // Removing 17 first moves the old row 14 down to 15.
        let mut bottom_first = original.clone();
        bottom_first.remove_rows(&[17]);
        bottom_first.remove_rows(&[15]);

        let mut top_first = original;
        top_first.remove_rows(&[14]);
        top_first.remove_rows(&[17]);

        let expected = Board::from_rows(&[
            "J.........", //
            "..S.......",
            "....Z.....",
        ])
        .unwrap();
        assert_eq!(at_once, expected);
        assert_eq!(reversed, expected);
        assert_eq!(bottom_first, expected);
        assert_eq!(top_first, expected);
    }

    #[test]
    fn test_remove_all_rows() {
        let layout = ["IIIIIIIIII"; BOARD_HEIGHT];
        let mut board = Board::from_rows(&layout).unwrap();
        let full = board.full_rows();
        assert_eq!(full.len(), BOARD_HEIGHT);
        board.remove_rows(&full);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(
            Board::from_rows(&["IIII"]),
            Err(ParseBoardError::RowWidth { row: 0, len: 4 })
        );
        assert_eq!(
            Board::from_rows(&["IIIIIIIIIX"]),
            Err(ParseBoardError::InvalidCell('X'))
        );
        let too_many = [".........."; BOARD_HEIGHT + 1];
        assert_eq!(
            Board::from_rows(&too_many),
            Err(ParseBoardError::TooManyRows(BOARD_HEIGHT + 1))
        );
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_rows(&["I........T"]).unwrap();
        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.ends_with("/I........T\""));
        assert_eq!(serialized.matches('/').count(), BOARD_HEIGHT - 1);

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>("\"I........T/I\"").is_err());
    }
}
