/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 600 points
/// - 4 lines: 1000 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 600, 1000];

/// Game statistics: score, cleared lanes, locked pieces and line-clear counts.
///
/// A clear of N rows counts as one event of size N: a tetris adds one to
/// [`Self::tetris_count`] and four to [`Self::cleared_lanes`].
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, GameState, PieceKind, PieceQueue};
///
/// let board = Board::from_rows(&["IIIIIIIII."; 4]).unwrap();
/// let mut game = GameState::with_board(board, PieceQueue::scripted(vec![PieceKind::I])).unwrap();
/// game.start();
/// game.rotate_right();
/// for _ in 0..4 {
///     game.move_right();
/// }
/// game.hard_drop();
/// game.update_clearing_animation(0.3);
///
/// let stats = game.stats();
/// assert_eq!(stats.score(), 1000);
/// assert_eq!(stats.cleared_lanes(), 4);
/// assert_eq!(stats.tetris_count(), 1);
/// assert_eq!(stats.single_count(), 0);
/// ```
///
/// Counters only change through the game, never directly:
///
/// ```compile_fail
/// let mut stats = stackfall_engine::GameStats::new();
/// stats.record_clear(1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    cleared_lanes: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            cleared_lanes: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of rows removed.
    #[must_use]
    pub const fn cleared_lanes(&self) -> usize {
        self.cleared_lanes
    }

    #[must_use]
    pub const fn single_count(&self) -> usize {
        self.line_cleared_counter[1]
    }

    #[must_use]
    pub const fn double_count(&self) -> usize {
        self.line_cleared_counter[2]
    }

    #[must_use]
    pub const fn triple_count(&self) -> usize {
        self.line_cleared_counter[3]
    }

    #[must_use]
    pub const fn tetris_count(&self) -> usize {
        self.line_cleared_counter[4]
    }

    /// Returns a histogram of clears by size; index 0 counts locks that cleared nothing.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    pub(crate) const fn record_lock(&mut self) {
        self.completed_pieces += 1;
    }

    /// Records removal of `lines` rows in one clear (0 for a lock that cleared nothing).
    ///
    /// # Panics
    ///
    /// Panics if `lines` is greater than 4; a single tetromino can complete at most four rows.
    pub(crate) fn record_clear(&mut self, lines: usize) {
        assert!(
            lines < self.line_cleared_counter.len(),
            "a single lock cannot clear {lines} rows"
        );
        self.cleared_lanes += lines;
        self.line_cleared_counter[lines] += 1;
        self.score += SCORE_TABLE[lines];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_size_bumps_exactly_one_counter() {
        for lines in 1..=4 {
            let mut stats = GameStats::new();
            stats.record_clear(lines);
            assert_eq!(stats.cleared_lanes(), lines);
            let counts = [
                stats.single_count(),
                stats.double_count(),
                stats.triple_count(),
                stats.tetris_count(),
            ];
            for (i, count) in counts.into_iter().enumerate() {
                assert_eq!(count, usize::from(i + 1 == lines), "size {lines}");
            }
        }
    }

    #[test]
    fn test_larger_clears_pay_more_per_line() {
        for lines in 1..4 {
            let per_line = SCORE_TABLE[lines] / lines;
            let next_per_line = SCORE_TABLE[lines + 1] / (lines + 1);
            assert!(next_per_line > per_line);
        }
    }

    #[test]
    fn test_accumulates() {
        let mut stats = GameStats::new();
        stats.record_lock();
        stats.record_clear(1);
        stats.record_lock();
        stats.record_clear(2);
        stats.record_clear(1);
        assert_eq!(stats.score(), 500);
        assert_eq!(stats.cleared_lanes(), 4);
        assert_eq!(stats.single_count(), 2);
        assert_eq!(stats.double_count(), 1);
        assert_eq!(stats.completed_pieces(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot clear 5 rows")]
    fn test_rejects_impossible_clear() {
        GameStats::new().record_clear(5);
    }
}
