use arrayvec::ArrayVec;

use crate::{
    BOARD_HEIGHT, Board, Piece, PieceKind, Position, RotationDirection,
    engine::{ClearAnimation, GameStats, PieceQueue},
};

/// A starting board already contains complete rows.
///
/// Every clear is attributed to the lock that completed it, so a game cannot
/// begin with rows that no lock filled.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("starting board has full rows {rows:?}")]
pub struct FullRowsError {
    pub rows: ArrayVec<usize, BOARD_HEIGHT>,
}

/// Phase of a game.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum GameStatus {
    /// Constructed but not started; no active piece yet.
    Ready,
    Playing,
    Paused,
    /// Completed rows are fading out; no piece is active.
    Clearing(ClearAnimation),
    /// Terminal. The piece that failed to spawn stays visible.
    GameOver,
}

/// A single game: board, active piece, upcoming pieces and statistics.
///
/// Commands that do not apply in the current status are ignored, as are moves
/// and rotations that would collide. Queries are valid at any time.
///
/// # Example
///
/// ```
/// use stackfall_engine::{GameState, PieceKind, PieceQueue};
///
/// let mut game = GameState::with_queue(PieceQueue::scripted(vec![PieceKind::O]));
/// game.start();
/// for _ in 0..19 {
///     assert!(game.move_down());
/// }
/// assert!(!game.move_down());
/// assert_eq!(game.completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    queue: PieceQueue,
    stats: GameStats,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game on an empty board with a randomly seeded 7-bag queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_queue(PieceQueue::new())
    }

    #[must_use]
    pub fn with_queue(queue: PieceQueue) -> Self {
        Self {
            board: Board::EMPTY,
            active: None,
            queue,
            stats: GameStats::new(),
            status: GameStatus::Ready,
        }
    }

    /// Creates a game starting from a pre-filled board.
    ///
    /// # Errors
    ///
    /// Returns [`FullRowsError`] if any row of `board` is already complete.
    pub fn with_board(board: Board, queue: PieceQueue) -> Result<Self, FullRowsError> {
        let rows = board.full_rows();
        if !rows.is_empty() {
            return Err(FullRowsError { rows });
        }
        Ok(Self {
            board,
            ..Self::with_queue(queue)
        })
    }

    /// Spawns the first piece. Ignored once the game has started.
    pub fn start(&mut self) {
        if self.status.is_ready() {
            self.spawn_next();
        }
    }

    /// Suspends play. Only accepted while playing, so a running clear animation
    /// always runs to completion.
    pub fn pause(&mut self) {
        if self.status.is_playing() {
            self.status = GameStatus::Paused;
        }
    }

    pub fn unpause(&mut self) {
        if self.status.is_paused() {
            self.status = GameStatus::Playing;
        }
    }

    pub fn move_left(&mut self) {
        self.try_shift(Position::LEFT);
    }

    pub fn move_right(&mut self) {
        self.try_shift(Position::RIGHT);
    }

    /// Moves the active piece one row down, locking it if it cannot fall.
    ///
    /// Returns `true` only when the piece actually moved. `false` means the
    /// piece was locked or the command did not apply.
    pub fn move_down(&mut self) -> bool {
        let Some(piece) = self.controllable_piece() else {
            return false;
        };
        if let Some(moved) = piece.try_move(&self.board, Position::DOWN) {
            self.active = Some(moved);
            return true;
        }
        self.lock_active();
        false
    }

    /// Moves the active piece to its lowest legal position and locks it.
    pub fn hard_drop(&mut self) {
        let Some(piece) = self.controllable_piece() else {
            return;
        };
        self.active = Some(piece.drop_position(&self.board));
        self.lock_active();
    }

    pub fn rotate_left(&mut self) {
        self.try_rotate(RotationDirection::Left);
    }

    pub fn rotate_right(&mut self) {
        self.try_rotate(RotationDirection::Right);
    }

    /// Advances the clear animation by `dt` seconds.
    ///
    /// When it finishes, the marked rows are removed, statistics are updated
    /// and the next piece spawns. Outside the clearing phase this does nothing.
    pub fn update_clearing_animation(&mut self, dt: f64) {
        let GameStatus::Clearing(animation) = &mut self.status else {
            return;
        };
        if !animation.advance(dt) {
            return;
        }
        let rows = animation.rows().len();
        self.board.remove_rows(animation.rows());
        self.stats.record_clear(rows);
        self.spawn_next();
    }

    fn controllable_piece(&self) -> Option<Piece> {
        if self.status.is_playing() {
            self.active
        } else {
            None
        }
    }

    fn try_shift(&mut self, delta: Position) {
        if let Some(piece) = self.controllable_piece()
            && let Some(moved) = piece.try_move(&self.board, delta)
        {
            self.active = Some(moved);
        }
    }

    fn try_rotate(&mut self, direction: RotationDirection) {
        if let Some(piece) = self.controllable_piece()
            && let Some(rotated) = piece.try_rotate(&self.board, direction)
        {
            self.active = Some(rotated);
        }
    }

    fn lock_active(&mut self) {
        let piece = self
            .active
            .take()
            .expect("lock requires an active piece");
        self.board.lock(piece.footprint(), piece.kind());
        self.stats.record_lock();

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.stats.record_clear(0);
            self.spawn_next();
        } else {
            self.status = GameStatus::Clearing(ClearAnimation::new(rows));
        }
    }

    fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.queue.pop_next());
        self.active = Some(piece);
        self.status = if piece.collides(&self.board) {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        };
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece, or the blocked spawn after game over.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek_next()
    }

    #[must_use]
    pub fn piece_queue(&self) -> &PieceQueue {
        &self.queue
    }

    #[must_use]
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    #[must_use]
    pub fn clear_animation(&self) -> Option<&ClearAnimation> {
        match &self.status {
            GameStatus::Clearing(animation) => Some(animation),
            _ => None,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.status.is_ready()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status.is_paused()
    }

    #[must_use]
    pub fn is_clearing(&self) -> bool {
        self.status.is_clearing()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn cleared_lanes(&self) -> usize {
        self.stats.cleared_lanes()
    }

    #[must_use]
    pub fn single_count(&self) -> usize {
        self.stats.single_count()
    }

    #[must_use]
    pub fn double_count(&self) -> usize {
        self.stats.double_count()
    }

    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.stats.triple_count()
    }

    #[must_use]
    pub fn tetris_count(&self) -> usize {
        self.stats.tetris_count()
    }

    #[must_use]
    pub fn completed_pieces(&self) -> usize {
        self.stats.completed_pieces()
    }
}
