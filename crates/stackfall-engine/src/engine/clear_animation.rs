use arrayvec::ArrayVec;

use crate::BOARD_HEIGHT;

/// Length of the line-clear animation in seconds.
pub const CLEAR_ANIMATION_SECS: f64 = 0.3;

/// Progress of the fade-out of completed rows.
///
/// Created when a lock completes at least one row; the rows stay on the board
/// until the animation finishes.
///
/// ```
/// use stackfall_engine::ClearAnimation;
///
/// let mut anim = ClearAnimation::new([18, 19].into_iter().collect());
/// assert!(!anim.advance(0.1));
/// assert!((anim.progress() - 1.0 / 3.0).abs() < 1e-9);
/// assert!(anim.advance(0.25));
/// assert_eq!(anim.progress(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClearAnimation {
    rows: ArrayVec<usize, BOARD_HEIGHT>,
    elapsed: f64,
    duration: f64,
}

impl ClearAnimation {
    /// Starts an animation for `rows` with the default duration.
    #[must_use]
    pub fn new(rows: ArrayVec<usize, BOARD_HEIGHT>) -> Self {
        Self {
            rows,
            elapsed: 0.0,
            duration: CLEAR_ANIMATION_SECS,
        }
    }

    /// Rows being cleared, ascending.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the elapsed fraction in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Adds `dt` seconds and returns whether the animation is finished.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f64) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.is_finished()
    }
}
