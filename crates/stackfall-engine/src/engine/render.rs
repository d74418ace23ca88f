use crate::{BOARD_HEIGHT, BOARD_WIDTH, Block, PieceKind, PieceRotation, engine::GameState};

/// Side length of the next-piece preview grid.
pub const PREVIEW_SIZE: usize = 4;

/// How a single cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPaint {
    pub kind: PieceKind,
    /// `1.0` is fully visible; rows being cleared fade towards `0.0`.
    pub opacity: f64,
    /// Flash highlight, set during the first half of a clear animation.
    pub highlight: bool,
}

impl CellPaint {
    #[must_use]
    pub const fn solid(kind: PieceKind) -> Self {
        Self {
            kind,
            opacity: 1.0,
            highlight: false,
        }
    }
}

/// Message drawn on top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Overlay {
    #[display("PAUSED")]
    Paused,
    #[display("GAME OVER")]
    GameOver,
}

/// Drawing target for [`GameState::render`] and [`GameState::render_next`].
///
/// Only occupied cells are painted; everything else is whatever
/// [`Surface::clear`] leaves behind.
pub trait Surface {
    /// Resets the surface to an empty grid of the given size.
    fn clear(&mut self, rows: usize, cols: usize);

    fn paint_cell(&mut self, row: usize, col: usize, paint: CellPaint);

    fn paint_overlay(&mut self, _overlay: Overlay) {}
}

impl GameState {
    /// Paints the board and the active piece.
    ///
    /// Cells of the active piece above the top row are not drawn.
    pub fn render<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        surface.clear(BOARD_HEIGHT, BOARD_WIDTH);

        let animation = self.clear_animation();
        let fade = animation.map(|anim| {
            let progress = anim.progress();
            (1.0 - progress, progress < 0.5)
        });

        for (row, cells) in self.board().rows().enumerate() {
            let clearing = animation.is_some_and(|anim| anim.contains(row));
            for (col, block) in cells.iter().enumerate() {
                let Block::Piece(kind) = *block else {
                    continue;
                };
                let mut paint = CellPaint::solid(kind);
                if clearing && let Some((opacity, highlight)) = fade {
                    paint.opacity = opacity;
                    paint.highlight = highlight;
                }
                surface.paint_cell(row, col, paint);
            }
        }

        if let Some(piece) = self.active_piece() {
            let paint = CellPaint::solid(piece.kind());
            for pos in piece.footprint() {
                if let (Ok(row), Ok(col)) = (usize::try_from(pos.row), usize::try_from(pos.col))
                    && row < BOARD_HEIGHT
                    && col < BOARD_WIDTH
                {
                    surface.paint_cell(row, col, paint);
                }
            }
        }

        if self.is_paused() {
            surface.paint_overlay(Overlay::Paused);
        } else if self.is_game_over() {
            surface.paint_overlay(Overlay::GameOver);
        }
    }

    /// Paints the next piece in its spawn orientation on a 4x4 grid.
    pub fn render_next<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        surface.clear(PREVIEW_SIZE, PREVIEW_SIZE);
        let kind = self.next_piece();
        let paint = CellPaint::solid(kind);
        for offset in kind.offsets(PieceRotation::default()) {
            // Spawn offsets are always inside the piece's bounding box.
            let row = usize::try_from(offset.row).expect("offset row is non-negative");
            let col = usize::try_from(offset.col).expect("offset col is non-negative");
            surface.paint_cell(row, col, paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{Board, PieceQueue};

    #[derive(Default)]
    struct Recorder {
        size: (usize, usize),
        cells: BTreeMap<(usize, usize), CellPaint>,
        overlay: Option<Overlay>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, rows: usize, cols: usize) {
            self.size = (rows, cols);
            self.cells.clear();
            self.overlay = None;
        }

        fn paint_cell(&mut self, row: usize, col: usize, paint: CellPaint) {
            assert!(row < self.size.0 && col < self.size.1);
            self.cells.insert((row, col), paint);
        }

        fn paint_overlay(&mut self, overlay: Overlay) {
            self.overlay = Some(overlay);
        }
    }

    fn game(rows: &[&str], sequence: Vec<PieceKind>) -> GameState {
        let board = Board::from_rows(rows).unwrap();
        let mut game = GameState::with_board(board, PieceQueue::scripted(sequence)).unwrap();
        game.start();
        game
    }

    #[test]
    fn test_hidden_rows_are_not_painted() {
        let game = game(&[], vec![PieceKind::O]);
        let mut surface = Recorder::default();
        game.render(&mut surface);

        assert_eq!(surface.size, (BOARD_HEIGHT, BOARD_WIDTH));
        let cells: Vec<_> = surface.cells.keys().copied().collect();
        assert_eq!(cells, [(0, 4), (0, 5)]);
        assert_eq!(surface.cells[&(0, 4)], CellPaint::solid(PieceKind::O));
        assert_eq!(surface.overlay, None);
    }

    #[test]
    fn test_board_and_piece_are_painted() {
        let game = game(&["JJ........"], vec![PieceKind::T]);
        let mut surface = Recorder::default();
        game.render(&mut surface);

        assert_eq!(surface.cells[&(19, 0)].kind, PieceKind::J);
        assert_eq!(surface.cells[&(19, 1)].kind, PieceKind::J);
        // T spawns with its flat side on row 0 and its nub hidden above.
        for col in 3..6 {
            assert_eq!(surface.cells[&(0, col)].kind, PieceKind::T);
        }
        assert_eq!(surface.cells.len(), 5);
    }

    #[test]
    fn test_clearing_rows_fade() {
        let mut game = game(&["IIII..IIII"], vec![PieceKind::O]);
        game.hard_drop();
        let mut surface = Recorder::default();

        game.update_clearing_animation(0.075);
        game.render(&mut surface);
        let paint = surface.cells[&(19, 0)];
        assert!((paint.opacity - 0.75).abs() < 1e-9);
        assert!(paint.highlight);
        // The half of the O above the cleared row is drawn normally.
        assert_eq!(surface.cells[&(18, 4)], CellPaint::solid(PieceKind::O));

        game.update_clearing_animation(0.15);
        game.render(&mut surface);
        let paint = surface.cells[&(19, 0)];
        assert!((paint.opacity - 0.25).abs() < 1e-9);
        assert!(!paint.highlight);
    }

    #[test]
    fn test_overlays() {
        let mut game = game(&[], vec![PieceKind::O]);
        let mut surface = Recorder::default();
        game.pause();
        game.render(&mut surface);
        assert_eq!(surface.overlay, Some(Overlay::Paused));

        game.unpause();
        while !game.is_game_over() {
            game.hard_drop();
        }
        game.render(&mut surface);
        assert_eq!(surface.overlay, Some(Overlay::GameOver));
    }

    #[test]
    fn test_overlay_is_optional_for_surfaces() {
        #[derive(Default)]
        struct CellsOnly(usize);

        impl Surface for CellsOnly {
            fn clear(&mut self, _rows: usize, _cols: usize) {
                self.0 = 0;
            }

            fn paint_cell(&mut self, _row: usize, _col: usize, _paint: CellPaint) {
                self.0 += 1;
            }
        }

        let mut game = game(&[], vec![PieceKind::O]);
        game.pause();
        let mut surface = CellsOnly::default();
        game.render(&mut surface);
        assert_eq!(surface.0, 2);
    }

    #[test]
    fn test_render_next() {
        let game = game(&[], vec![PieceKind::Z, PieceKind::I]);
        let mut surface = Recorder::default();
        game.render_next(&mut surface);

        assert_eq!(surface.size, (PREVIEW_SIZE, PREVIEW_SIZE));
        let cells: Vec<_> = surface.cells.keys().copied().collect();
        assert_eq!(cells, [(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert!(surface.cells.values().all(|p| p.kind == PieceKind::I));
    }
}
