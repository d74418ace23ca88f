use stackfall_engine::{CellPaint, Overlay, Surface};

/// In-memory drawing surface that the engine paints into between frames.
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    height: usize,
    width: usize,
    cells: Vec<Option<CellPaint>>,
    overlay: Option<Overlay>,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<CellPaint>]> {
        self.cells.chunks_exact(self.width.max(1))
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }
}

impl Surface for CellGrid {
    fn clear(&mut self, rows: usize, cols: usize) {
        self.height = rows;
        self.width = cols;
        self.cells.clear();
        self.cells.resize(rows * cols, None);
        self.overlay = None;
    }

    fn paint_cell(&mut self, row: usize, col: usize, paint: CellPaint) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = Some(paint);
        }
    }

    fn paint_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }
}
