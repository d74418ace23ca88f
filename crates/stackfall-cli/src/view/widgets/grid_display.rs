use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Paragraph, Widget},
};
use stackfall_engine::CellPaint;

use crate::view::widgets::{CellGrid, style};

const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;

/// Renders a [`CellGrid`] with two terminal columns per cell.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a CellGrid,
    show_dots: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a CellGrid) -> Self {
        Self {
            grid,
            show_dots: false,
            block: None,
        }
    }

    /// Marks empty cells with a dot.
    pub fn show_dots(self, show_dots: bool) -> Self {
        Self { show_dots, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Width needed for a grid with `cols` columns.
    pub fn width_for(&self, cols: usize) -> u16 {
        u16::try_from(cols).unwrap_or(u16::MAX) * CELL_WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    /// Height needed for a grid with `rows` rows.
    pub fn height_for(&self, rows: usize) -> u16 {
        u16::try_from(rows).unwrap_or(u16::MAX) * CELL_HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn render_cell(&self, cell: Option<CellPaint>, area: Rect, buf: &mut Buffer) {
        let (symbol, style) = match cell {
            Some(paint) => ("", style::cell(paint)),
            None if self.show_dots => (".", style::EMPTY_DOT),
            None => ("", style::EMPTY),
        };
        // A Paragraph fills the whole area, not just the cells with the symbol.
        Paragraph::new(symbol)
            .style(style)
            .centered()
            .render(area, buf);
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..self.grid.width()).map(|_| Constraint::Length(CELL_WIDTH));
        let row_constraints = (0..self.grid.height()).map(|_| Constraint::Length(CELL_HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));
        for (grid_row, row) in iter::zip(grid_cells, self.grid.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                self.render_cell(*cell, grid_cell, buf);
            }
        }

        if let Some(overlay) = self.grid.overlay() {
            let text_area = area.centered_vertically(Constraint::Length(1));
            Line::styled(format!(" {overlay} "), style::OVERLAY)
                .centered()
                .render(text_area, buf);
        }
    }
}
