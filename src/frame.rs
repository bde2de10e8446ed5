//! Cell framebuffer.
//!
//! The game draws into a [`Frame`] instead of the terminal directly, so
//! drawing stays testable and the terminal only sees one flush per frame.

use crossterm::style::Color;

use crate::entities::Bounds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        color: Color::Reset,
    };
}

/// Maps world units onto terminal cells.  Cells are roughly twice as tall as
/// they are wide, hence the different scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub units_per_col: f32,
    pub units_per_row: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            units_per_col: 16.0,
            units_per_row: 32.0,
        }
    }
}

impl Viewport {
    pub fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.units_per_col).floor() as i32,
            (y / self.units_per_row).floor() as i32,
        )
    }

    /// Number of whole cells a `w × h` extent covers.
    pub fn span(&self, w: f32, h: f32) -> (i32, i32) {
        (
            (w / self.units_per_col).round() as i32,
            (h / self.units_per_row).round() as i32,
        )
    }

    /// World extent of a `cols × rows` terminal.
    pub fn world_size(&self, cols: u16, rows: u16) -> (f32, f32) {
        (
            cols as f32 * self.units_per_col,
            rows as f32 * self.units_per_row,
        )
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    cols: u16,
    rows: u16,
    viewport: Viewport,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(cols: u16, rows: u16, viewport: Viewport) -> Self {
        Self {
            cols,
            rows,
            viewport,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The play area this frame can show, with a floor band of `floor_height`.
    pub fn bounds(&self, floor_height: f32) -> Bounds {
        let (w, h) = self.viewport.world_size(self.cols, self.rows);
        Bounds::new(w, h, floor_height)
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Set one cell; anything off the grid is silently dropped.
    pub fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { ch, color };
        }
    }

    pub fn print(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    /// Fill every row from `first_row` to the bottom.
    pub fn fill_from_row(&mut self, first_row: i32, ch: char, color: Color) {
        for row in first_row.max(0)..self.rows as i32 {
            for col in 0..self.cols as i32 {
                self.put(col, row, ch, color);
            }
        }
    }

    pub fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    /// The characters of one row, handy for assertions.
    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }
}
