//! The game board: a flat arena of cells addressed with toroidal wraparound
mod cell;
mod coordinate;
pub mod dimensions;

use std::fmt;

pub use cell::{Cell, Label};
pub use coordinate::{Coordinate, InvalidPosition, Position};
pub use dimensions::Dimensions;

use crate::error::BoardError;
use crate::settings::Palette;
use crate::types::{Direction, RenderSurface};

/// The board exclusively owns every cell. Cells are built once, at
/// construction, and afterwards only their labels change. The snake and the
/// food refer to cells by [`Position`] and mutate them through the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    score: u32,
    palette: Palette,
}

impl Board {
    /// Allocates `rows * cols` empty cells, dividing the pixel extents evenly
    /// between them, with the default palette and a score of zero.
    pub fn new(
        rows: usize,
        cols: usize,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self, BoardError> {
        let dimensions = Dimensions::new(rows, cols)?;
        let cell_width = pixel_width / rows as u32;
        let cell_height = pixel_height / cols as u32;

        let cells = (0..dimensions.cell_count())
            .map(|flat| {
                let pos = dimensions.position_of(flat);
                let coordinate = Coordinate::new(
                    (pos.i as u32 * cell_width) as i32,
                    (pos.j as u32 * cell_height) as i32,
                    pos.i,
                    pos.j,
                );
                Cell::empty(coordinate, cell_width, cell_height)
            })
            .collect();

        Ok(Board {
            dimensions,
            cells,
            score: 0,
            palette: Palette::default(),
        })
    }

    /// same as [`Board::new`] with the given palette
    pub fn with_palette(
        rows: usize,
        cols: usize,
        pixel_width: u32,
        pixel_height: u32,
        palette: Palette,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols, pixel_width, pixel_height)?;
        board.palette = palette;
        Ok(board)
    }

    #[allow(missing_docs)]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// extent of the `i` axis
    pub fn rows(&self) -> usize {
        self.dimensions.rows()
    }

    /// extent of the `j` axis
    pub fn cols(&self) -> usize {
        self.dimensions.cols()
    }

    /// Gets a cell, wrapping both indices around the board however far out
    /// of range they are.
    pub fn get_space(&self, i: i64, j: i64) -> &Cell {
        self.cell(self.dimensions.wrap(i, j))
    }

    /// wraps an arbitrary index pair onto the board
    pub fn wrap(&self, i: i64, j: i64) -> Position {
        self.dimensions.wrap(i, j)
    }

    /// the cell at a position. Out of range positions wrap.
    pub fn cell(&self, pos: Position) -> &Cell {
        let pos = self.normalize(pos);
        &self.cells[self.dimensions.flat_index(pos)]
    }

    #[allow(missing_docs)]
    pub fn label_at(&self, pos: Position) -> Label {
        self.cell(pos).label()
    }

    pub(crate) fn set_label(&mut self, pos: Position, label: Label) {
        let pos = self.normalize(pos);
        let flat = self.dimensions.flat_index(pos);
        self.cells[flat].set_label(label);
    }

    /// The position one step from `pos` in `direction`, through wraparound
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Position {
        let (i, j) = pos.add_vec(direction.to_vector());
        self.dimensions.wrap(i, j)
    }

    /// all cells, ordered by `i` then `j`
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// number of cells currently carrying `label`
    pub fn count(&self, label: Label) -> usize {
        self.cells.iter().filter(|c| c.label() == label).count()
    }

    /// whether any cell is free of the snake
    pub fn has_non_snake_cell(&self) -> bool {
        self.cells.iter().any(|c| !c.is_snake())
    }

    /// increases the score by one point. There is no upper bound.
    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    #[allow(missing_docs)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[allow(missing_docs)]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Swaps the colors cells are painted with. Cosmetic only.
    pub fn change_colors(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Paints every cell onto `surface` in the palette color for its label
    pub fn display(&self, surface: &mut impl RenderSurface) {
        for cell in &self.cells {
            let color = match cell.label() {
                Label::Empty => &self.palette.board,
                Label::Snake => &self.palette.snake,
                Label::Food => &self.palette.food,
            };
            let c = cell.coordinate();
            surface.fill_rect(c.x(), c.y(), cell.width(), cell.height(), color);
        }
    }

    fn normalize(&self, pos: Position) -> Position {
        if pos.i < self.rows() && pos.j < self.cols() {
            pos
        } else {
            self.dimensions.wrap(pos.i as i64, pos.j as i64)
        }
    }
}

/// Draws `j` as lines and `i` as columns: `.` empty, `s` snake, `f` food.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for j in 0..self.cols() {
            for i in 0..self.rows() {
                let c = match self.label_at(Position::new(i, j)) {
                    Label::Empty => '.',
                    Label::Snake => 's',
                    Label::Food => 'f',
                };
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "score: {}", self.score)
    }
}
