use std::fmt;

use thiserror::Error;

pub mod direction;
pub mod grid;
pub mod moves;
pub mod symbols;

pub use direction::{Axis, Direction, Move};
pub use grid::{Grid, Seeds};
pub use moves::Transition;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid direction: move code {0}")]
    InvalidDirection(i8),

    #[error("board size must be at least 2, got {0}")]
    GridTooSmall(usize),

    #[error("board size {0} is too large to allocate")]
    GridTooLarge(usize),

    #[error("board must be square: {rows} rows but a row of {cols} cells")]
    NotSquare { rows: usize, cols: usize },

    #[error("no free cell to spawn a tile into")]
    NoFreeCell,
}

/// A `(row, col)` coordinate on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves `count` steps along `(d_row, d_col)`.
    ///
    /// Callers only walk inside the grid, so leaving the non-negative quadrant
    /// is a logic error.
    pub fn offset(self, (d_row, d_col): (isize, isize), count: isize) -> Self {
        Self {
            row: self.row.wrapping_add_signed(d_row * count),
            col: self.col.wrapping_add_signed(d_col * count),
        }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
