use std::io;

use thiserror::Error;

pub use core_2048::*;

pub mod ai;
pub mod animation;
pub mod game;
pub mod layout;
pub mod painter;
pub mod surface;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] core_2048::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "terminal too small for the game: need {needed_rows}x{needed_cols}, have {rows}x{cols}"
    )]
    SurfaceTooSmall {
        needed_rows: usize,
        needed_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("shift of {shift} reaches a full cell span of {span}")]
    ShiftOutOfRange { shift: isize, span: usize },

    #[error("cannot draw a tile with top-left corner at ({row}, {col})")]
    TileOutOfBounds { row: isize, col: isize },
}
