use crate::{Axis, Cell, Error, Result};

pub const TILE_NROWS: usize = 3;
pub const TILE_NCOLS: usize = 9;
pub const BORDER_WIDTH: usize = 1;
pub const TILE_HEIGHT: usize = TILE_NROWS + BORDER_WIDTH;
pub const TILE_WIDTH: usize = TILE_NCOLS + BORDER_WIDTH;
pub const TILE_VOFFSET: usize = 1;
pub const TILE_HOFFSET: usize = 2;
pub const TXT_WIDTH: usize = 7;

pub const TOP_MARGIN: usize = 5;
pub const BOTTOM_MARGIN: usize = 5;
pub const SIDE_MARGIN: usize = 10;

/// Distance in character cells between two neighbouring tiles along `axis`.
pub const fn cell_span(axis: Axis) -> usize {
    match axis {
        Axis::Vertical => TILE_HEIGHT,
        Axis::Horizontal => TILE_WIDTH,
    }
}

/// Placement of the game window inside the terminal and of the board inside
/// the window. Window coordinates are what a `Surface` is addressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub size: usize,
    pub board_width: usize,
    pub board_height: usize,
    pub win_width: usize,
    pub win_height: usize,
    pub win_row: usize,
    pub win_col: usize,
}

impl Layout {
    /// Centres the window for a `size`×`size` board in a `rows`×`cols` terminal.
    pub fn new(size: usize, rows: usize, cols: usize) -> Result<Self> {
        // One spare column on each side of the grid lines.
        // Saturates, so absurd sizes fail the fit check instead of wrapping.
        let board_width = size.saturating_mul(TILE_WIDTH).saturating_add(3);
        let board_height = size.saturating_mul(TILE_HEIGHT).saturating_add(1);

        let win_width = board_width.saturating_add(2 * SIDE_MARGIN);
        let win_height = board_height.saturating_add(TOP_MARGIN + BOTTOM_MARGIN);

        // The window is drawn one column wider than its nominal width.
        if win_height > rows || win_width.saturating_add(1) > cols {
            return Err(Error::SurfaceTooSmall {
                needed_rows: win_height,
                needed_cols: win_width.saturating_add(1),
                rows,
                cols,
            });
        }

        Ok(Self {
            size,
            board_width,
            board_height,
            win_width,
            win_height,
            win_row: (rows - win_height) / 2,
            win_col: (cols - win_width - 1) / 2,
        })
    }

    pub const fn board_origin(&self) -> (usize, usize) {
        (TOP_MARGIN, SIDE_MARGIN)
    }

    /// Top-left corner of a tile's border box, in board coordinates.
    pub const fn tile_origin(&self, cell: Cell) -> (usize, usize) {
        (
            cell.row * TILE_HEIGHT + BORDER_WIDTH - 1,
            cell.col * TILE_WIDTH + BORDER_WIDTH,
        )
    }

    pub const fn title_row(&self) -> usize {
        1
    }

    pub const fn score_row(&self) -> usize {
        3
    }

    pub const fn message_row(&self) -> usize {
        self.win_height - 4
    }

    pub const fn footer_row(&self) -> usize {
        self.win_height - 2
    }
}
