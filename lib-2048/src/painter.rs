use crate::{
    layout::{
        cell_span, Layout, SIDE_MARGIN, TILE_HOFFSET, TILE_NCOLS, TILE_NROWS, TILE_VOFFSET,
        TXT_WIDTH,
    },
    surface::{Style, Surface},
    symbols::tile_symbol,
    Axis, Cell, Error, Result,
};

const C_VERT: char = '┃';
const C_HORZ: char = '━';
const C_TL: char = '┏';
const C_TR: char = '┓';
const C_BL: char = '┗';
const C_BR: char = '┛';
const C_MID_U: char = '┳';
const C_MID_D: char = '┻';
const C_MID_L: char = '┣';
const C_MID_R: char = '┫';
const C_MID_C: char = '╋';
const C_FULL: char = '█';

const TITLE_STR: &str = "2 0 4 8";
const INSTR_STR: &str = "[w/s/a/d or arrows: move, u: undo, q: quit]";
const FOOTER_STR: &str = "Slide, merge, reach 2048.";

/// Border drawn around a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    None,
    /// Regular grid lines with junction glyphs matching the tile's position.
    Grid,
    /// Solid block border marking a tile in motion or just settled.
    Wide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Corners {
    tl: char,
    tr: char,
    bl: char,
    br: char,
}

fn repeat(ch: char, count: usize) -> String {
    std::iter::repeat(ch).take(count).collect()
}

/// Centres `text` in `width` columns, cutting it if it doesn't fit.
fn centre(text: &str, width: usize) -> String {
    let text: String = text.chars().take(width).collect();

    format!("{text:^width$}")
}

/// Draws the board, tiles and banners onto a `Surface`.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    layout: Layout,
}

impl Painter {
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    fn put_board(
        &self,
        surface: &mut impl Surface,
        row: usize,
        col: usize,
        text: &str,
        style: Style,
    ) -> Result<()> {
        let (origin_row, origin_col) = self.layout.board_origin();

        surface.put_str(origin_row + row, origin_col + col, text, style)?;

        Ok(())
    }

    /// Window frame, title, instructions and footer.
    pub fn draw_banner(&self, surface: &mut impl Surface) -> Result<()> {
        let layout = &self.layout;
        let inner = layout.win_width - 2;

        surface.put_str(
            0,
            0,
            &format!("┌{}┐", repeat('─', inner)),
            Style::Plain,
        )?;
        for row in 1..layout.win_height - 1 {
            surface.put_str(row, 0, "│", Style::Plain)?;
            surface.put_str(row, layout.win_width - 1, "│", Style::Plain)?;
        }
        surface.put_str(
            layout.win_height - 1,
            0,
            &format!("└{}┘", repeat('─', inner)),
            Style::Plain,
        )?;

        surface.put_str(
            layout.title_row(),
            SIDE_MARGIN,
            &centre(TITLE_STR, layout.board_width),
            Style::Title,
        )?;
        surface.put_str(
            layout.score_row(),
            SIDE_MARGIN,
            &centre(INSTR_STR, layout.board_width),
            Style::Score,
        )?;
        surface.put_str(
            layout.footer_row(),
            SIDE_MARGIN,
            &centre(FOOTER_STR, layout.board_width),
            Style::Plain,
        )?;

        Ok(())
    }

    /// Empty grid lines for the whole board.
    pub fn draw_grid(&self, surface: &mut impl Surface) -> Result<()> {
        let size = self.layout.size;
        let line = |left: char, mid: char, right: char, fill: char| {
            let cell = repeat(fill, TILE_NCOLS);
            let mut line = format!(" {left}");

            for _ in 0..size - 1 {
                line.push_str(&cell);
                line.push(mid);
            }
            line.push_str(&cell);
            line.push(right);
            line.push(' ');

            line
        };

        let top = line(C_TL, C_MID_U, C_TR, C_HORZ);
        let mid = line(C_MID_L, C_MID_C, C_MID_R, C_HORZ);
        let bottom = line(C_BL, C_MID_D, C_BR, C_HORZ);
        let space = line(C_VERT, C_VERT, C_VERT, ' ');

        self.put_board(surface, 0, 0, &top, Style::GridLine)?;

        for i in 0..size {
            let (tile_row, _) = self.layout.tile_origin(Cell::new(i, 0));

            for j in 0..TILE_NROWS {
                self.put_board(surface, tile_row + j + 1, 0, &space, Style::GridLine)?;
            }

            if i + 1 < size {
                self.put_board(surface, tile_row + TILE_NROWS + 1, 0, &mid, Style::GridLine)?;
            }
        }

        self.put_board(surface, self.layout.board_height - 1, 0, &bottom, Style::GridLine)
    }

    /// Junction glyphs for the four corners of the tile at `cell`.
    fn corners(&self, cell: Cell) -> Corners {
        let last = self.layout.size - 1;
        let mut corners = Corners {
            tl: C_MID_C,
            tr: C_MID_C,
            bl: C_MID_C,
            br: C_MID_C,
        };

        if cell.row == 0 {
            corners.tl = C_MID_U;
            corners.tr = C_MID_U;
        }
        if cell.row == last {
            corners.bl = C_MID_D;
            corners.br = C_MID_D;
        }
        if cell.col == 0 {
            corners.tl = if cell.row == 0 { C_TL } else { C_MID_L };
            corners.bl = if cell.row == last { C_BL } else { C_MID_L };
        }
        if cell.col == last {
            corners.tr = if cell.row == 0 { C_TR } else { C_MID_R };
            corners.br = if cell.row == last { C_BR } else { C_MID_R };
        }

        corners
    }

    fn check_bounds(&self, row: isize, col: isize) -> Result<(usize, usize)> {
        let max_row = (self.layout.board_height - TILE_NROWS - 2) as isize;
        let max_col = (self.layout.board_width - TILE_NCOLS - 2) as isize;

        if row < 0 || row > max_row || col < 0 || col > max_col {
            return Err(Error::TileOutOfBounds { row, col });
        }

        Ok((row as usize, col as usize))
    }

    fn draw_grid_border(
        &self,
        surface: &mut impl Surface,
        (row, col): (usize, usize),
        corners: Corners,
    ) -> Result<()> {
        let top = format!("{}{}{}", corners.tl, repeat(C_HORZ, TILE_NCOLS), corners.tr);
        let space = format!("{C_VERT}{}{C_VERT}", repeat(' ', TILE_NCOLS));
        let bottom = format!("{}{}{}", corners.bl, repeat(C_HORZ, TILE_NCOLS), corners.br);

        self.put_board(surface, row, col, &top, Style::GridLine)?;
        for i in 0..TILE_NROWS {
            self.put_board(surface, row + i + 1, col, &space, Style::GridLine)?;
        }
        self.put_board(surface, row + TILE_NROWS + 1, col, &bottom, Style::GridLine)
    }

    fn draw_wide_border(
        &self,
        surface: &mut impl Surface,
        (row, col): (usize, usize),
        style: Style,
    ) -> Result<()> {
        let edge = repeat(C_FULL, TILE_NCOLS + 2);
        let space = format!(
            "{0}{1}{0}",
            repeat(C_FULL, 2),
            repeat(' ', TILE_NCOLS - 2)
        );

        self.put_board(surface, row, col, &edge, style)?;
        for i in 0..TILE_NROWS {
            self.put_board(surface, row + i + 1, col, &space, style)?;
        }
        self.put_board(surface, row + TILE_NROWS + 1, col, &edge, style)
    }

    /// Clears the tile interior and centres `text` in it.
    fn draw_text(
        &self,
        surface: &mut impl Surface,
        (row, col): (usize, usize),
        text: &str,
        style: Style,
    ) -> Result<()> {
        let blank = repeat(' ', TXT_WIDTH);

        for cur_row in row + 1..row + TILE_NROWS + 1 {
            self.put_board(surface, cur_row, col + TILE_HOFFSET, &blank, style)?;
        }

        self.put_board(
            surface,
            row + TILE_VOFFSET + 1,
            col + TILE_HOFFSET,
            &centre(text, TXT_WIDTH),
            style,
        )
    }

    pub fn draw_tile(
        &self,
        surface: &mut impl Surface,
        cell: Cell,
        text: &str,
        style: Style,
        border: Border,
    ) -> Result<()> {
        let (row, col) = self.layout.tile_origin(cell);
        let pos = self.check_bounds(row as isize, col as isize)?;

        match border {
            Border::None => {}
            Border::Grid => self.draw_grid_border(surface, pos, self.corners(cell))?,
            Border::Wide => self.draw_wide_border(surface, pos, style)?,
        }

        self.draw_text(surface, pos, text, style)
    }

    /// Draws a wide-bordered tile displaced by `shift` characters along `axis`.
    ///
    /// `shift` must stay strictly inside one cell span.
    pub fn draw_shifted_tile(
        &self,
        surface: &mut impl Surface,
        cell: Cell,
        text: &str,
        style: Style,
        axis: Axis,
        shift: isize,
    ) -> Result<()> {
        let span = cell_span(axis);

        if shift.unsigned_abs() >= span {
            return Err(Error::ShiftOutOfRange { shift, span });
        }

        let (row, col) = self.layout.tile_origin(cell);
        let (row, col) = match axis {
            Axis::Vertical => (row as isize + shift, col as isize),
            Axis::Horizontal => (row as isize, col as isize + shift),
        };
        let pos = self.check_bounds(row, col)?;

        self.draw_wide_border(surface, pos, style)?;
        self.draw_text(surface, pos, text, style)
    }

    /// Every tile of the row-major `cells` in resting style, borders untouched.
    pub fn draw_board(&self, surface: &mut impl Surface, cells: &[u8]) -> Result<()> {
        let size = self.layout.size;

        for (i, &rank) in cells.iter().enumerate() {
            let cell = Cell::new(i / size, i % size);

            self.draw_tile(surface, cell, &tile_symbol(rank), Style::Resting, Border::None)?;
        }

        Ok(())
    }

    pub fn display_score(&self, surface: &mut impl Surface, moves: u32) -> Result<()> {
        let text = format!("{moves} moves played so far");
        let width = self.layout.board_width;

        surface.put_str(
            self.layout.score_row(),
            SIDE_MARGIN,
            &format!("{text:>width$}"),
            Style::Score,
        )?;

        Ok(())
    }

    /// Centred line above the footer; `style` is `Message` or `Error`.
    pub fn display_message(&self, surface: &mut impl Surface, msg: &str, style: Style) -> Result<()> {
        surface.put_str(
            self.layout.message_row(),
            1,
            &centre(msg, self.layout.win_width - 2),
            style,
        )?;

        Ok(())
    }

    pub fn clear_message(&self, surface: &mut impl Surface) -> Result<()> {
        self.display_message(surface, "", Style::Message)
    }
}
