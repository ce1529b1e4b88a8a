use std::{io, thread, time::Duration};

use crate::layout::Layout;

/// Visual roles the painter asks a surface to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Plain,
    Resting,
    NewTile,
    Moving,
    Merged,
    GridLine,
    Title,
    Score,
    Message,
    Error,
}

/// A character-cell drawing target addressed in game-window coordinates.
pub trait Surface {
    fn put_str(&mut self, row: usize, col: usize, text: &str, style: Style) -> io::Result<()>;

    /// Makes everything drawn so far visible.
    fn refresh(&mut self) -> io::Result<()>;

    /// Current terminal size as `(rows, cols)`.
    fn dimensions(&self) -> io::Result<(usize, usize)>;

    /// Clears the terminal and moves the game window to `layout`'s origin.
    fn reposition(&mut self, layout: &Layout) -> io::Result<()>;

    /// Blocks between animation frames.
    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        if !duration.is_zero() {
            thread::sleep(duration);
        }

        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn put_str(&mut self, row: usize, col: usize, text: &str, style: Style) -> io::Result<()> {
        (**self).put_str(row, col, text, style)
    }

    fn refresh(&mut self) -> io::Result<()> {
        (**self).refresh()
    }

    fn dimensions(&self) -> io::Result<(usize, usize)> {
        (**self).dimensions()
    }

    fn reposition(&mut self, layout: &Layout) -> io::Result<()> {
        (**self).reposition(layout)
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        (**self).pause(duration)
    }
}

/// In-memory terminal. Records pauses instead of sleeping.
#[derive(Clone, Debug)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    origin: (usize, usize),
    cells: Vec<(char, Style)>,
    pauses: Vec<Duration>,
    refreshes: usize,
}

impl Canvas {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            origin: (0, 0),
            cells: vec![(' ', Style::Plain); rows * cols],
            pauses: Vec::new(),
            refreshes: 0,
        }
    }

    /// Character at window coordinates.
    pub fn char_at(&self, row: usize, col: usize) -> char {
        self.cell(row, col).0
    }

    /// Style at window coordinates.
    pub fn style_at(&self, row: usize, col: usize) -> Style {
        self.cell(row, col).1
    }

    /// A window row as text, `width` characters long.
    pub fn row_text(&self, row: usize, col: usize, width: usize) -> String {
        (col..col + width).map(|c| self.char_at(row, c)).collect()
    }

    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    pub const fn refreshes(&self) -> usize {
        self.refreshes
    }

    fn cell(&self, row: usize, col: usize) -> (char, Style) {
        let (row, col) = (self.origin.0 + row, self.origin.1 + col);

        self.cells[row * self.cols + col]
    }
}

impl Surface for Canvas {
    fn put_str(&mut self, row: usize, col: usize, text: &str, style: Style) -> io::Result<()> {
        let (row, col) = (self.origin.0 + row, self.origin.1 + col);
        let len = text.chars().count();

        if row >= self.rows || col + len > self.cols {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{len} characters at ({row}, {col}) leave the {}x{} canvas", self.rows, self.cols),
            ));
        }

        let start = row * self.cols + col;

        for (cell, ch) in self.cells[start..start + len].iter_mut().zip(text.chars()) {
            *cell = (ch, style);
        }

        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.refreshes += 1;

        Ok(())
    }

    fn dimensions(&self) -> io::Result<(usize, usize)> {
        Ok((self.rows, self.cols))
    }

    fn reposition(&mut self, layout: &Layout) -> io::Result<()> {
        self.cells.fill((' ', Style::Plain));
        self.origin = (layout.win_row, layout.win_col);

        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.pauses.push(duration);

        Ok(())
    }
}
