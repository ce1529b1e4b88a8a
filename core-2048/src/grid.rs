use std::{fmt, mem};

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{moves, Cell, Direction, Error, Result, Transition};

pub const DEFAULT_SIZE: usize = 4;
pub const VALUE_SEED: u64 = 20;

/// Probability that a spawned tile has rank 1 (displayed as 2) rather than 2.
pub const PROB_TWO: f64 = 0.9;

/// Seeds of the two spawn streams: where a tile lands and what it is worth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seeds {
    pub position: u64,
    pub value: u64,
}

impl Seeds {
    pub const fn new(position: u64) -> Self {
        Self {
            position,
            value: VALUE_SEED,
        }
    }

    /// Fresh position seed from the OS, fixed value seed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

/// An N×N board of ranks (0 empty, k meaning 2^k) with one level of undo.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
    previous: Vec<u8>,
    position_rng: ChaCha8Rng,
    value_rng: ChaCha8Rng,
}

impl Grid {
    pub fn new(size: usize, seeds: Seeds) -> Result<Self> {
        if size < 2 {
            return Err(Error::GridTooSmall(size));
        }

        let len = size.checked_mul(size).ok_or(Error::GridTooLarge(size))?;
        let cells = vec![0; len];

        Ok(Self {
            size,
            previous: cells.clone(),
            cells,
            position_rng: ChaCha8Rng::seed_from_u64(seeds.position),
            value_rng: ChaCha8Rng::seed_from_u64(seeds.value),
        })
    }

    pub fn from_rows(rows: &[&[u8]], seeds: Seeds) -> Result<Self> {
        let mut grid = Self::new(rows.len(), seeds)?;

        for (row, ranks) in rows.iter().enumerate() {
            if ranks.len() != grid.size {
                return Err(Error::NotSquare {
                    rows: grid.size,
                    cols: ranks.len(),
                });
            }

            grid.cells[row * grid.size..(row + 1) * grid.size].copy_from_slice(ranks);
        }

        grid.previous.clone_from(&grid.cells);

        Ok(grid)
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major ranks.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Row-major ranks of the undo snapshot.
    pub fn previous(&self) -> &[u8] {
        &self.previous
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.size)
    }

    pub fn rank(&self, cell: Cell) -> u8 {
        self.cells[cell.row * self.size + cell.col]
    }

    pub fn set_rank(&mut self, cell: Cell, rank: u8) {
        self.cells[cell.row * self.size + cell.col] = rank;
    }

    pub fn highest_rank(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Empty cells in row-major order.
    pub fn list_free_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &rank)| rank == 0)
            .map(|(i, _)| Cell::new(i / self.size, i % self.size))
            .collect()
    }

    /// Places a rank 1 or 2 tile on a uniformly chosen free cell.
    pub fn spawn_tile(&mut self) -> Result<(Cell, u8)> {
        let free_cells = self.list_free_cells();

        let cell = *free_cells
            .choose(&mut self.position_rng)
            .ok_or(Error::NoFreeCell)?;
        let rank = if self.value_rng.gen_bool(PROB_TWO) { 1 } else { 2 };

        self.set_rank(cell, rank);

        debug!(%cell, rank, free = free_cells.len(), "spawned tile");

        Ok((cell, rank))
    }

    /// Slides the board and returns the tile transitions.
    ///
    /// The undo snapshot is only replaced when something moved, so a rejected
    /// move leaves both the board and its history untouched.
    pub fn apply_move(&mut self, direction: Direction) -> Vec<Transition> {
        let (cells, transitions) = moves::slide(&self.cells, self.size, direction);

        if !transitions.is_empty() {
            self.previous = mem::replace(&mut self.cells, cells);
        }

        debug!(?direction, transitions = transitions.len(), "applied move");

        transitions
    }

    /// Restores the snapshot taken before the last effective move.
    pub fn undo(&mut self) {
        self.cells.clone_from(&self.previous);

        debug!("restored previous board");
    }

    /// No empty cell and no orthogonally adjacent equal pair.
    pub fn gameover(&self) -> bool {
        let size = self.size;
        let at = |row: usize, col: usize| self.cells[row * size + col];

        for i in 0..size {
            for j in 0..size {
                if at(i, j) == 0 {
                    return false;
                }
            }

            for j in 0..(size - 1) {
                if at(i, j) == at(i, j + 1) || at(j, i) == at(j + 1, i) {
                    return false;
                }
            }
        }

        true
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }

            for (j, rank) in row.iter().enumerate() {
                if j != 0 {
                    f.write_str(" ")?;
                }

                write!(f, "{rank}")?;
            }
        }

        Ok(())
    }
}
