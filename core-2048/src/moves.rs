use crate::{Cell, Direction};

/// One tile's journey during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: Cell,
    pub to: Cell,
    pub merged: bool,
}

impl Transition {
    pub const fn new(from: Cell, to: Cell, merged: bool) -> Self {
        Self { from, to, merged }
    }

    /// Number of whole cells between origin and destination.
    pub fn distance(&self) -> usize {
        self.from.row.abs_diff(self.to.row) + self.from.col.abs_diff(self.to.col)
    }
}

#[inline]
const fn index(size: usize, cell: Cell) -> usize {
    cell.row * size + cell.col
}

/// Slides every lane of the row-major `cells` toward `direction`.
///
/// Returns the new cells and the transitions of every tile that changed
/// position or merged. Stationary tiles are not reported, so an empty list
/// means the move had no effect.
pub fn slide(cells: &[u8], size: usize, direction: Direction) -> (Vec<u8>, Vec<Transition>) {
    debug_assert_eq!(cells.len(), size * size);

    let step = direction.step();
    let mut new_cells = vec![0; cells.len()];
    let mut transitions = Vec::new();

    for start in direction.lane_starts(size) {
        let mut cursor = start;
        let mut last_placed = 0;

        for i in 0..size {
            let cell = start.offset(step, i as isize);
            let rank = cells[index(size, cell)];

            if rank == 0 {
                continue;
            }

            if last_placed == rank {
                // The tile behind the cursor was placed this move and has not
                // merged yet; it absorbs this one and can't merge again.
                let written = cursor.offset(step, -1);
                new_cells[index(size, written)] += 1;
                last_placed = 0;

                transitions.push(Transition::new(cell, written, true));
            } else {
                new_cells[index(size, cursor)] = rank;

                if cursor != cell {
                    transitions.push(Transition::new(cell, cursor, false));
                }

                last_placed = rank;
                cursor = cursor.offset(step, 1);
            }
        }
    }

    (new_cells, transitions)
}
