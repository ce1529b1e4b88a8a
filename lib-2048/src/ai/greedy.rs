use crate::{Direction, Grid};

use super::Ai;

/// One-ply lookahead: the move leaving the most free cells wins.
///
/// Ties go to the earliest direction in `Direction::iter` order.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAi;

impl Ai for GreedyAi {
    fn next_move(&mut self, grid: &Grid) -> Option<Direction> {
        let mut best: Option<(usize, Direction)> = None;

        for (cells, direction) in super::get_all_moves(grid) {
            let free = cells.iter().filter(|&&rank| rank == 0).count();

            if best.map_or(true, |(best_free, _)| free > best_free) {
                best = Some((free, direction));
            }
        }

        best.map(|(_, direction)| direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Seeds;

    #[test]
    fn prefers_the_move_that_merges_most() {
        let grid = Grid::from_rows(
            &[&[1, 1, 2], &[3, 4, 5], &[3, 6, 7]],
            Seeds::new(0),
        )
        .unwrap();

        // Up/Down merge the 3s, Left/Right merge the 1s: one free cell each,
        // so the first of them in iteration order wins.
        assert_eq!(GreedyAi.next_move(&grid), Some(Direction::Up));

        let grid = Grid::from_rows(
            &[&[1, 1, 2], &[2, 2, 5], &[3, 6, 7]],
            Seeds::new(0),
        )
        .unwrap();

        assert_eq!(GreedyAi.next_move(&grid), Some(Direction::Left));
    }
}
