//! Property tests for the move engine and board history.

use std::collections::HashSet;

use core_2048::{moves::slide, Cell, Direction, Grid, Seeds};
use proptest::prelude::*;

fn board_strategy() -> impl Strategy<Value = (usize, Vec<u8>)> {
    (2usize..=5).prop_flat_map(|size| (Just(size), prop::collection::vec(0u8..=4, size * size)))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn total_value(cells: &[u8]) -> u64 {
    cells
        .iter()
        .filter(|&&rank| rank != 0)
        .map(|&rank| 1u64 << rank)
        .sum()
}

fn grid_from_cells(size: usize, cells: &[u8]) -> Grid {
    let rows: Vec<&[u8]> = cells.chunks_exact(size).collect();

    Grid::from_rows(&rows, Seeds::new(0)).unwrap()
}

proptest! {
    #[test]
    fn value_is_conserved((size, cells) in board_strategy(), direction in direction_strategy()) {
        let (new_cells, transitions) = slide(&cells, size, direction);

        prop_assert_eq!(total_value(&cells), total_value(&new_cells));

        let tiles_before = cells.iter().filter(|&&rank| rank != 0).count();
        let tiles_after = new_cells.iter().filter(|&&rank| rank != 0).count();
        let merges = transitions.iter().filter(|t| t.merged).count();

        prop_assert_eq!(tiles_before - tiles_after, merges);
    }

    #[test]
    fn empty_transitions_mean_unchanged_board(
        (size, cells) in board_strategy(),
        direction in direction_strategy(),
    ) {
        let mut grid = grid_from_cells(size, &cells);
        let transitions = grid.apply_move(direction);

        prop_assert_eq!(transitions.is_empty(), grid.cells() == cells.as_slice());
    }

    #[test]
    fn each_destination_merges_at_most_once(
        (size, cells) in board_strategy(),
        direction in direction_strategy(),
    ) {
        let (new_cells, transitions) = slide(&cells, size, direction);
        let mut merged_into = HashSet::new();

        for transition in transitions.iter().filter(|t| t.merged) {
            prop_assert!(merged_into.insert(transition.to));

            let origin = cells[transition.from.row * size + transition.from.col];
            let destination = new_cells[transition.to.row * size + transition.to.col];

            prop_assert_eq!(destination, origin + 1);
        }
    }

    #[test]
    fn lanes_move_independently(
        (size, cells) in board_strategy(),
        direction in direction_strategy(),
    ) {
        let (new_cells, _) = slide(&cells, size, direction);

        for lane in 0..size {
            let in_lane = |i: usize| match direction {
                Direction::Left | Direction::Right => i / size == lane,
                Direction::Up | Direction::Down => i % size == lane,
            };

            let isolated: Vec<u8> = cells
                .iter()
                .enumerate()
                .map(|(i, &rank)| if in_lane(i) { rank } else { 0 })
                .collect();

            let (isolated_result, _) = slide(&isolated, size, direction);

            for i in (0..size * size).filter(|&i| in_lane(i)) {
                prop_assert_eq!(isolated_result[i], new_cells[i]);
            }
        }
    }

    #[test]
    fn transitions_stay_in_their_lane(
        (size, cells) in board_strategy(),
        direction in direction_strategy(),
    ) {
        let (_, transitions) = slide(&cells, size, direction);

        for transition in &transitions {
            let Cell { row, col } = transition.from;

            match direction {
                Direction::Left => prop_assert!(transition.to.row == row && transition.to.col < col),
                Direction::Right => prop_assert!(transition.to.row == row && transition.to.col > col),
                Direction::Up => prop_assert!(transition.to.col == col && transition.to.row < row),
                Direction::Down => prop_assert!(transition.to.col == col && transition.to.row > row),
            }
        }
    }

    #[test]
    fn undo_after_move_is_exact(
        (size, cells) in board_strategy(),
        direction in direction_strategy(),
    ) {
        let mut grid = grid_from_cells(size, &cells);

        grid.apply_move(direction);
        grid.undo();
        prop_assert_eq!(grid.cells(), cells.as_slice());

        grid.undo();
        prop_assert_eq!(grid.cells(), cells.as_slice());
    }
}
