use std::io;

use crate::{
    game::{Controller, Input},
    moves, Direction, Grid, Move,
};

pub mod greedy;
pub mod random;

pub use greedy::GreedyAi;
pub use random::RandomAi;

/// An automated player.
pub trait Ai {
    /// A direction that changes the board, or `None` when no move is left.
    fn next_move(&mut self, grid: &Grid) -> Option<Direction>;
}

impl<A: Ai + ?Sized> Ai for Box<A> {
    fn next_move(&mut self, grid: &Grid) -> Option<Direction> {
        (**self).next_move(grid)
    }
}

/// Every legal direction with the cells it would produce, before spawning.
fn get_all_moves(grid: &Grid) -> impl Iterator<Item = (Vec<u8>, Direction)> + '_ {
    Direction::iter().filter_map(move |direction| {
        let (cells, transitions) = moves::slide(grid.cells(), grid.size(), direction);

        (!transitions.is_empty()).then_some((cells, direction))
    })
}

/// Drives a game from an `Ai`, quitting when it runs out of moves.
pub struct AiController<A> {
    ai: A,
}

impl<A: Ai> AiController<A> {
    pub const fn new(ai: A) -> Self {
        Self { ai }
    }
}

impl<A: Ai> Controller for AiController<A> {
    fn next_input(&mut self, grid: &Grid) -> io::Result<Input> {
        let mv = self.ai.next_move(grid).map_or(Move::Quit, Move::from);

        Ok(Input::Move(mv))
    }
}
