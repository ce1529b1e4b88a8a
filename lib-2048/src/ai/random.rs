use rand::{seq::IteratorRandom, Rng};

use crate::{Direction, Grid};

use super::Ai;

/// Picks uniformly among the legal directions.
pub struct RandomAi<R> {
    rng: R,
}

impl<R> Ai for RandomAi<R>
where
    R: Rng,
{
    fn next_move(&mut self, grid: &Grid) -> Option<Direction> {
        super::get_all_moves(grid)
            .map(|(_, direction)| direction)
            .choose(&mut self.rng)
    }
}

impl<R> RandomAi<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}
