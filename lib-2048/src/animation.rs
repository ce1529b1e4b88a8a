use std::{cmp::Reverse, time::Duration};

use tracing::trace;

use crate::{
    layout::cell_span,
    painter::{Border, Painter},
    surface::{Style, Surface},
    symbols::tile_symbol,
    Axis, Cell, Direction, Result, Transition,
};

/// Characters a tile advances per frame.
pub const VSTEP: usize = 1;
pub const HSTEP: usize = 1;

/// Frame delays of an animated move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub vertical: Duration,
    pub horizontal: Duration,
    /// Hold on the merged highlight before tiles return to resting style.
    pub merge: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            vertical: Duration::from_millis(60),
            horizontal: Duration::from_millis(20),
            merge: Duration::from_millis(200),
        }
    }
}

impl Pacing {
    /// No waiting at all, for driving frames from tests.
    pub const fn instant() -> Self {
        Self {
            vertical: Duration::ZERO,
            horizontal: Duration::ZERO,
            merge: Duration::ZERO,
        }
    }

    pub const fn frame_delay(&self, axis: Axis) -> Duration {
        match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InFlight,
    Settling,
    Done,
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    transition: Transition,
    in_flight: bool,
}

/// Where one in-flight tile is drawn during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileStep {
    pub transition: Transition,
    /// Cell redrawn empty first so no stale border is left behind.
    pub erase: Cell,
    /// Cell the tile is offset from.
    pub at: Cell,
    /// Sub-cell offset from `at`, strictly inside one cell span.
    pub fraction: isize,
    pub settled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub shift: isize,
    pub whole: isize,
    pub fraction: isize,
    pub steps: Vec<TileStep>,
    /// Every transition at rest after this frame, in draw order.
    pub settled: Vec<Transition>,
}

/// Frame-by-frame replay of one move's transitions.
///
/// All tiles advance together by a shared shift; each one stops once it is
/// cell-aligned on its destination.
#[derive(Clone, Debug)]
pub struct Animation {
    axis: Axis,
    step: isize,
    span: usize,
    shift: isize,
    motions: Vec<Motion>,
    phase: Phase,
}

impl Animation {
    pub fn new(direction: Direction, mut transitions: Vec<Transition>) -> Self {
        let axis = direction.axis();
        let lane_coordinate = move |t: &Transition| match axis {
            Axis::Vertical => t.from.row,
            Axis::Horizontal => t.from.col,
        };

        // Tiles nearest the destination edge are drawn first.
        if direction.toward_increasing() {
            transitions.sort_by_key(|t| Reverse(lane_coordinate(t)));
        } else {
            transitions.sort_by_key(lane_coordinate);
        }

        let unit = (match axis {
            Axis::Vertical => VSTEP,
            Axis::Horizontal => HSTEP,
        }) as isize;

        let motions: Vec<Motion> = transitions
            .into_iter()
            .map(|transition| Motion {
                transition,
                in_flight: transition.distance() > 0,
            })
            .collect();

        let phase = if motions.iter().any(|m| m.in_flight) {
            Phase::InFlight
        } else {
            Phase::Settling
        };

        Self {
            axis,
            step: if direction.toward_increasing() { unit } else { -unit },
            span: cell_span(axis),
            shift: 0,
            motions,
            phase,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Transitions in draw order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.motions.iter().map(|m| &m.transition)
    }

    fn offset(&self, cell: Cell, count: isize) -> Cell {
        match self.axis {
            Axis::Vertical => cell.offset((1, 0), count),
            Axis::Horizontal => cell.offset((0, 1), count),
        }
    }

    /// Advances every in-flight tile by one step.
    ///
    /// Returns `None` once nothing is in flight.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.phase != Phase::InFlight {
            return None;
        }

        self.shift += self.step;

        // Split the magnitude so the whole part counts cells from the origin
        // and both parts carry the sign of the step.
        let sign = self.step.signum();
        let magnitude = self.shift.unsigned_abs();
        let whole = (magnitude / self.span) as isize * sign;
        let fraction = (magnitude % self.span) as isize * sign;

        let mut steps = Vec::new();

        for i in 0..self.motions.len() {
            let motion = self.motions[i];

            if !motion.in_flight {
                continue;
            }

            let at = self.offset(motion.transition.from, whole);
            let erase = if fraction == 0 {
                self.offset(motion.transition.from, whole - sign)
            } else {
                at
            };
            let settled = fraction == 0 && at == motion.transition.to;

            if settled {
                self.motions[i].in_flight = false;
            }

            steps.push(TileStep {
                transition: motion.transition,
                erase,
                at,
                fraction,
                settled,
            });
        }

        if self.motions.iter().all(|m| !m.in_flight) {
            self.phase = Phase::Settling;
        }

        trace!(shift = self.shift, whole, fraction, moving = steps.len(), "animation frame");

        Some(Frame {
            shift: self.shift,
            whole,
            fraction,
            steps,
            settled: self
                .motions
                .iter()
                .filter(|m| !m.in_flight)
                .map(|m| m.transition)
                .collect(),
        })
    }

    /// Ends the animation, returning the transitions in draw order.
    pub fn finish(&mut self) -> Vec<Transition> {
        self.phase = Phase::Done;

        self.transitions().copied().collect()
    }
}

fn rank_at(cells: &[u8], size: usize, cell: Cell) -> u8 {
    cells[cell.row * size + cell.col]
}

/// Paints animations onto a surface.
#[derive(Clone, Copy, Debug)]
pub struct Animator {
    painter: Painter,
    pacing: Pacing,
}

impl Animator {
    pub const fn new(painter: Painter, pacing: Pacing) -> Self {
        Self { painter, pacing }
    }

    /// Replays `transitions` from the `before` board to the `after` board.
    pub fn play(
        &self,
        surface: &mut impl Surface,
        direction: Direction,
        transitions: Vec<Transition>,
        before: &[u8],
        after: &[u8],
    ) -> Result<()> {
        let painter = &self.painter;
        let size = painter.layout().size;
        let mut animation = Animation::new(direction, transitions);
        let axis = animation.axis();
        let mut frames = 0;

        while let Some(frame) = animation.tick() {
            for step in &frame.steps {
                let text = tile_symbol(rank_at(before, size, step.transition.from));

                painter.draw_tile(surface, step.erase, "", Style::Resting, Border::Grid)?;
                painter.draw_shifted_tile(
                    surface,
                    step.at,
                    &text,
                    Style::Moving,
                    axis,
                    step.fraction,
                )?;
            }

            // Neighbours' erase passes can clip a settled tile's border.
            for transition in &frame.settled {
                let style = if transition.merged {
                    Style::Merged
                } else {
                    Style::Moving
                };
                let text = tile_symbol(rank_at(after, size, transition.to));

                painter.draw_tile(surface, transition.to, &text, style, Border::Wide)?;
            }

            surface.refresh()?;
            surface.pause(self.pacing.frame_delay(axis))?;
            frames += 1;
        }

        let transitions = animation.finish();

        for transition in transitions.iter().filter(|t| t.merged) {
            let text = tile_symbol(rank_at(after, size, transition.to));

            painter.draw_tile(surface, transition.to, &text, Style::Merged, Border::Wide)?;
        }

        surface.refresh()?;
        surface.pause(self.pacing.merge)?;

        for transition in &transitions {
            let text = tile_symbol(rank_at(after, size, transition.to));

            painter.draw_tile(surface, transition.to, &text, Style::Resting, Border::Grid)?;
        }

        surface.refresh()?;

        trace!(?direction, frames, "animation finished");

        Ok(())
    }
}
