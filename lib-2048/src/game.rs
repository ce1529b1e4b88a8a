use std::io;

use tracing::{debug, info, warn};

use crate::{
    animation::{Animator, Pacing},
    layout::Layout,
    painter::{Border, Painter},
    surface::{Style, Surface},
    symbols::tile_symbol,
    Direction, Grid, Move, Result,
};

pub const MSG_INVALID_KEY: &str = "Invalid key! Press w/s/a/d to move, q to quit...";
pub const MSG_NO_MOVE: &str = "CANNOT MOVE IN THAT DIRECTION!";
pub const MSG_NOTHING_TO_UNDO: &str = "NO MOVES TO UNDO!";
pub const MSG_SINGLE_UNDO: &str = "CAN UNDO ONLY A SINGLE STEP!";
pub const MSG_QUIT: &str = "Quitting! Press any key to exit...";
pub const MSG_GAME_OVER: &str = "Game over! Press any key to exit...";
pub const MSG_RESIZED: &str = "Screen resized!";

/// One unit of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Move),
    /// The terminal changed size.
    Resize,
    /// A key outside the move vocabulary.
    Invalid,
}

/// Source of moves: a keyboard, an AI, or a script.
pub trait Controller {
    fn next_input(&mut self, grid: &Grid) -> io::Result<Input>;
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn next_input(&mut self, grid: &Grid) -> io::Result<Input> {
        (**self).next_input(grid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub outcome: Outcome,
    pub moves: u32,
    pub highest_rank: u8,
}

/// Turn bookkeeping around a `Grid`: move counter, single-use undo, drawing.
pub struct Game<S> {
    grid: Grid,
    surface: S,
    painter: Painter,
    pacing: Option<Pacing>,
    moves: u32,
    undo_available: bool,
}

impl<S: Surface> Game<S> {
    /// Lays the window out on `surface`; `pacing` of `None` disables animation.
    pub fn new(grid: Grid, surface: S, pacing: Option<Pacing>) -> Result<Self> {
        let (rows, cols) = surface.dimensions()?;
        let layout = Layout::new(grid.size(), rows, cols)?;

        Ok(Self {
            grid,
            surface,
            painter: Painter::new(layout),
            pacing,
            moves: 0,
            undo_available: false,
        })
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn moves(&self) -> u32 {
        self.moves
    }

    fn paint_all(&mut self) -> Result<()> {
        self.surface.reposition(self.painter.layout())?;
        self.painter.draw_banner(&mut self.surface)?;
        self.painter.draw_grid(&mut self.surface)?;
        self.painter.draw_board(&mut self.surface, self.grid.cells())?;

        if self.moves > 0 {
            self.painter.display_score(&mut self.surface, self.moves)?;
        }

        self.surface.refresh()?;

        Ok(())
    }

    fn message(&mut self, msg: &str, style: Style) -> Result<()> {
        self.painter.display_message(&mut self.surface, msg, style)?;
        self.surface.refresh()?;

        Ok(())
    }

    /// Re-centres the window after a terminal resize.
    fn relayout(&mut self) -> Result<()> {
        let (rows, cols) = self.surface.dimensions()?;

        match Layout::new(self.grid.size(), rows, cols) {
            Ok(layout) => {
                debug!(rows, cols, "relayout after resize");
                self.painter = Painter::new(layout);
                self.paint_all()?;
                self.message(MSG_RESIZED, Style::Message)
            }
            Err(err) => {
                warn!(%err, "terminal shrank below the game window");
                Ok(())
            }
        }
    }

    fn undo(&mut self) -> Result<()> {
        if self.undo_available {
            self.undo_available = false;
            self.moves -= 1;
            self.grid.undo();

            self.painter.draw_board(&mut self.surface, self.grid.cells())?;
            self.painter.display_score(&mut self.surface, self.moves)?;
            self.surface.refresh()?;

            debug!(moves = self.moves, "undid last move");

            Ok(())
        } else if self.moves == 0 {
            self.message(MSG_NOTHING_TO_UNDO, Style::Error)
        } else {
            self.message(MSG_SINGLE_UNDO, Style::Error)
        }
    }

    /// Plays one directional move; returns `true` when the game is over.
    fn turn(&mut self, direction: Direction) -> Result<bool> {
        let transitions = self.grid.apply_move(direction);

        if transitions.is_empty() {
            self.message(MSG_NO_MOVE, Style::Error)?;

            return Ok(false);
        }

        if let Some(pacing) = self.pacing {
            Animator::new(self.painter, pacing).play(
                &mut self.surface,
                direction,
                transitions,
                self.grid.previous(),
                self.grid.cells(),
            )?;
        }

        self.painter.draw_board(&mut self.surface, self.grid.cells())?;
        self.moves += 1;
        self.undo_available = true;
        self.painter.display_score(&mut self.surface, self.moves)?;

        let (cell, rank) = self.grid.spawn_tile()?;

        self.painter.clear_message(&mut self.surface)?;
        self.painter.draw_tile(
            &mut self.surface,
            cell,
            &tile_symbol(rank),
            Style::NewTile,
            Border::None,
        )?;
        self.surface.refresh()?;

        debug!(?direction, moves = self.moves, "turn played");

        Ok(self.grid.gameover())
    }

    /// Spawns the opening tiles and plays until quit or game over.
    pub fn run(&mut self, controller: &mut impl Controller) -> Result<Summary> {
        self.grid.spawn_tile()?;
        self.grid.spawn_tile()?;
        self.paint_all()?;

        info!(size = self.grid.size(), "game started");

        let outcome = loop {
            let mv = match controller.next_input(&self.grid)? {
                Input::Move(mv) => mv,
                Input::Resize => {
                    self.relayout()?;
                    continue;
                }
                Input::Invalid => {
                    self.message(MSG_INVALID_KEY, Style::Error)?;
                    continue;
                }
            };

            match mv {
                Move::Quit => {
                    self.message(MSG_QUIT, Style::Message)?;
                    break Outcome::Quit;
                }
                Move::Undo => self.undo()?,
                _ => {
                    if self.turn(Direction::try_from(mv)?)? {
                        self.message(MSG_GAME_OVER, Style::Error)?;
                        break Outcome::GameOver;
                    }
                }
            }
        };

        let summary = Summary {
            outcome,
            moves: self.moves,
            highest_rank: self.grid.highest_rank(),
        };

        info!(?summary, "game finished");

        Ok(summary)
    }
}
