use std::{cell::Cell as StdCell, io, rc::Rc, time::Duration};

use lib_2048::{
    ai::{AiController, GreedyAi, RandomAi},
    animation::Pacing,
    game::{
        Controller, Game, Input, Outcome, MSG_GAME_OVER, MSG_INVALID_KEY, MSG_NOTHING_TO_UNDO,
        MSG_NO_MOVE, MSG_QUIT, MSG_RESIZED, MSG_SINGLE_UNDO,
    },
    layout::Layout,
    moves,
    surface::{Canvas, Style, Surface},
    Direction, Error, Grid, Move, Seeds,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Canvas that also remembers every string written and can fake its size.
struct Recorder {
    canvas: Canvas,
    texts: Vec<(String, Style)>,
    dims: Rc<StdCell<(usize, usize)>>,
}

impl Recorder {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            canvas: Canvas::new(rows, cols),
            texts: Vec::new(),
            dims: Rc::new(StdCell::new((rows, cols))),
        }
    }

    fn shown(&self, msg: &str) -> bool {
        self.texts.iter().any(|(text, _)| text.trim() == msg)
    }

    fn shown_with(&self, msg: &str, style: Style) -> bool {
        self.texts.iter().any(|(text, s)| text.trim() == msg && *s == style)
    }
}

impl Surface for Recorder {
    fn put_str(&mut self, row: usize, col: usize, text: &str, style: Style) -> io::Result<()> {
        self.texts.push((text.to_owned(), style));
        self.canvas.put_str(row, col, text, style)
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.canvas.refresh()
    }

    fn dimensions(&self) -> io::Result<(usize, usize)> {
        Ok(self.dims.get())
    }

    fn reposition(&mut self, layout: &Layout) -> io::Result<()> {
        self.canvas.reposition(layout)
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.canvas.pause(duration)
    }
}

/// Plays whatever the closure returns for the current board.
struct Scripted<F>(F);

impl<F: FnMut(&Grid) -> Input> Controller for Scripted<F> {
    fn next_input(&mut self, grid: &Grid) -> io::Result<Input> {
        Ok((self.0)(grid))
    }
}

fn inputs(script: Vec<Input>) -> Scripted<impl FnMut(&Grid) -> Input> {
    let mut script = script.into_iter();

    Scripted(move |_: &Grid| script.next().unwrap_or(Input::Move(Move::Quit)))
}

fn legal_direction(grid: &Grid) -> Direction {
    Direction::iter()
        .find(|&d| !moves::slide(grid.cells(), grid.size(), d).1.is_empty())
        .unwrap()
}

fn new_game(size: usize, seed: u64, pacing: Option<Pacing>) -> Game<Recorder> {
    let grid = Grid::new(size, Seeds::new(seed)).unwrap();

    Game::new(grid, Recorder::new(40, 100), pacing).unwrap()
}

#[test]
fn quitting_straight_away() {
    let mut game = new_game(4, 7, None);

    let summary = game.run(&mut inputs(vec![Input::Move(Move::Quit)])).unwrap();

    assert_eq!(summary.outcome, Outcome::Quit);
    assert_eq!(summary.moves, 0);
    assert_eq!(game.grid().list_free_cells().len(), 14);
    assert!(game.surface().shown_with(MSG_QUIT, Style::Message));
}

#[test]
fn undo_is_single_use() {
    let mut game = new_game(4, 11, Some(Pacing::instant()));
    let mut before_move = Vec::new();
    let mut step = 0;

    let mut controller = Scripted(|grid: &Grid| {
        step += 1;

        match step {
            1 => Input::Move(Move::Undo),
            2 => Input::Move(legal_direction(grid).into()),
            3 => {
                before_move = grid.cells().to_vec();
                Input::Move(legal_direction(grid).into())
            }
            4 | 5 => Input::Move(Move::Undo),
            _ => Input::Move(Move::Quit),
        }
    });

    let summary = game.run(&mut controller).unwrap();

    assert_eq!(summary.moves, 1);
    assert_eq!(game.moves(), 1);
    assert_eq!(game.grid().cells(), before_move.as_slice());

    let surface = game.surface();
    assert!(surface.shown_with(MSG_NOTHING_TO_UNDO, Style::Error));
    assert!(surface.shown_with(MSG_SINGLE_UNDO, Style::Error));
    assert!(surface.shown("2 moves played so far"));
}

#[test]
fn blocked_move_is_reported_and_not_counted() {
    // Full columns with no vertical pairs once the two free cells are filled.
    let grid = Grid::from_rows(&[&[3, 4, 5], &[6, 7, 8], &[0, 0, 9]], Seeds::new(5)).unwrap();
    let mut game = Game::new(grid, Recorder::new(40, 100), None).unwrap();

    let summary = game
        .run(&mut inputs(vec![Input::Move(Move::Up), Input::Move(Move::Down)]))
        .unwrap();

    assert_eq!(summary.outcome, Outcome::Quit);
    assert_eq!(summary.moves, 0);
    assert_eq!(summary.highest_rank, 9);
    assert!(game.surface().shown_with(MSG_NO_MOVE, Style::Error));
    assert!(!game.surface().shown("1 moves played so far"));
}

#[test]
fn invalid_key_shows_help() {
    let mut game = new_game(4, 3, None);

    game.run(&mut inputs(vec![Input::Invalid])).unwrap();

    assert!(game.surface().shown_with(MSG_INVALID_KEY, Style::Error));
}

#[test]
fn each_effective_move_adds_a_tile_and_a_point() {
    let mut game = new_game(4, 21, Some(Pacing::instant()));
    let mut tiles = Vec::new();
    let mut step = 0;

    let mut controller = Scripted(|grid: &Grid| {
        step += 1;
        tiles.push(grid.cells().iter().filter(|&&r| r != 0).count());

        if step <= 3 {
            Input::Move(legal_direction(grid).into())
        } else {
            Input::Move(Move::Quit)
        }
    });

    let summary = game.run(&mut controller).unwrap();

    assert_eq!(summary.moves, 3);
    assert_eq!(tiles[0], 2);
    assert!(game.surface().shown("3 moves played so far"));
    for pair in tiles.windows(2) {
        // One spawn per move, minus any merges.
        assert!(pair[1] <= pair[0] + 1);
    }
}

#[test]
fn resize_recentres_the_window() {
    let mut game = new_game(4, 9, None);

    game.run(&mut inputs(vec![Input::Resize])).unwrap();

    assert!(game.surface().shown_with(MSG_RESIZED, Style::Message));
}

#[test]
fn resize_below_the_window_keeps_playing() {
    let recorder = Recorder::new(40, 100);
    let dims = Rc::clone(&recorder.dims);
    let grid = Grid::new(4, Seeds::new(9)).unwrap();
    let mut game = Game::new(grid, recorder, None).unwrap();

    let mut step = 0;
    let mut controller = Scripted(|_: &Grid| {
        step += 1;

        match step {
            1 => {
                dims.set((10, 20));
                Input::Resize
            }
            _ => Input::Move(Move::Quit),
        }
    });

    let summary = game.run(&mut controller).unwrap();

    assert_eq!(summary.outcome, Outcome::Quit);
    assert!(!game.surface().shown(MSG_RESIZED));
}

#[test]
fn too_small_surface_is_rejected_up_front() {
    let grid = Grid::new(4, Seeds::new(1)).unwrap();
    let err = Game::new(grid, Recorder::new(20, 100), None).err().unwrap();

    assert!(matches!(err, Error::SurfaceTooSmall { needed_rows: 27, .. }));
}

#[test]
fn greedy_ai_plays_a_small_board_to_the_end() {
    let mut game = new_game(2, 4, Some(Pacing::instant()));

    let summary = game.run(&mut AiController::new(GreedyAi)).unwrap();

    assert_eq!(summary.outcome, Outcome::GameOver);
    assert!(summary.moves > 0);
    assert!(game.grid().gameover());
    assert!(game.surface().shown_with(MSG_GAME_OVER, Style::Error));
}

#[test]
fn random_ai_games_are_reproducible() {
    let play = || {
        let mut game = new_game(3, 17, None);
        let ai = RandomAi::new(ChaCha8Rng::seed_from_u64(2));

        let summary = game.run(&mut AiController::new(ai)).unwrap();

        (summary, game.grid().cells().to_vec())
    };

    let (first, cells) = play();

    assert_eq!(first.outcome, Outcome::GameOver);
    assert_eq!(play(), (first, cells));
}
