use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Mutex,
};

use clap::{Parser, ValueEnum};
use lib_2048::{
    ai::{AiController, GreedyAi, RandomAi},
    game::{Game, Outcome, Summary},
    layout::Layout,
    surface::{Style, Surface},
    symbols::tile_symbol,
    Grid, Seeds,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use error::AppError;
use input::Keyboard;
use render::Terminal;

mod config;
mod error;
mod input;
mod render;

const MSG_ABORT: &str = "Press any key to abort!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AiKind {
    /// Uniformly random legal moves
    Random,
    /// The move that leaves the most free cells
    Greedy,
}

/// Terminal 2048 with animated tile slides.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board side length
    #[arg(long)]
    size: Option<usize>,
    /// Seed for tile positions, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    /// Let an AI play instead of the keyboard
    #[arg(long, value_enum)]
    ai: Option<AiKind>,
    /// Snap tiles into place instead of sliding them
    #[arg(long)]
    no_animation: bool,
    /// TOML file with defaults for the options above
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write logs to this file; nothing is logged otherwise
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Log filter directives, e.g. `debug` or `lib_2048=trace`
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn init_logging(path: &Path, filter: &str) -> Result<(), AppError> {
    let file = File::create(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter)?)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();

    Ok(())
}

/// Builds the board only once the game window is known to fit `surface`.
fn open_grid(size: usize, seeds: Seeds, surface: &impl Surface) -> Result<Grid, AppError> {
    let (rows, cols) = surface.dimensions()?;
    Layout::new(size, rows, cols)?;

    Ok(Grid::new(size, seeds)?)
}

/// Shows a startup error in the top-left corner, cut to the terminal width.
fn report_fatal(surface: &mut impl Surface, err: &AppError) -> io::Result<()> {
    let (_, cols) = surface.dimensions()?;
    let lines = [err.to_string(), MSG_ABORT.to_owned()];

    for (row, line) in lines.iter().enumerate() {
        let line: String = line.chars().take(cols).collect();
        surface.put_str(row, 0, &line, Style::Error)?;
    }

    surface.refresh()
}

fn play(args: &Args) -> Result<Summary, AppError> {
    let mut config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    config.merge_args(args);

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_filter)?;
    }

    let seeds = config.seed.map_or_else(Seeds::from_entropy, Seeds::new);
    info!(?seeds, size = config.size, ai = ?args.ai, "new game");

    let mut terminal = Terminal::new()?;
    let mut keyboard = Keyboard::new(io::stdin().lock())?;

    let grid = match open_grid(config.size, seeds, &terminal) {
        Ok(grid) => grid,
        Err(err @ AppError::Game(lib_2048::Error::SurfaceTooSmall { .. })) => {
            report_fatal(&mut terminal, &err)?;
            keyboard.wait_key()?;

            return Err(err);
        }
        Err(err) => return Err(err),
    };
    let mut game = Game::new(grid, terminal, config.pacing())?;

    let summary = match args.ai {
        None => game.run(&mut keyboard)?,
        Some(AiKind::Random) => {
            let ai = RandomAi::new(ChaCha8Rng::from_entropy());
            game.run(&mut AiController::new(ai))?
        }
        Some(AiKind::Greedy) => game.run(&mut AiController::new(GreedyAi))?,
    };

    keyboard.wait_key()?;

    Ok(summary)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match play(&args) {
        Ok(summary) => {
            let verdict = match summary.outcome {
                Outcome::Quit => "quit",
                Outcome::GameOver => "game over",
            };

            println!(
                "{verdict} after {} moves, highest tile {}",
                summary.moves,
                tile_symbol(summary.highest_rank)
            );

            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");

            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use lib_2048::surface::Canvas;

    use super::*;

    #[test]
    fn oversized_board_fails_the_fit_before_allocating() {
        let canvas = Canvas::new(40, 100);

        for size in [100_000, usize::MAX / 2] {
            assert!(matches!(
                open_grid(size, Seeds::new(0), &canvas),
                Err(AppError::Game(lib_2048::Error::SurfaceTooSmall { .. }))
            ));
        }

        assert_eq!(open_grid(4, Seeds::new(0), &canvas).unwrap().size(), 4);
        assert!(matches!(
            open_grid(1, Seeds::new(0), &canvas),
            Err(AppError::Board(core_2048::Error::GridTooSmall(1)))
        ));
    }

    #[test]
    fn fatal_report_asks_for_a_key_and_fits_the_width() {
        let mut canvas = Canvas::new(5, 20);
        let err = open_grid(4, Seeds::new(0), &canvas).unwrap_err();

        report_fatal(&mut canvas, &err).unwrap();

        assert_eq!(canvas.row_text(0, 0, 20), "terminal too small f");
        assert_eq!(canvas.row_text(1, 0, 20), "Press any key to abo");
        assert_eq!(canvas.style_at(1, 0), Style::Error);
        assert_eq!(canvas.refreshes(), 1);
    }
}
