use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error(transparent)]
    Board(#[from] core_2048::Error),
    #[error(transparent)]
    Game(#[from] lib_2048::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
