use std::{fs, path::Path, time::Duration};

use lib_2048::{animation::Pacing, grid::DEFAULT_SIZE};
use serde::Deserialize;

use crate::{error::AppError, Args};

/// Settings read from an optional TOML file, then overridden by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub size: usize,
    /// Position seed; drawn from the OS when absent.
    pub seed: Option<u64>,
    pub animate: bool,
    pub pacing: PacingConfig,
}

/// Frame delays in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingConfig {
    pub vertical_ms: u64,
    pub horizontal_ms: u64,
    pub merge_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            animate: true,
            pacing: PacingConfig::default(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        let pacing = Pacing::default();

        Self {
            vertical_ms: pacing.vertical.as_millis() as u64,
            horizontal_ms: pacing.horizontal.as_millis() as u64,
            merge_ms: pacing.merge.as_millis() as u64,
        }
    }
}

impl From<PacingConfig> for Pacing {
    fn from(config: PacingConfig) -> Self {
        Self {
            vertical: Duration::from_millis(config.vertical_ms),
            horizontal: Duration::from_millis(config.horizontal_ms),
            merge: Duration::from_millis(config.merge_ms),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Applies whatever the command line set explicitly.
    pub fn merge_args(&mut self, args: &Args) {
        if let Some(size) = args.size {
            self.size = size;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if args.no_animation {
            self.animate = false;
        }
    }

    /// Frame delays, or `None` when moves should snap into place.
    pub fn pacing(&self) -> Option<Pacing> {
        self.animate.then(|| self.pacing.into())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        file
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = write_config("");
        let config = Config::from_toml(file.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.pacing(), Some(Pacing::default()));
    }

    #[test]
    fn partial_pacing_keeps_other_delays() {
        let file = write_config(
            r#"
size = 5
seed = 42

[pacing]
merge_ms = 0
"#,
        );
        let config = Config::from_toml(file.path()).unwrap();

        assert_eq!(config.size, 5);
        assert_eq!(config.seed, Some(42));

        let pacing = config.pacing().unwrap();
        assert_eq!(pacing.merge, Duration::ZERO);
        assert_eq!(pacing.vertical, Duration::from_millis(60));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("sise = 5\n");

        assert!(matches!(
            Config::from_toml(file.path()),
            Err(AppError::ConfigParse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            Config::from_toml(dir.path().join("absent.toml")),
            Err(AppError::ConfigRead { .. })
        ));
    }

    #[test]
    fn command_line_wins_over_file() {
        let file = write_config("size = 5\nseed = 1\n");
        let mut config = Config::from_toml(file.path()).unwrap();
        let args = Args::parse_from(["play-2048", "--seed", "9", "--no-animation"]);

        config.merge_args(&args);

        assert_eq!(config.size, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.pacing(), None);
    }
}
