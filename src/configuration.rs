use std::{env, fs, io, path::PathBuf};

use thiserror::Error;

use crate::maze::Grid;

pub const DEFAULT_LEVEL: &str = include_str!("../levels/1.maze");

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Cannot read level {path:?}: {source}")]
    Level {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid tick duration {0:?}, expected a positive number of seconds")]
    TickSeconds(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub title: String,
    /// Side of a cell in pixels.
    pub cell_size: f32,
    pub tick_seconds: f32,
    /// Maze description, see `Grid::from_str`.
    pub level: String,
    pub log_json: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            title: "Maze Solver Game".to_string(),
            cell_size: 100.,
            tick_seconds: 0.2,
            level: DEFAULT_LEVEL.to_string(),
            log_json: false,
        }
    }
}

impl Configuration {
    /// Level path from the first argument or `MAZE_LEVEL`, tick duration
    /// from `MAZE_TICK_SECONDS`, JSON logs when `MAZE_LOG_JSON` is set.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let level_path = env::args().nth(1).or_else(|| env::var("MAZE_LEVEL").ok());

        Self::from_sources(
            level_path,
            env::var("MAZE_TICK_SECONDS").ok(),
            env::var("MAZE_LOG_JSON").is_ok(),
        )
    }

    pub fn from_sources(
        level_path: Option<String>,
        tick_seconds: Option<String>,
        log_json: bool,
    ) -> Result<Self, ConfigurationError> {
        let mut configuration = Configuration {
            log_json,
            ..Default::default()
        };

        if let Some(path) = level_path {
            let path = PathBuf::from(path);
            configuration.level = match fs::read_to_string(&path) {
                Ok(level) => level,
                Err(source) => return Err(ConfigurationError::Level { path, source }),
            };
        }

        if let Some(raw) = tick_seconds {
            configuration.tick_seconds = match raw.trim().parse::<f32>() {
                Ok(seconds) if seconds.is_finite() && seconds > 0. => seconds,
                _ => return Err(ConfigurationError::TickSeconds(raw)),
            };
        }

        Ok(configuration)
    }

    /// Window size fitting the whole grid.
    pub fn window_size(&self, grid: &Grid) -> (f32, f32) {
        (
            grid.cols() as f32 * self.cell_size,
            grid.rows() as f32 * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::Grid;

    use super::{Configuration, ConfigurationError};

    #[test]
    fn test_default_level_is_valid() {
        let configuration = Configuration::default();
        let grid: Grid = configuration.level.parse().unwrap();

        assert_eq!(configuration.window_size(&grid), (400., 300.));
    }

    #[test]
    fn test_tick_seconds_override() {
        let configuration = Configuration::from_sources(None, Some("0.5".to_string()), true).unwrap();

        assert_eq!(configuration.tick_seconds, 0.5);
        assert!(configuration.log_json);
        assert_eq!(configuration.title, "Maze Solver Game");
    }

    #[test]
    fn test_tick_seconds_must_be_positive() {
        for raw in ["abc", "0", "-1", "NaN"] {
            let result = Configuration::from_sources(None, Some(raw.to_string()), false);
            assert!(
                matches!(result, Err(ConfigurationError::TickSeconds(ref r)) if r == raw),
                "{} accepted",
                raw
            );
        }
    }

    #[test]
    fn test_missing_level_file() {
        let result = Configuration::from_sources(
            Some("/definitely/not/here.maze".to_string()),
            None,
            false,
        );

        assert!(matches!(result, Err(ConfigurationError::Level { .. })));
    }
}
