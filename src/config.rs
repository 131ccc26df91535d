use std::path::PathBuf;

use crate::{
    error::{MazeError, Result},
    generators::GenerationParams,
    solvers::Solver,
};

/// Settings for one generate-and-solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub height: u16,
    pub width: u16,
    /// Absolute number of blocked cells, not a percentage.
    pub blocks: usize,
    pub ensure_path: bool,
    pub max_retries: usize,
    /// Seed for reproducible mazes; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub solver: Solver,
    /// Read the maze from this 0/1 matrix file instead of generating one.
    pub input: Option<PathBuf>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 10,
            blocks: 30,
            ensure_path: true,
            max_retries: 10,
            seed: None,
            solver: Solver::AStar,
            input: None,
        }
    }
}

impl MazeConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            blocks: self.blocks,
            ensure_path: self.ensure_path,
            max_retries: self.max_retries,
        }
    }

    /// Parses command-line flags (without the executable name) on top of the
    /// defaults.
    ///
    /// Recognized: `--height N`, `--width N`, `--blocks N`, `--retries N`,
    /// `--seed N`, `--solver backtracking|astar`, `--input PATH`, `--no-ensure-path`.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = MazeConfig::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--no-ensure-path" => config.ensure_path = false,
                "--height" => config.height = parse_value(&flag, args.next())?,
                "--width" => config.width = parse_value(&flag, args.next())?,
                "--blocks" => config.blocks = parse_value(&flag, args.next())?,
                "--retries" => config.max_retries = parse_value(&flag, args.next())?,
                "--seed" => config.seed = Some(parse_value(&flag, args.next())?),
                "--solver" => config.solver = parse_value(&flag, args.next())?,
                "--input" => {
                    let path = args
                        .next()
                        .ok_or_else(|| MazeError::Config("--input needs a path".to_string()))?;
                    config.input = Some(PathBuf::from(path));
                }
                other => {
                    return Err(MazeError::Config(format!("unknown argument {other:?}")));
                }
            }
        }

        if config.height == 0 || config.width == 0 {
            return Err(MazeError::Config(
                "height and width must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value = value.ok_or_else(|| MazeError::Config(format!("{flag} needs a value")))?;
    value
        .parse()
        .map_err(|_| MazeError::Config(format!("invalid value {value:?} for {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, MazeConfig::default());
        assert_eq!((config.height, config.width), (10, 10));
        assert_eq!(config.blocks, 30);
        assert!(config.ensure_path);
    }

    #[test]
    fn test_parse_flags() {
        let config = MazeConfig::from_args([
            "--height",
            "5",
            "--width",
            "7",
            "--blocks",
            "12",
            "--seed",
            "99",
            "--solver",
            "backtracking",
            "--no-ensure-path",
        ])
        .unwrap();
        assert_eq!((config.height, config.width), (5, 7));
        assert_eq!(config.blocks, 12);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.solver, Solver::Backtracking);
        assert!(!config.ensure_path);
    }

    #[test]
    fn test_bad_flags() {
        assert!(MazeConfig::from_args(["--height", "zero"]).is_err());
        assert!(MazeConfig::from_args(["--height", "0"]).is_err());
        assert!(MazeConfig::from_args(["--width"]).is_err());
        assert!(MazeConfig::from_args(["--solver", "dijkstra"]).is_err());
        assert!(MazeConfig::from_args(["--fast"]).is_err());
    }
}
