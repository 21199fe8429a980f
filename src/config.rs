//! Runtime configuration for the terminal binary.
//!
//! Values come from the environment first; command-line flags override them.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Shuffle seed; `None` draws one from entropy
    pub seed: Option<u32>,
    /// Directory for `ranking.json`; `None` keeps the ranking in memory
    pub ranking_dir: Option<PathBuf>,
    /// Log file; `None` disables logging so the UI is not disturbed
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ranking_dir: None,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "puzzle15", about = "Sliding 15-puzzle in the terminal")]
pub struct Cli {
    /// Seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u32>,

    /// Directory where the ranking is stored
    #[arg(long)]
    pub ranking_dir: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long)]
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source, e.g. a fixed map in tests.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed = match non_empty(var("PUZZLE15_SEED")) {
            Some(s) => Some(
                s.parse()
                    .map_err(|e| anyhow!("invalid PUZZLE15_SEED {s:?}: {e}"))?,
            ),
            None => None,
        };

        let log_level = match non_empty(var("PUZZLE15_LOG_LEVEL")) {
            Some(s) => s
                .parse()
                .map_err(|_| anyhow!("invalid PUZZLE15_LOG_LEVEL {s:?}"))?,
            None => Level::INFO,
        };

        Ok(Self {
            seed,
            ranking_dir: non_empty(var("PUZZLE15_RANKING_DIR")).map(PathBuf::from),
            log_path: non_empty(var("PUZZLE15_LOG_PATH")).map(PathBuf::from),
            log_level,
        })
    }

    /// Apply command-line overrides.
    pub fn merge(mut self, cli: Cli) -> Self {
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.ranking_dir.is_some() {
            self.ranking_dir = cli.ranking_dir;
        }
        if cli.log_path.is_some() {
            self.log_path = cli.log_path;
        }
        self
    }

    /// Environment plus flags from the given argument list (program name first).
    ///
    /// Exits the process on `--help` or unknown flags, like any clap binary.
    pub fn load<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        Ok(Self::from_env()?.merge(cli))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}
