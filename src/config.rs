use crate::error::{SolveResult, SolverError};
use crate::geometry::{check_tile_count, DEFAULT_TILE_COUNT};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Grid size N (the image is cut into N×N tiles)
    #[arg(long, default_value_t = DEFAULT_TILE_COUNT)]
    pub tile_count: usize,

    /// Upper bound on evaluated swap pairs
    #[arg(long, default_value_t = 50)]
    pub max_steps: usize,

    /// Wall-clock budget for one solve, in milliseconds
    #[arg(long)]
    pub max_time_ms: Option<u64>,

    // The server's sequence starts with an element that is not part of any
    // candidate pair; it is dropped before pairing.
    #[arg(long, default_value_t = 1)]
    pub skip_leading: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            max_steps: 50,
            max_time_ms: None,
            skip_leading: 1,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SolveResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SolverError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SearchParams {
    pub fn validate(&self) -> SolveResult<()> {
        check_tile_count(self.tile_count)
    }

    /// Copies over only the values the user typed on the command line, so file
    /// values survive clap defaults.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(tile_count, "tile_count");
        update_if_present!(max_steps, "max_steps");
        update_if_present!(max_time_ms, "max_time_ms");
        update_if_present!(skip_leading, "skip_leading");
    }
}
