//! Engine configuration, loaded from TOML. Every field has a default, so an
//! empty file is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// First search depth in plies
    pub depth: u8,
    /// Keep deepening until this much time has been spent
    pub min_search_time_ms: u64,
    pub max_depth: u8,
    /// Chance of consulting the opening table before searching
    pub book_probability: f64,
    /// JSON opening table; no table when unset
    pub book_path: Option<PathBuf>,
    /// Entries kept in each searcher's evaluation cache (0 disables it)
    pub eval_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            min_search_time_ms: 1000,
            max_depth: 8,
            book_probability: 2.0 / 3.0,
            book_path: None,
            eval_cache_capacity: 200_000,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&self.book_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "book_probability must be within 0..=1, got {}",
                self.book_probability
            )));
        }
        if self.max_depth < self.depth {
            return Err(EngineError::InvalidConfig(format!(
                "max_depth {} is below depth {}",
                self.max_depth, self.depth
            )));
        }
        Ok(())
    }

    pub fn min_search_time(&self) -> Duration {
        Duration::from_millis(self.min_search_time_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
