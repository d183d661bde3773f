//! Opening table: precomputed search values for early positions, keyed by
//! truncated FEN (board and side to move only).
//!
//! The table is immutable once loaded and is shared between the foreground
//! engine and the analyzer behind an `Arc`.

use std::collections::HashMap;
use std::path::Path;

use chess_core::{Color, Move, Position, legal_moves};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::search::{INFINITY, Searcher};

/// Offset that keeps every table value's weight exponent positive.
pub const VALUE_OFFSET: f64 = 881.0;
/// Softness of the weighting; larger spreads picks more evenly.
pub const TEMPERATURE: f64 = 40.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    values: HashMap<String, i32>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book = Self::from_json_str(&json)?;
        info!(path = %path.display(), entries = book.len(), "opening table loaded");
        Ok(book)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> EngineResult<()> {
        std::fs::write(path, self.to_json()?).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search every position to `depth` and record its value.
    pub fn build<I>(positions: I, depth: u8, cache_capacity: usize) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut searcher = Searcher::new(cache_capacity);
        let mut book = Self::new();
        for pos in positions {
            let (value, _) = searcher.minimax(&pos, depth, -INFINITY, INFINITY);
            debug!(fen = %pos.truncated_fen(), value, "table entry");
            book.values.insert(pos.truncated_fen(), value);
        }
        info!(entries = book.len(), depth, nodes = searcher.nodes(), "opening table built");
        book
    }

    pub fn insert(&mut self, pos: &Position, value: i32) {
        self.values.insert(pos.truncated_fen(), value);
    }

    pub fn get(&self, pos: &Position) -> Option<i32> {
        self.values.get(&pos.truncated_fen()).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Legal moves of `pos` whose resulting position is in the table, with
    /// that position's value.
    pub fn candidates(&self, pos: &Position) -> Vec<(Move, i32)> {
        legal_moves(pos)
            .into_iter()
            .filter_map(|mv| self.get(&pos.after(mv)).map(|value| (mv, value)))
            .collect()
    }

    /// With probability `probability`, pick a table move for `pos` by
    /// weighted sampling. `None` means the caller should search.
    ///
    /// A move leading to value `v` weighs `exp((v + 881) / 40)` for White and
    /// the reciprocal for Black.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        pos: &Position,
        probability: f64,
        rng: &mut R,
    ) -> Option<(Move, i32)> {
        if self.is_empty() || !rng.gen_bool(probability.clamp(0.0, 1.0)) {
            return None;
        }
        let candidates = self.candidates(pos);
        if candidates.is_empty() {
            return None;
        }

        let sign = match pos.side_to_move {
            Color::White => 1.0,
            Color::Black => -1.0,
        };
        let exponents: Vec<f64> = candidates
            .iter()
            .map(|&(_, v)| sign * (v as f64 + VALUE_OFFSET) / TEMPERATURE)
            .collect();
        // Shifting every exponent by the largest keeps the ratios and stays finite
        let top = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights = exponents.iter().map(|e| (e - top).exp());
        let dist = WeightedIndex::new(weights).ok()?;
        Some(candidates[dist.sample(rng)])
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
