//! The foreground engine: opening table first, then iterative deepening.

use std::sync::Arc;
use std::time::Instant;

use chess_core::{ChessError, Move, Position, SearchLimits};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::search::{INFINITY, Searcher};

/// Outcome of one best-move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Centipawns from White's point of view
    pub score: i32,
    /// Deepest completed search, 0 for a table move
    pub depth: u8,
    pub nodes: u64,
    pub from_book: bool,
}

/// Configuration plus the shared, read-only opening table. Cloning is cheap
/// and each clone searches independently.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    book: Arc<OpeningBook>,
}

impl Engine {
    pub fn new(config: EngineConfig, book: Arc<OpeningBook>) -> Self {
        Self { config, book }
    }

    /// Build from a config, loading its opening table if one is named. A
    /// table that cannot be read is logged and replaced by an empty one.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let book = match &config.book_path {
            Some(path) => OpeningBook::load(path).unwrap_or_else(|e| {
                warn!(error = %e, "opening table unavailable, searching every move");
                OpeningBook::new()
            }),
            None => OpeningBook::new(),
        };
        Ok(Self::new(config, Arc::new(book)))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn book(&self) -> &Arc<OpeningBook> {
        &self.book
    }

    /// A fresh search context sized by the config.
    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.config.eval_cache_capacity)
    }

    /// Deepening limits for a request starting at `depth`.
    pub fn limits(&self, depth: u8) -> SearchLimits {
        SearchLimits::with_min_time(depth, self.config.min_search_time(), self.config.max_depth)
    }

    /// Best move and value for `pos`, starting the search at `depth`.
    pub fn get_value_and_best_move(&self, pos: &Position, depth: u8) -> SearchResult {
        self.search_with(pos, self.limits(depth), &mut rand::thread_rng())
    }

    pub fn analyze_fen(&self, fen: &str, depth: u8) -> EngineResult<SearchResult> {
        let pos = Position::from_fen(fen).map_err(ChessError::from)?;
        Ok(self.get_value_and_best_move(&pos, depth))
    }

    /// Consult the opening table with `rng`, otherwise search within `limits`.
    pub fn search_with<R: Rng + ?Sized>(
        &self,
        pos: &Position,
        limits: SearchLimits,
        rng: &mut R,
    ) -> SearchResult {
        if let Some((mv, value)) = self.book.pick(pos, self.config.book_probability, rng) {
            info!(mv = %mv, value, "opening table move");
            return SearchResult {
                best_move: Some(mv),
                score: value,
                depth: 0,
                nodes: 0,
                from_book: true,
            };
        }
        self.search(pos, limits)
    }

    /// Iterative deepening without the opening table.
    ///
    /// Each round is a complete search at one depth; deepening stops once
    /// `limits.min_time` has passed, at `limits.max_depth`, or when there is
    /// no move to improve.
    pub fn search(&self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let started = Instant::now();
        let mut searcher = self.searcher();
        let mut depth = limits.depth;
        loop {
            let (score, best_move) = searcher.minimax(pos, depth, -INFINITY, INFINITY);
            debug!(
                depth,
                score,
                nodes = searcher.nodes(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "search round complete"
            );
            if best_move.is_none() || !limits.should_deepen(started, depth) {
                info!(
                    best = ?best_move.map(|m| m.to_string()),
                    score,
                    depth,
                    nodes = searcher.nodes(),
                    "search finished"
                );
                return SearchResult {
                    best_move,
                    score,
                    depth,
                    nodes: searcher.nodes(),
                    from_book: false,
                };
            }
            depth += 1;
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
