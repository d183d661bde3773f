//! Minimax Chess Engine
//!
//! Alpha-beta search over cloned positions with a piece-square-table
//! evaluator, a weighted opening table and a background analyzer.
//!
//! - [`Engine`]: foreground best-move requests with iterative deepening
//! - [`AnalysisSession`]: one cancellable analyzer per live position
//! - [`OpeningBook`]: truncated-FEN value table, built by the search itself

pub mod analysis;
pub mod book;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;

pub use analysis::{AnalysisReport, AnalysisSession, AnalyzerStatus};
pub use book::OpeningBook;
pub use config::EngineConfig;
pub use engine::{Engine, SearchResult};
pub use error::{EngineError, EngineResult};
pub use eval::{EvalCache, MATE_SCORE, evaluate, piece_value};
pub use search::{INFINITY, Searcher, minimax};
