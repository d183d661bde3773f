//! Chess rules: position representation, FEN, move generation, legality and
//! game classification. Evaluation and search live in the engine crates.

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use board::*;
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;
