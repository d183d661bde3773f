//! Error types for position parsing and move validation.

use thiserror::Error;

/// Failures in the board field of a FEN string. The other fields never fail:
/// they fall back to defaults instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN string is empty")]
    Empty,

    #[error("FEN board has {0} ranks, expected 8")]
    RankCount(usize),

    #[error("invalid piece character '{ch}' in FEN rank {rank}")]
    InvalidPiece { ch: char, rank: usize },

    #[error("FEN rank {rank} describes {files} files, expected 8")]
    FileCount { rank: usize, files: usize },
}

/// Errors from validating and applying moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("no piece on {square}")]
    EmptySquare { square: String },

    #[error("piece on {square} does not belong to the side to move")]
    WrongSide { square: String },

    #[error("illegal move {mv}")]
    IllegalMove { mv: String },

    #[error("cannot parse move notation '{0}'")]
    InvalidNotation(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}

pub type ChessResult<T> = Result<T, ChessError>;
