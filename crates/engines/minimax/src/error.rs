use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("invalid opening table: {0}")]
    Book(#[from] serde_json::Error),

    #[error(transparent)]
    Chess(#[from] chess_core::ChessError),
}

pub type EngineResult<T> = Result<T, EngineError>;
