//! Error types for the dropfour crate

use thiserror::Error;

/// Main error type for the dropfour crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of bounds (must be 0-6)")]
    InvalidColumn { column: usize },

    #[error("no legal move available: the board is full")]
    NoLegalMove,

    #[error("episode already finished")]
    GameOver,

    #[error("episode is still in progress")]
    EpisodeInProgress,

    #[error("board height {rows} is unsupported (must be between {min} and {max})")]
    InvalidBoardHeight { rows: usize, min: usize, max: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("shared state lock poisoned while trying to {context}")]
    LockPoisoned { context: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
