//! Error types for the rules adapter and the search worker boundary

/// Errors that can occur outside the orchestration loop
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Position text could not be parsed
    #[error("Invalid FEN '{fen}': {message}")]
    InvalidFen { fen: String, message: String },

    /// Worker process could not be started
    #[error("Failed to spawn search worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// Reading or writing a worker pipe failed
    #[error("Search worker I/O failed: {0}")]
    WorkerIo(#[from] std::io::Error),

    /// Request or reply was not valid JSON
    #[error("Malformed search message: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type alias for fallible game operations
pub type GameResult<T> = Result<T, GameError>;
