//! Error types for typeghost.

use thiserror::Error;

/// Errors raised by storage backends and process setup.
///
/// The typing session itself never surfaces these: storage failures degrade to
/// "no ghost replay" and are only logged.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while touching config, database or log files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Replay database failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

/// Result alias used across typeghost.
pub type Result<T> = std::result::Result<T, Error>;
