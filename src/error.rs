//! Error types for the safeefah guide

use thiserror::Error;

/// Result type alias for guide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the responder itself
///
/// Answering a question never fails; these cover loading tables
/// and profiles, and session I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Answer table could not be loaded or is malformed
    #[error("answer table error: {0}")]
    Table(String),

    /// User profile could not be parsed
    #[error("profile error: {0}")]
    Profile(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
