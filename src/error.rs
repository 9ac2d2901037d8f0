//! Crate error type.

use thiserror::Error;

/// Errors raised at the ingestion and configuration boundaries.
///
/// Scoring itself is total and never produces one of these.
#[derive(Debug, Error)]
pub enum QsoMatchError {
    /// Band string did not name a known band.
    #[error("illegal QSO band: {0:?}")]
    InvalidBand(String),
    /// Mode string did not name a known mode.
    #[error("illegal QSO mode: {0:?}")]
    InvalidMode(String),
    /// Argument is well typed but semantically unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration text was not valid JSON for [`crate::config::MatchConfig`].
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, QsoMatchError>;
