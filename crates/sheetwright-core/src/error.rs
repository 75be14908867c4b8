//! Error types for sheetwright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding addresses
///
/// These are produced locally, before any document engine call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed A1-style address text
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

impl Error {
    /// Create an [`Error::InvalidAddress`] with a message
    pub fn invalid_address<S: Into<String>>(msg: S) -> Self {
        Error::InvalidAddress(msg.into())
    }
}
