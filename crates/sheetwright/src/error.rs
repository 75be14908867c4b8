//! Error types for sheetwright

use std::collections::TryReserveError;

use sheetwright_engine::{DocumentEngine, Status};
use thiserror::Error;

/// Main error type for workbook operations
#[derive(Error, Debug)]
pub enum Error {
    /// Address text could not be parsed
    #[error(transparent)]
    InvalidAddress(#[from] sheetwright_core::Error),

    /// The document engine reported a non-success status
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Memory for a marshalling buffer could not be reserved
    #[error("Allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// The engine returned no handle
    #[error("Engine returned a null handle for {operation}")]
    NullHandle { operation: &'static str },

    /// A per-column list is longer than the header list
    #[error("{field} has {found} entries but the table has {expected} columns")]
    ColumnCountMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A failed engine call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (status {code})")]
pub struct WriteError {
    /// Status code returned by the engine
    pub code: Status,
    /// The engine's own description of `code`
    pub message: String,
}

impl WriteError {
    /// Build the error for `code` using the engine's message
    pub fn from_engine<E: DocumentEngine + ?Sized>(engine: &E, code: Status) -> Self {
        Self {
            code,
            message: engine.error_message(code).to_string(),
        }
    }
}

impl Error {
    pub(crate) fn null_handle(operation: &'static str) -> Self {
        Error::NullHandle { operation }
    }
}

/// Result type for workbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Turn an engine status into a result
///
/// Zero passes; anything else becomes a [`WriteError`] carrying the engine's
/// message verbatim.
pub(crate) fn check<E: DocumentEngine + ?Sized>(
    engine: &E,
    status: Status,
    operation: &'static str,
) -> Result<()> {
    if status.is_ok() {
        return Ok(());
    }
    let error = WriteError::from_engine(engine, status);
    tracing::warn!("{} failed: {}", operation, error);
    Err(error.into())
}
