//! Error types for costsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in costsheet-core
#[derive(Debug, Error)]
pub enum Error {
    /// A grid operation named a sheet the workbook does not have
    #[error("Worksheet {0} does not exist")]
    SheetNotFound(usize),

    /// A role-specific repairer was invoked for a header outside its roles
    #[error("Header '{0}' does not map to an enumerated role")]
    UnrecognizedHeader(String),

    /// Failure reported by the grid adapter (I/O, backend library)
    #[error("Grid operation failed: {0}")]
    Grid(String),
}

impl Error {
    /// Create a grid-adapter error from any displayable failure
    pub fn grid<E: std::fmt::Display>(err: E) -> Self {
        Error::Grid(err.to_string())
    }
}
