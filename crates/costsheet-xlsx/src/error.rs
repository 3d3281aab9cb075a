//! Error types for costsheet-xlsx

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening a workbook file
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not point at an existing file
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be read as an XLSX workbook
    #[error("Not a valid workbook: {path}: {message}")]
    InvalidFile {
        /// Path of the offending file
        path: PathBuf,
        /// Backend diagnostic
        message: String,
    },
}
