use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Error type covering the different failure cases that can occur when the
/// tool discovers, extracts, or exports collaborator data.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Wrapper for IO failures such as enumerating the scan directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the ODS reader implementation.
    #[error("spreadsheet read error: {0}")]
    OdsRead(#[from] calamine::OdsError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when JSON serialization of the scan report fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a cell access falls outside a sheet's grid or hits a
    /// malformed value. Recovered per sheet, never fatal to a run.
    #[error("sheet access error: {0}")]
    SheetAccess(String),

    /// Raised when a distinct collaborator name yields no first-name token
    /// while building the team summary.
    #[error("collaborator name in team '{team}' has no first-name token")]
    MalformedName { team: String },

    /// Raised when the user provides a scan directory that does not exist.
    #[error("scan directory not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),

    /// Raised when the background scan worker terminates abnormally.
    #[error("background scan task failed: {0}")]
    Worker(String),
}
