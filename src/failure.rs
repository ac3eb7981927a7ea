use std::fmt;

use crate::error::ScanError;

/// Describes one document or sheet that had to be skipped during a scan.
///
/// Failures are accumulated as a side log instead of being raised: a bad
/// sheet never aborts the run, and its records are withheld entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    /// The whole document could not be read.
    Document {
        /// File name of the document.
        document: String,
        /// Human-readable failure description.
        detail: String,
    },
    /// A single sheet could not be accessed; the rest of the document
    /// continued processing.
    Sheet {
        /// File name of the document.
        document: String,
        /// Name of the sheet as it appears in the document.
        sheet: String,
        /// Human-readable failure description.
        detail: String,
    },
}

impl ScanFailure {
    /// Builds a document-level failure from the error that caused it.
    pub fn document(document: impl Into<String>, error: &ScanError) -> Self {
        ScanFailure::Document {
            document: document.into(),
            detail: error.to_string(),
        }
    }

    /// Builds a sheet-level failure from the error that caused it.
    pub fn sheet(document: impl Into<String>, sheet: impl Into<String>, error: &ScanError) -> Self {
        ScanFailure::Sheet {
            document: document.into(),
            sheet: sheet.into(),
            detail: error.to_string(),
        }
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanFailure::Document { document, detail } => {
                write!(f, "failed to read document '{document}': {detail}")
            }
            ScanFailure::Sheet {
                document,
                sheet,
                detail,
            } => {
                write!(
                    f,
                    "failed to access sheet '{sheet}' in document '{document}': {detail}"
                )
            }
        }
    }
}

/// Destination for scan failures.
///
/// The sink is injected into extraction so tests can capture the error log
/// without touching the filesystem.
pub trait FailureSink {
    /// Records one skipped document or sheet.
    fn record(&mut self, failure: &ScanFailure);
}

/// Sink that keeps failures in memory, mainly for tests and the JSON report.
#[derive(Debug, Default)]
pub struct MemoryFailureSink {
    /// Recorded failures in arrival order.
    pub failures: Vec<ScanFailure>,
}

impl FailureSink for MemoryFailureSink {
    fn record(&mut self, failure: &ScanFailure) {
        self.failures.push(failure.clone());
    }
}
