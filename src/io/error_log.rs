use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::failure::{FailureSink, ScanFailure};

/// Default name of the append-only error log.
pub const ERROR_LOG_FILE: &str = "log_erros.txt";

/// Failure sink appending one plain-text line per skipped document or sheet.
///
/// The log file is opened in append mode so failures accumulate across runs.
/// Problems writing the log itself are reported through tracing and never
/// interrupt the scan.
#[derive(Debug)]
pub struct FileFailureSink {
    file: File,
}

impl FileFailureSink {
    /// Opens (or creates) the log file at the given path.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl FailureSink for FileFailureSink {
    fn record(&mut self, failure: &ScanFailure) {
        if let Err(error) = writeln!(self.file, "{failure}") {
            warn!(%error, "failed to append to the error log");
        }
    }
}
