use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ScanError};
use crate::extract;
use crate::failure::{FailureSink, ScanFailure};
use crate::io::{excel_write, ods_read};
use crate::model::Record;
use crate::summary::{self, TeamSummary};

/// Default name of the export workbook, written to the working directory.
pub const EXPORT_FILE: &str = "dados_coletados.xlsx";

/// Configuration of one scan run.
///
/// The scan directory travels explicitly through this object; the pipeline
/// has no knowledge of whatever host (CLI, GUI, test) supplied it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory whose `.ods` documents are scanned. Not traversed
    /// recursively.
    pub directory: PathBuf,
    /// Destination of the export workbook.
    pub export_path: PathBuf,
}

impl RunConfig {
    /// Creates a configuration scanning `directory` and exporting to the
    /// default location.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            export_path: PathBuf::from(EXPORT_FILE),
        }
    }

    /// Overrides the export destination.
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }
}

/// Outcome of a scan run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Number of documents discovered in the scan directory.
    pub documents: usize,
    /// Flat record table in document and sheet processing order.
    pub records: Vec<Record>,
    /// Per-team headcount summaries, sorted by team name.
    pub teams: Vec<TeamSummary>,
    /// Location of the written export, or `None` when there was nothing to
    /// export.
    pub export_path: Option<PathBuf>,
}

impl ScanReport {
    /// Whether the run produced no records. Distinguishes "ran successfully,
    /// nothing to export" from an actual error.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs the full pipeline: discover documents, extract records, write the
/// export table, and summarize per team.
///
/// Only conditions preventing the run as a whole surface as errors: a missing
/// scan directory, a failed directory enumeration, a failed export write, or
/// a malformed collaborator name during summarization. Unreadable documents
/// and sheets are recorded on the sink and skipped.
#[instrument(level = "info", skip_all, fields(directory = %config.directory.display()))]
pub fn run(config: &RunConfig, sink: &mut dyn FailureSink) -> Result<ScanReport> {
    if !config.directory.is_dir() {
        return Err(ScanError::MissingInput(config.directory.clone()));
    }

    let paths = ods_read::discover_documents(&config.directory)?;
    info!(document_count = paths.len(), "discovered spreadsheet documents");

    let mut records: Vec<Record> = Vec::new();
    for path in &paths {
        match ods_read::read_document(path, sink) {
            Ok(document) => records.extend(extract::extract(&document, sink)),
            Err(error) => {
                warn!(document = %path.display(), %error, "skipping unreadable document");
                sink.record(&ScanFailure::document(ods_read::document_name(path), &error));
            }
        }
    }

    if records.is_empty() {
        info!("no records extracted; skipping export and summary");
        return Ok(ScanReport {
            documents: paths.len(),
            records,
            teams: Vec::new(),
            export_path: None,
        });
    }

    excel_write::write_export(&config.export_path, &records)?;
    debug!(record_count = records.len(), export = %config.export_path.display(), "export table written");

    let teams = summary::summarize(&records)?;
    info!(team_count = teams.len(), "summary computed");

    Ok(ScanReport {
        documents: paths.len(),
        records,
        teams,
        export_path: Some(config.export_path.clone()),
    })
}
