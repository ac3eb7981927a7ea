use std::fs;
use std::path::{Path, PathBuf};

use calamine::{DataType, Ods, Reader, open_workbook};

use crate::error::{Result, ScanError};
use crate::failure::{FailureSink, ScanFailure};
use crate::model::{Cell, Document, Sheet};

/// Suffix identifying the spreadsheet documents to scan. The match is
/// case-sensitive, so `.ODS` files are ignored.
pub const SPREADSHEET_EXTENSION: &str = ".ods";

/// Lists the spreadsheet documents directly inside `directory`, sorted by
/// path for a stable processing order. Subdirectories are not traversed.
pub fn discover_documents(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if file_name.ends_with(SPREADSHEET_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads an ODS workbook into the in-memory document model.
///
/// Failing to open or parse the workbook is an error for the whole document.
/// A sheet whose cell range cannot be produced is skipped instead: the
/// failure is recorded on the sink and the remaining sheets still load.
pub fn read_document(path: &Path, sink: &mut dyn FailureSink) -> Result<Document> {
    let mut workbook: Ods<_> = open_workbook(path)?;
    let name = document_name(path);

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let Some(range_result) = workbook.worksheet_range(&sheet_name) else {
            let error = ScanError::SheetAccess(format!("missing sheet '{sheet_name}'"));
            sink.record(&ScanFailure::sheet(&name, &sheet_name, &error));
            continue;
        };
        match range_result {
            Ok(range) => sheets.push(Sheet::new(sheet_name, grid_from_range(&range))),
            Err(error) => {
                sink.record(&ScanFailure::sheet(&name, &sheet_name, &error.into()));
            }
        }
    }

    Ok(Document::new(name, sheets))
}

/// File name used to identify a document in records and failure logs.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Re-pads a calamine range into a rectangular grid in absolute sheet
/// coordinates. Calamine ranges start at the first populated cell, while the
/// extraction logic addresses cells relative to A1.
fn grid_from_range(range: &calamine::Range<DataType>) -> Vec<Vec<Cell>> {
    let Some((row_offset, col_offset)) = range.start() else {
        return Vec::new();
    };
    let row_offset = row_offset as usize;
    let col_offset = col_offset as usize;
    let width = col_offset + range.width();

    let mut grid = Vec::with_capacity(row_offset + range.height());
    for _ in 0..row_offset {
        grid.push(vec![Cell::empty(); width]);
    }
    for row in range.rows() {
        let mut cells = vec![Cell::empty(); col_offset];
        cells.extend(row.iter().map(cell_from_data));
        grid.push(cells);
    }
    grid
}

fn cell_from_data(value: &DataType) -> Cell {
    match value {
        DataType::String(text) => Cell::text(text.clone()),
        DataType::Empty => Cell::empty(),
        DataType::Error(_) => Cell::Error(value.to_string()),
        other => Cell::text(other.to_string()),
    }
}
