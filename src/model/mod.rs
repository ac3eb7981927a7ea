use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// A single cell of a sheet grid.
///
/// Calamine surfaces formula evaluation failures as error values; those are
/// preserved as [`Cell::Error`] so that extraction can treat touching one as a
/// sheet-access failure instead of silently reading garbage text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Textual cell content. Empty cells carry an empty string.
    Text(String),
    /// Malformed cell carrying the error marker reported by the reader.
    Error(String),
}

impl Cell {
    /// Creates a textual cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Creates an empty textual cell.
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// Returns the cell text, failing on malformed cells.
    pub fn as_text(&self) -> Result<&str> {
        match self {
            Cell::Text(value) => Ok(value),
            Cell::Error(marker) => Err(ScanError::SheetAccess(format!(
                "malformed cell value {marker}"
            ))),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

/// An ordered grid of cells identified by a name.
///
/// Coordinates are absolute: row 0, column 0 corresponds to cell A1 of the
/// source sheet regardless of where its populated region starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Creates a sheet from its name and cell rows.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// The sheet name as it appears in the source document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates the cell rows in grid order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the cell at the given position, or `None` when the position
    /// lies outside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Returns the cell at the given position, failing when the position lies
    /// outside the grid.
    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell> {
        self.get(row, column).ok_or_else(|| {
            ScanError::SheetAccess(format!("cell ({row}, {column}) is outside the sheet grid"))
        })
    }
}

/// A named spreadsheet file containing zero or more sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name of the source document.
    pub name: String,
    /// Sheets in document order.
    pub sheets: Vec<Sheet>,
}

impl Document {
    /// Creates a document from its file name and sheets.
    pub fn new(name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            name: name.into(),
            sheets,
        }
    }
}

/// One extracted (collaborator, technology) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Team the collaborator belongs to.
    pub team: String,
    /// Full collaborator name.
    pub collaborator: String,
    /// Primary role of the collaborator.
    pub role: String,
    /// One technology entry, or the `"Empty"` sentinel.
    pub technology: String,
}

impl Record {
    /// Creates a record from its four fields.
    pub fn new(
        team: impl Into<String>,
        collaborator: impl Into<String>,
        role: impl Into<String>,
        technology: impl Into<String>,
    ) -> Self {
        Self {
            team: team.into(),
            collaborator: collaborator.into(),
            role: role.into(),
            technology: technology.into(),
        }
    }
}
