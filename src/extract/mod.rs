use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::failure::{FailureSink, ScanFailure};
use crate::model::{Document, Record, Sheet};

/// Keyword anchoring the team field.
pub const TEAM_KEYWORD: &str = "equipe";
/// Keyword anchoring the collaborator field.
pub const COLLABORATOR_KEYWORD: &str = "colaborador";
/// Keyword anchoring the primary-role field.
pub const ROLE_KEYWORD: &str = "função principal";

/// Placeholder text excluded from the technology list.
pub const PLACEHOLDER: &str = "selecione";
/// Sentinel substituted when an anchored lookup fails.
pub const NOT_AVAILABLE: &str = "N/A";
/// Sentinel technology emitted for sheets without any technology entry.
pub const EMPTY_MARKER: &str = "Empty";

/// Column holding the technology entries (column B).
const TECHNOLOGY_COLUMN: usize = 1;
/// First row of the technology range (cell B11).
const TECHNOLOGY_FIRST_ROW: usize = 10;
/// Last row of the technology range (cell B20).
const TECHNOLOGY_LAST_ROW: usize = 19;

/// Extracts the collaborator records of every sheet in the document.
///
/// Sheets whose names collide after trimming and lowercasing collapse into a
/// single entry (the last one wins) and the remaining sheets are processed in
/// normalized-name order. A sheet that fails mid-access contributes no
/// records at all; the failure is recorded on the sink together with the
/// document and sheet names, and extraction moves on to the next sheet.
pub fn extract(document: &Document, sink: &mut dyn FailureSink) -> Vec<Record> {
    let mut index: BTreeMap<String, &Sheet> = BTreeMap::new();
    for sheet in &document.sheets {
        index.insert(sheet.name().trim().to_lowercase(), sheet);
    }

    let mut records = Vec::new();
    for sheet in index.values() {
        match extract_sheet(sheet) {
            Ok(sheet_records) => records.extend(sheet_records),
            Err(error) => {
                debug!(
                    document = %document.name,
                    sheet = sheet.name(),
                    %error,
                    "skipping sheet"
                );
                sink.record(&ScanFailure::sheet(&document.name, sheet.name(), &error));
            }
        }
    }
    records
}

fn extract_sheet(sheet: &Sheet) -> Result<Vec<Record>> {
    let team = field_or_default(sheet, TEAM_KEYWORD)?;
    let collaborator = field_or_default(sheet, COLLABORATOR_KEYWORD)?;
    let role = field_or_default(sheet, ROLE_KEYWORD)?;

    let technologies = technology_range(sheet)?;
    if technologies.is_empty() {
        return Ok(vec![Record::new(team, collaborator, role, EMPTY_MARKER)]);
    }

    Ok(technologies
        .into_iter()
        .map(|technology| Record::new(&team, &collaborator, &role, technology))
        .collect())
}

fn field_or_default(sheet: &Sheet, keyword: &str) -> Result<String> {
    let value = anchored_lookup(sheet, keyword)?;
    Ok(value
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

/// Scans the grid in row-major order for the first cell whose trimmed
/// lowercased text contains `keyword`, and returns the trimmed text of its
/// right neighbor. Yields `None` when no cell matches or the matching cell
/// has no right neighbor.
fn anchored_lookup(sheet: &Sheet, keyword: &str) -> Result<Option<String>> {
    for (row_idx, row) in sheet.rows().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let text = cell.as_text()?;
            if text.trim().to_lowercase().contains(keyword) {
                return match sheet.get(row_idx, col_idx + 1) {
                    Some(neighbor) => Ok(Some(neighbor.as_text()?.trim().to_string())),
                    None => Ok(None),
                };
            }
        }
    }
    Ok(None)
}

/// Reads the ten technology candidate cells, keeping non-blank values that
/// are not the placeholder. The comparison is full-string equality after
/// lowercasing, so entries merely containing the placeholder text survive.
fn technology_range(sheet: &Sheet) -> Result<Vec<String>> {
    let mut technologies = Vec::new();
    for row in TECHNOLOGY_FIRST_ROW..=TECHNOLOGY_LAST_ROW {
        let text = sheet.cell(row, TECHNOLOGY_COLUMN)?.as_text()?.trim();
        if !text.is_empty() && text.to_lowercase() != PLACEHOLDER {
            technologies.push(text.to_string());
        }
    }
    Ok(technologies)
}
