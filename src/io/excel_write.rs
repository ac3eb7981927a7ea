use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::Record;

/// Name of the single worksheet in the export workbook.
pub const EXPORT_SHEET: &str = "Dados";

/// Column headers of the export table, in fixed order.
pub const EXPORT_COLUMNS: [&str; 4] = ["Equipe", "Colaborador", "Função Principal", "Tecnologia"];

/// Writes the flat record table to the given path, overwriting any previous
/// export at the same location.
pub fn write_export(path: &Path, records: &[Record]) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET)?;

    for (col_idx, header) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        worksheet.write_string(row, 0, &record.team)?;
        worksheet.write_string(row, 1, &record.collaborator)?;
        worksheet.write_string(row, 2, &record.role)?;
        worksheet.write_string(row, 3, &record.technology)?;
    }

    let mut table = rust_xlsxwriter::Table::new();
    table.set_autofilter(true);
    let col_end = (EXPORT_COLUMNS.len() as u16).saturating_sub(1);
    let row_end = if records.is_empty() {
        0
    } else {
        records.len() as u32
    };
    worksheet.add_table(0, 0, row_end, col_end, &table)?;

    workbook.save(path)?;
    Ok(())
}
