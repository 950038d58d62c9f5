// Excel workbook import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: each named worksheet becomes a Table, header row first.
// Export: one worksheet per Table, header row + values, no index column.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook};
use varsift_recon::{CellValue, ReconConfig, Table};

use crate::error::WorkbookError;

/// xlsx row limit, header row included.
const MAX_ROWS: usize = 1_048_576;
/// xlsx column limit.
const MAX_COLS: usize = 16_384;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// The two sheets a reconcile run works on.
#[derive(Debug)]
pub struct LoadedWorkbook {
    /// Every worksheet name in workbook order.
    pub sheet_names: Vec<String>,
    pub legacy: Table,
    pub genomic: Table,
}

/// Open `config.input` and read the legacy and genomic sheets.
///
/// Both sheets must carry `config.key_column` in their header row.
pub fn load(config: &ReconConfig) -> Result<LoadedWorkbook, WorkbookError> {
    let path = config.input.as_path();
    if !path.exists() {
        return Err(WorkbookError::NotFound(path.to_path_buf()));
    }

    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| WorkbookError::Open(e.to_string()))?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    log::info!("opened {} ({} sheets: {:?})", path.display(), sheet_names.len(), sheet_names);

    let legacy = import_table(&mut workbook, &sheet_names, &config.sheets.legacy, config.header_row)?;
    let genomic = import_table(&mut workbook, &sheet_names, &config.sheets.genomic, config.header_row)?;

    for table in [&legacy, &genomic] {
        if table.column_index(&config.key_column).is_none() {
            return Err(WorkbookError::MissingColumn {
                sheet: table.name.clone(),
                column: config.key_column.clone(),
            });
        }
    }

    Ok(LoadedWorkbook { sheet_names, legacy, genomic })
}

/// Read one worksheet by exact name.
pub fn import_table<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_names: &[String],
    sheet: &str,
    header_row: usize,
) -> Result<Table, WorkbookError> {
    if !sheet_names.iter().any(|s| s == sheet) {
        return Err(WorkbookError::MissingSheet {
            sheet: sheet.to_string(),
            available: sheet_names.to_vec(),
        });
    }

    let start_time = Instant::now();
    let range = workbook.worksheet_range(sheet).map_err(|e| WorkbookError::Read {
        sheet: sheet.to_string(),
        message: e.to_string(),
    })?;

    let table = table_from_range(sheet, &range, header_row);
    log::info!(
        "sheet '{}': {} columns, {} rows ({} ms)",
        sheet,
        table.columns.len(),
        table.len(),
        start_time.elapsed().as_millis()
    );
    Ok(table)
}

/// Build a table from a worksheet range.
///
/// The range may not begin at A1; leading columns are kept as empty cells
/// so headers line up with sheet columns. Fully empty data rows are skipped.
fn table_from_range(name: &str, range: &Range<Data>, header_row: usize) -> Table {
    let (_, start_col) = range.start().unwrap_or((0, 0));
    let lead = start_col as usize;

    let to_cells = |row: &[Data]| -> Vec<CellValue> {
        std::iter::repeat(CellValue::Empty)
            .take(lead)
            .chain(row.iter().map(cell_from_data))
            .collect()
    };

    let mut rows = range.rows().skip(header_row);
    let Some(header) = rows.next() else {
        return Table::new(name, Vec::new());
    };

    let mut table = Table::new(name, header_names(&to_cells(header)));
    for row in rows {
        let cells = to_cells(row);
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

/// Convert a calamine cell to a typed value.
fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::number(*n),
        Data::Int(n) => CellValue::number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // calamine doesn't expose the 1904 flag; assume the 1900 system
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64().into()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// Header cell text, with blanks named `Unnamed: <col>` and repeats
/// suffixed `.1`, `.2`, ... until the name is unused.
fn header_names(cells: &[CellValue]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let mut name = match cell {
                CellValue::Empty => format!("Unnamed: {col}"),
                other => other.to_string(),
            };
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{name}.{count}");
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), 1);
            name
        })
        .collect()
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Default)]
pub struct ExportResult {
    pub sheets_exported: usize,
    pub rows_exported: usize,
    pub cells_exported: usize,
    pub export_duration_ms: u128,
}

/// Write `tables` to a new xlsx file, one worksheet each, in order.
/// Overwrites an existing file at `path`.
pub fn export(tables: &[&Table], path: &Path) -> Result<ExportResult, WorkbookError> {
    let start_time = Instant::now();
    let mut result = ExportResult::default();

    let mut xlsx_workbook = XlsxWorkbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    for table in tables {
        if table.len() + 1 > MAX_ROWS {
            return Err(WorkbookError::Write(format!(
                "sheet '{}' has {} rows, xlsx allows {}",
                table.name,
                table.len(),
                MAX_ROWS - 1
            )));
        }
        if table.columns.len() > MAX_COLS {
            return Err(WorkbookError::Write(format!(
                "sheet '{}' has {} columns, xlsx allows {MAX_COLS}",
                table.name,
                table.columns.len()
            )));
        }

        let worksheet = xlsx_workbook
            .add_worksheet()
            .set_name(&table.name)
            .map_err(|e| WorkbookError::Write(format!("Failed to create sheet '{}': {}", table.name, e)))?;

        for (col, name) in table.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, name, &header_format)
                .map_err(|e| WorkbookError::Write(format!("Failed to write header '{}': {}", name, e)))?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row32 = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col16 = col as u16;
                let written = match cell {
                    CellValue::Empty => continue,
                    CellValue::Text(s) => worksheet.write_string(row32, col16, s),
                    // No error-cell writer: the literal is stored as text and
                    // re-reads as Text, not Error.
                    CellValue::Error(s) => worksheet.write_string(row32, col16, s),
                    CellValue::Number(n) => worksheet.write_number(row32, col16, n.0),
                    CellValue::Bool(b) => worksheet.write_boolean(row32, col16, *b),
                    CellValue::DateTime(n) => {
                        worksheet.write_number_with_format(row32, col16, n.0, &datetime_format)
                    }
                };
                written.map_err(|e| {
                    WorkbookError::Write(format!("Failed to write cell ({}, {}): {}", row32, col16, e))
                })?;
                result.cells_exported += 1;
            }
        }

        result.rows_exported += table.len();
        result.sheets_exported += 1;
    }

    xlsx_workbook
        .save(path)
        .map_err(|e| WorkbookError::Write(format!("Failed to save XLSX file: {}", e)))?;

    result.export_duration_ms = start_time.elapsed().as_millis();
    log::info!(
        "wrote {} ({} sheets, {} rows, {} ms)",
        path.display(),
        result.sheets_exported,
        result.rows_exported,
        result.export_duration_ms
    );
    Ok(result)
}
