//! First-sheet reader. The header row supplies the keys for every data row.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use profiledb_core::{CellValue, RawRow};

use crate::error::SheetError;

/// Parse an in-memory `.xlsx` payload.
///
/// # Errors
///
/// Returns [`SheetError::Parse`] if the bytes are not a readable workbook and
/// [`SheetError::NoSheets`] if it contains no worksheet.
pub fn read_rows_from_bytes(bytes: &[u8]) -> Result<Vec<RawRow>, SheetError> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    read_first_sheet(workbook)
}

/// Parse an `.xlsx` file on disk.
///
/// # Errors
///
/// Same as [`read_rows_from_bytes`].
pub fn read_rows_from_path(path: &Path) -> Result<Vec<RawRow>, SheetError> {
    let workbook: Xlsx<_> = open_workbook(path)?;
    read_first_sheet(workbook)
}

fn read_first_sheet<RS: Read + Seek>(mut workbook: Xlsx<RS>) -> Result<Vec<RawRow>, SheetError> {
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoSheets)?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let rows = rows_from_range(&range);

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "parsed spreadsheet");
    Ok(rows)
}

fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    // 0-based sheet index of the first used row; the range may not start at A1.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);

    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<Option<String>> = header_cells.iter().map(header_text).collect();

    rows.enumerate()
        .filter_map(|(idx, cells)| {
            // header is at first_row, data starts one below; report 1-based
            let mut row = RawRow::new(first_row + idx + 2);
            for (header, cell) in headers.iter().zip(cells) {
                if let Some(header) = header {
                    row.insert(header.clone(), cell_value(cell));
                }
            }
            (!row.is_blank()).then_some(row)
        })
        .collect()
}

fn header_text(cell: &Data) -> Option<String> {
    let text = cell.to_string();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_xlsxwriter::Workbook;

    pub(crate) enum Cell<'a> {
        Text(&'a str),
        Number(f64),
        Blank,
    }

    /// Build an `.xlsx` payload whose first sheet holds `rows`.
    pub(crate) fn workbook_bytes(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            let r = u32::try_from(r).expect("row index");
            for (c, cell) in row.iter().enumerate() {
                let c = u16::try_from(c).expect("col index");
                match cell {
                    Cell::Text(s) => {
                        sheet.write_string(r, c, *s).expect("write string");
                    }
                    Cell::Number(n) => {
                        sheet.write_number(r, c, *n).expect("write number");
                    }
                    Cell::Blank => {}
                }
            }
        }
        workbook.save_to_buffer().expect("save workbook")
    }
}
