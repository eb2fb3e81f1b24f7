//! Spreadsheet (`.xlsx`) reading: first worksheet as header-keyed records.
//!
//! A workbook is a zip archive of XML parts. Only what the dashboard needs
//! is read: the workbook sheet list, its relationships, the shared string
//! table, and the first worksheet's cell values. Styles are ignored, so
//! date cells come back as their numeric serials.

mod archive;
mod shared_strings;
mod sheet;
mod xml;

use roster_model::RawRecord;
use tracing::debug;

use crate::error::Result;
use crate::header::{BLANK_HEADER, unique_headers};

use archive::{SHARED_STRINGS_PART, WorkbookArchive};
use shared_strings::parse_shared_strings;
use sheet::{SheetRow, parse_sheet};

/// Reads the first worksheet of an `.xlsx` workbook held in memory.
///
/// The first non-blank row supplies the headers; blank header cells are
/// named `__EMPTY`, `__EMPTY_1`, and so on. Each following non-blank row
/// becomes one record holding only its non-blank cells.
pub fn read_xlsx_bytes(bytes: &[u8], name: &str) -> Result<Vec<RawRecord>> {
    let mut workbook = WorkbookArchive::open(bytes, name)?;
    let sheet_part = workbook.first_sheet_part()?;
    let shared = match workbook.read_part(SHARED_STRINGS_PART)? {
        Some(xml) => parse_shared_strings(&xml, name)?,
        None => Vec::new(),
    };
    let sheet_xml = workbook.require_part(&sheet_part)?;
    let rows = parse_sheet(&sheet_xml, &shared, name, &sheet_part)?;
    debug!(
        source = %name,
        sheet = %sheet_part,
        shared_strings = shared.len(),
        rows = rows.len(),
        "parsed worksheet"
    );
    Ok(rows_to_records(rows))
}

fn rows_to_records(rows: Vec<SheetRow>) -> Vec<RawRecord> {
    let columns = rows.iter().flat_map(|row| row.cells.iter().map(|(col, _)| *col));
    let (Some(first_col), Some(last_col)) = (columns.clone().min(), columns.max()) else {
        return Vec::new();
    };

    let mut rows = rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let mut header_text = vec![String::new(); last_col - first_col + 1];
    for (col, value) in &header_row.cells {
        header_text[col - first_col] = value.to_trimmed_string();
    }
    let headers = unique_headers(&header_text, Some(BLANK_HEADER));

    rows.map(|row| {
        let fields = row
            .cells
            .into_iter()
            .map(|(col, value)| (headers[col - first_col].clone(), value))
            .collect();
        RawRecord::from_unique_pairs(fields)
    })
    .collect()
}
