//! Header-keyed CSV reading into loosely-typed records.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};
use roster_model::{RawRecord, RawValue};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::unique_headers;

use super::value::infer_value;

/// Reads CSV data with a header row from any reader.
///
/// Bytes are decoded leniently (invalid UTF-8 becomes U+FFFD). Rows may be
/// shorter or longer than the header: missing trailing fields are `Empty`
/// and extra fields are dropped. Lines where every field is blank are
/// skipped.
pub fn read_csv_records<R: Read>(reader: R, name: &str) -> Result<Vec<RawRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_record = csv_reader
        .byte_headers()
        .map_err(|source| IngestError::CsvParse {
            name: name.to_string(),
            source,
        })?
        .clone();
    let headers = unique_headers(header_record.iter().map(decode_field), None);

    let mut records = Vec::new();
    let mut row = ByteRecord::new();
    let mut extra_fields = 0usize;

    loop {
        let has_row = csv_reader
            .read_byte_record(&mut row)
            .map_err(|source| IngestError::CsvParse {
                name: name.to_string(),
                source,
            })?;
        if !has_row {
            break;
        }
        if row.iter().all(|field| decode_field(field).trim().is_empty()) {
            continue;
        }
        if row.len() > headers.len() {
            extra_fields += row.len() - headers.len();
        }

        let fields = headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let value = row
                    .get(index)
                    .map(|field| infer_value(&decode_field(field)))
                    .unwrap_or(RawValue::Empty);
                (header.clone(), value)
            })
            .collect();
        records.push(RawRecord::from_unique_pairs(fields));
    }

    if extra_fields > 0 {
        debug!(source = %name, extra_fields, "dropped fields beyond the header row");
    }
    debug!(source = %name, columns = headers.len(), rows = records.len(), "parsed CSV");
    Ok(records)
}

/// Reads CSV data held in memory.
pub fn read_csv_bytes(bytes: &[u8], name: &str) -> Result<Vec<RawRecord>> {
    read_csv_records(bytes, name)
}

fn decode_field(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
