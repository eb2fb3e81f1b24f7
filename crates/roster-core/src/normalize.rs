//! Row normalization: loosely-typed rows into fixed-shape student records.

use roster_model::{Column, Dob, RawRecord, StudentRecord};
use tracing::debug;

/// Coerces a raw row into a [`StudentRecord`].
///
/// Never fails: absent, blank, or oddly-typed fields become empty strings
/// (or [`Dob::Absent`]).
pub fn normalize_row(raw: &RawRecord) -> StudentRecord {
    let text = |column: Column| {
        raw.get(column.source_key())
            .map(|value| value.to_trimmed_string())
            .unwrap_or_default()
    };

    StudentRecord {
        name: text(Column::Name),
        gender: text(Column::Gender),
        cat: text(Column::Category),
        board: text(Column::Board),
        medium: text(Column::Medium),
        city: text(Column::City),
        district: text(Column::District),
        state: text(Column::State),
        dob: raw
            .get(Column::Dob.source_key())
            .map(Dob::from_raw)
            .unwrap_or_default(),
    }
}

/// Normalizes every row, dropping records without a name.
pub fn normalize_rows<'a, I>(rows: I) -> Vec<StudentRecord>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut dropped = 0usize;
    let mut records = Vec::new();
    for raw in rows {
        let record = normalize_row(raw);
        if record.name.is_empty() {
            dropped += 1;
        } else {
            records.push(record);
        }
    }
    if dropped > 0 {
        debug!(dropped, kept = records.len(), "dropped rows without a name");
    }
    records
}
