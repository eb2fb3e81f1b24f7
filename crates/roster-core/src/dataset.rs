//! The loaded record collection.

use roster_model::{RawRecord, StudentRecord};
use tracing::debug;

use crate::normalize::normalize_rows;

/// Normalized records from one load, replaced wholesale by the next load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<StudentRecord>,
    source: Option<String>,
}

impl Dataset {
    pub fn new(records: Vec<StudentRecord>, source: Option<String>) -> Self {
        Self { records, source }
    }

    /// Normalizes raw rows; rows without a name are dropped.
    pub fn from_raw(rows: &[RawRecord], source: impl Into<String>) -> Self {
        let source = source.into();
        let records = normalize_rows(rows);
        debug!(
            source = %source,
            raw_rows = rows.len(),
            records = records.len(),
            "normalized dataset"
        );
        Self::new(records, Some(source))
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Where the records came from, if known.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
