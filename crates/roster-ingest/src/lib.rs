//! Student roster ingestion.
//!
//! Turns a CSV file or an `.xlsx` workbook into loosely-typed
//! [`RawRecord`](roster_model::RawRecord)s. Normalization into student
//! records happens downstream in `roster-core`.
//!
//! # Features
//!
//! - **Format detection**: `.csv` (any case) is delimited text, anything else a workbook
//! - **CSV**: header row, lenient decoding, dynamic typing of numbers and booleans
//! - **XLSX**: first worksheet, shared/inline strings, numeric date serials kept raw
//! - **Auto-load**: a configured file or URL, with failures absorbed
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use roster_ingest::{DataSource, FetchOptions, auto_load, load_file};
//!
//! let loaded = load_file(Path::new("students.csv"))?;
//! println!("{} rows from {}", loaded.records.len(), loaded.source);
//!
//! let source = DataSource::parse("Student India 64913.xlsx", None);
//! if let Some(loaded) = auto_load(&source, &FetchOptions::default()) {
//!     println!("auto-loaded {} rows", loaded.records.len());
//! }
//! ```

mod csv;
mod error;
mod fetch;
mod header;
mod loader;
mod source;
mod xlsx;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use crate::csv::{infer_value, read_csv_bytes, read_csv_records};
pub use xlsx::read_xlsx_bytes;

// === Sources ===
pub use fetch::{DEFAULT_TIMEOUT, FetchOptions, fetch_bytes};
pub use source::{DataSource, SourceFormat};

// === Loading ===
pub use loader::{LoadedRecords, auto_load, load_bytes, load_file, load_source};
