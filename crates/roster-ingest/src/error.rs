//! Error types for roster data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a roster source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The delimited text could not be parsed.
    #[error("failed to parse CSV {name}: {source}")]
    CsvParse {
        name: String,
        #[source]
        source: csv::Error,
    },

    // === Workbook Errors ===
    /// The spreadsheet is not a readable zip archive.
    #[error("failed to open workbook {name}: {message}")]
    WorkbookArchive { name: String, message: String },

    /// A required part is missing from the workbook archive.
    #[error("workbook {name} is missing part {part}")]
    MissingPart { name: String, part: String },

    /// The workbook declares no worksheets.
    #[error("workbook {name} contains no worksheets")]
    NoWorksheet { name: String },

    /// A workbook XML part could not be parsed.
    #[error("failed to parse {part} in workbook {name}: {message}")]
    WorkbookXml {
        name: String,
        part: String,
        message: String,
    },

    // === Network Errors ===
    /// HTTP request failed before a response arrived.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
