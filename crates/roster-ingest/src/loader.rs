//! Dataset loading entry points.

use std::path::Path;
use std::time::Instant;

use roster_model::RawRecord;
use tracing::{debug, info};

use crate::csv::read_csv_bytes;
use crate::error::Result;
use crate::fetch::{FetchOptions, fetch_bytes, read_file};
use crate::source::{DataSource, SourceFormat};
use crate::xlsx::read_xlsx_bytes;

/// Raw rows read from one source.
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    /// Display name of the source (file name or URL).
    pub source: String,
    pub format: SourceFormat,
    pub records: Vec<RawRecord>,
}

/// Parses in-memory content; the format is chosen from `name`.
pub fn load_bytes(name: &str, bytes: &[u8]) -> Result<LoadedRecords> {
    let format = SourceFormat::from_name(name);
    let start = Instant::now();
    let records = match format {
        SourceFormat::Csv => read_csv_bytes(bytes, name)?,
        SourceFormat::Spreadsheet => read_xlsx_bytes(bytes, name)?,
    };
    info!(
        source = %name,
        format = %format,
        rows = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "loaded rows"
    );
    Ok(LoadedRecords {
        source: name.to_string(),
        format,
        records,
    })
}

/// Loads a user-selected file.
pub fn load_file(path: &Path) -> Result<LoadedRecords> {
    let bytes = read_file(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut loaded = load_bytes(&name, &bytes)?;
    loaded.source = path.display().to_string();
    Ok(loaded)
}

/// Loads a file or URL source.
pub fn load_source(source: &DataSource, options: &FetchOptions) -> Result<LoadedRecords> {
    let bytes = fetch_bytes(source, options)?;
    let mut loaded = load_bytes(&source.file_name(), &bytes)?;
    loaded.source = source.to_string();
    Ok(loaded)
}

/// Startup load of the configured default source.
///
/// Every failure is absorbed: the dashboard falls back to manual file
/// selection and only an informational note is logged.
pub fn auto_load(source: &DataSource, options: &FetchOptions) -> Option<LoadedRecords> {
    match load_source(source, options) {
        Ok(loaded) => Some(loaded),
        Err(error) => {
            debug!(source = %source, error = %error, "auto-load failed");
            info!("auto-load skipped; use the file picker");
            None
        }
    }
}
