//! Raw byte retrieval for local files and remote URLs.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::source::DataSource;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for retrieving a source.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Reads the full contents of a source.
pub fn fetch_bytes(source: &DataSource, options: &FetchOptions) -> Result<Vec<u8>> {
    match source {
        DataSource::Path(path) => read_file(path),
        DataSource::Url(url) => fetch_url(url, options.timeout),
    }
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let http_error = |e: reqwest::Error| IngestError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };

    let client = Client::builder().timeout(timeout).build().map_err(http_error)?;

    debug!(url = %url, "fetching dataset");
    let response = client
        .get(url)
        .header(
            USER_AGENT,
            format!("roster/{}", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .map_err(http_error)?;

    if !response.status().is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().map_err(http_error)?;
    Ok(bytes.to_vec())
}
