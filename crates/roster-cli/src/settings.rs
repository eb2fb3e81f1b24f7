//! Settings persistence.
//!
//! Settings live in `settings.toml` in the platform config folder:
//! - macOS: ~/Library/Application Support/org.roster.Roster/
//! - Windows: %APPDATA%/roster/Roster/config/
//! - Linux: ~/.config/roster/
//!
//! `--config PATH` points at a different file. Missing or malformed files
//! fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use roster_core::{ChartOptions, DashboardOptions};
use roster_ingest::{DataSource, FetchOptions};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "roster";
const APP_NAME: &str = "Roster";
const CONFIG_FILENAME: &str = "settings.toml";

/// File picked up by the startup auto-load.
pub const DEFAULT_SOURCE: &str = "Student India 64913.xlsx";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub display: DisplaySettings,
    pub charts: ChartSettings,
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// File path or `http(s)` URL loaded when no file is given.
    pub default_source: String,
    /// Directory relative paths are resolved against (defaults to the
    /// working directory).
    pub base_dir: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            default_source: DEFAULT_SOURCE.to_string(),
            base_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub page_length: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_length: roster_core::DEFAULT_PAGE_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub top_n: usize,
    pub gender_top_n: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let options = ChartOptions::default();
        Self {
            top_n: options.top_n,
            gender_top_n: options.gender_top_n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: roster_ingest::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            page_length: self.display.page_length.max(1),
            charts: ChartOptions {
                top_n: self.charts.top_n,
                gender_top_n: self.charts.gender_top_n,
            },
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.fetch.timeout_secs),
        }
    }

    /// The configured auto-load source.
    pub fn default_source(&self) -> DataSource {
        DataSource::parse(&self.data.default_source, self.data.base_dir.as_deref())
    }
}

/// Path of the platform settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads settings from `explicit` or the platform file, falling back to
/// defaults.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = settings_path() else {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            };
            path
        }
    };
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file found, using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Writes settings, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Saved settings");
    Ok(())
}
