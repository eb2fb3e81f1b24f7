//! Source locations and format detection.

use std::fmt;
use std::path::{Path, PathBuf};

/// Parser family for a source, chosen from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// Binary spreadsheet workbook (first sheet is read).
    Spreadsheet,
}

impl SourceFormat {
    /// `.csv` (any case) is delimited text; every other name is a workbook.
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".csv") {
            Self::Csv
        } else {
            Self::Spreadsheet
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interprets a configured location.
    ///
    /// `http://` and `https://` locations are URLs; anything else is a path,
    /// resolved against `base_dir` when relative.
    pub fn parse(location: &str, base_dir: Option<&Path>) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Self::Url(trimmed.to_string());
        }
        let path = PathBuf::from(trimmed);
        match base_dir {
            Some(base) if path.is_relative() => Self::Path(base.join(path)),
            _ => Self::Path(path),
        }
    }

    /// File name used for format detection.
    pub fn file_name(&self) -> String {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Url(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or(url);
                without_query
                    .rsplit('/')
                    .next()
                    .unwrap_or(without_query)
                    .to_string()
            }
        }
    }

    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_name(&self.file_name())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_name() {
        assert_eq!(SourceFormat::from_name("students.csv"), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_name("STUDENTS.CSV"), SourceFormat::Csv);
        assert_eq!(
            SourceFormat::from_name("Student India 64913.xlsx"),
            SourceFormat::Spreadsheet
        );
        assert_eq!(SourceFormat::from_name("students"), SourceFormat::Spreadsheet);
    }

    #[test]
    fn test_parse_url_source() {
        let source = DataSource::parse("https://example.org/data/students.csv?v=2", None);
        assert_eq!(
            source,
            DataSource::Url("https://example.org/data/students.csv?v=2".to_string())
        );
        assert_eq!(source.file_name(), "students.csv");
        assert_eq!(source.format(), SourceFormat::Csv);
    }

    #[test]
    fn test_parse_relative_path_uses_base_dir() {
        let source = DataSource::parse("students.xlsx", Some(Path::new("/srv/roster")));
        assert_eq!(
            source,
            DataSource::Path(PathBuf::from("/srv/roster/students.xlsx"))
        );
        assert_eq!(source.format(), SourceFormat::Spreadsheet);
    }

    #[test]
    fn test_parse_absolute_path_ignores_base_dir() {
        let source = DataSource::parse("/tmp/a.csv", Some(Path::new("/srv/roster")));
        assert_eq!(source, DataSource::Path(PathBuf::from("/tmp/a.csv")));
    }
}
