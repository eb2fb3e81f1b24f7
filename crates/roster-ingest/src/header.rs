//! Header row normalization shared by the CSV and workbook readers.

use std::collections::{HashMap, HashSet};

/// Placeholder name given to blank spreadsheet header cells.
pub const BLANK_HEADER: &str = "__EMPTY";

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Makes header names unique.
///
/// Repeated names get a numeric suffix (`name`, `name_1`, `name_2`). When
/// `blank` is given, blank headers are replaced with that placeholder before
/// de-duplication, so several blank cells become `__EMPTY`, `__EMPTY_1`, ...
pub fn unique_headers<I, S>(headers: I, blank: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut used: HashSet<String> = HashSet::new();
    // Next suffix to try per base name, so repeats never rescan from `_1`.
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::new();

    for header in headers {
        let mut base = normalize_header(header.as_ref());
        if base.is_empty()
            && let Some(placeholder) = blank
        {
            base = placeholder.to_string();
        }

        let candidate = if used.contains(&base) {
            let suffix = next_suffix.entry(base.clone()).or_insert(1);
            let mut candidate = format!("{base}_{suffix}");
            while used.contains(&candidate) {
                *suffix += 1;
                candidate = format!("{base}_{suffix}");
            }
            *suffix += 1;
            candidate
        } else {
            base
        };
        used.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}name "), "name");
        assert_eq!(normalize_header("  city"), "city");
    }

    #[test]
    fn test_unique_headers_suffixes_duplicates() {
        let headers = unique_headers(["name", "city", "name", "name"], None);
        assert_eq!(headers, vec!["name", "city", "name_1", "name_2"]);
    }

    #[test]
    fn test_unique_headers_blank_placeholder() {
        let headers = unique_headers(["name", "", " "], Some(BLANK_HEADER));
        assert_eq!(headers, vec!["name", "__EMPTY", "__EMPTY_1"]);
    }

    #[test]
    fn test_unique_headers_skips_names_already_taken() {
        let headers = unique_headers(["name_1", "name", "name", "name"], None);
        assert_eq!(headers, vec!["name_1", "name", "name_2", "name_3"]);
    }

    #[test]
    fn test_unique_headers_many_blank_cells() {
        let count = 16_384;
        let headers = unique_headers(std::iter::repeat_n("", count), Some(BLANK_HEADER));

        assert_eq!(headers.len(), count);
        assert_eq!(headers[0], "__EMPTY");
        assert_eq!(headers[count - 1], format!("__EMPTY_{}", count - 1));
        let distinct: HashSet<&String> = headers.iter().collect();
        assert_eq!(distinct.len(), count);
    }

    #[test]
    fn test_unique_headers_keeps_blank_without_placeholder() {
        let headers = unique_headers(["", "name"], None);
        assert_eq!(headers, vec!["", "name"]);
    }
}
