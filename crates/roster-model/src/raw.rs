//! Loosely-typed rows as produced by the CSV and spreadsheet readers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single parsed cell before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Missing, null, or blank cell.
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawValue {
    /// Returns true for blank cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Returns the numeric payload, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// String form of the cell with surrounding whitespace removed.
    ///
    /// Blank cells become the empty string; numbers use their shortest
    /// decimal form (`35808`, `1.5`).
    pub fn to_trimmed_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::Number(value) => format_number(*value),
            Self::Bool(value) => value.to_string(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_trimmed_string())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Formats a number the way spreadsheet cells are usually shown as text.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        // Collapses -0 to 0.
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// A header-keyed row with arbitrary field presence.
///
/// Keys keep their source order. Lookups try the exact header first and
/// then fall back to a case-insensitive match on the trimmed header, so
/// `" Name "` and `NAME` both resolve for `name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from fields whose keys are already distinct.
    ///
    /// Skips the per-field duplicate check of [`RawRecord::insert`]; readers
    /// use it after header de-duplication. Repeated keys are kept as given
    /// and [`RawRecord::get`] returns the first.
    pub fn from_unique_pairs(fields: Vec<(String, RawValue)>) -> Self {
        Self { fields }
    }

    /// Sets a field, replacing any existing value under the same header.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Builder-style variant of [`RawRecord::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        if let Some((_, value)) = self.fields.iter().find(|(existing, _)| existing == key) {
            return Some(value);
        }
        self.fields
            .iter()
            .find(|(existing, _)| existing.trim().eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true when every field is blank.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
