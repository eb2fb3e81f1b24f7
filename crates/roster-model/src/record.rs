//! Normalized student records.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::raw::{RawValue, format_number};

/// Date of birth as found in the source, tagged by how it was stored.
///
/// Spreadsheets store dates as day serials; delimited text usually carries
/// free-form strings. The tag is fixed at normalization time so age
/// estimation never has to guess the runtime type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Dob {
    /// Spreadsheet serial: days since 1899-12-30 UTC.
    Numeric(f64),
    /// Trimmed, non-empty free-form text.
    Textual(String),
    #[default]
    Absent,
}

impl Dob {
    /// Tags a raw cell.
    pub fn from_raw(value: &RawValue) -> Self {
        match value {
            RawValue::Number(serial) => Self::Numeric(*serial),
            RawValue::Empty => Self::Absent,
            other => {
                let text = other.to_trimmed_string();
                if text.is_empty() {
                    Self::Absent
                } else {
                    Self::Textual(text)
                }
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Text shown for the date of birth in the table view.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Self::Numeric(serial) => Cow::Owned(format_number(*serial)),
            Self::Textual(text) => Cow::Borrowed(text),
            Self::Absent => Cow::Borrowed(""),
        }
    }
}

/// One student entry after normalization.
///
/// Every text field is trimmed; `name` is never empty for records that
/// made it into a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub gender: String,
    pub cat: String,
    pub board: String,
    pub medium: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub dob: Dob,
}

impl StudentRecord {
    /// Returns the display value of a column.
    pub fn field(&self, column: Column) -> Cow<'_, str> {
        match column {
            Column::Dob => self.dob.display(),
            other => Cow::Borrowed(self.text(other).unwrap_or_default()),
        }
    }

    /// Returns a text column without allocating; `None` for the date of birth.
    pub fn text(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::Name => &self.name,
            Column::Gender => &self.gender,
            Column::Category => &self.cat,
            Column::Board => &self.board,
            Column::Medium => &self.medium,
            Column::City => &self.city,
            Column::District => &self.district,
            Column::State => &self.state,
            Column::Dob => return None,
        };
        Some(value.as_str())
    }

    /// The nine display cells in [`Column::ALL`] order.
    pub fn cells(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|column| self.field(*column).into_owned())
            .collect()
    }
}
