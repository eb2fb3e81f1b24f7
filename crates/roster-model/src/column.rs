//! The nine fixed columns of a student record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Student record column, in table display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Gender,
    Category,
    Board,
    Medium,
    City,
    District,
    State,
    Dob,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 9] = [
        Self::Name,
        Self::Gender,
        Self::Category,
        Self::Board,
        Self::Medium,
        Self::City,
        Self::District,
        Self::State,
        Self::Dob,
    ];

    /// Header shown above the column in the table view.
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Gender => "Gender",
            Self::Category => "Category",
            Self::Board => "Board",
            Self::Medium => "Medium",
            Self::City => "City",
            Self::District => "District",
            Self::State => "State",
            Self::Dob => "DOB",
        }
    }

    /// Header name of the column in source files.
    pub const fn source_key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Category => "cat",
            Self::Board => "board",
            Self::Medium => "medium",
            Self::City => "city",
            Self::District => "district",
            Self::State => "state",
            Self::Dob => "dob",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = ModelError;

    /// Accepts the display header or the source key, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| {
                column.source_key() == normalized || column.header().to_lowercase() == normalized
            })
            .ok_or_else(|| ModelError::UnknownColumn(s.to_string()))
    }
}
