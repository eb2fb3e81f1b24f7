//! Filter selections driven by the dashboard controls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::ModelError;

/// Discrete-choice filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    State,
    Board,
    Gender,
    Category,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [Self::State, Self::Board, Self::Gender, Self::Category];

    /// Record column compared by this filter.
    pub const fn column(&self) -> Column {
        match self {
            Self::State => Column::State,
            Self::Board => Column::Board,
            Self::Gender => Column::Gender,
            Self::Category => Column::Category,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Board => "board",
            Self::Gender => "gender",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(Self::State),
            "board" => Ok(Self::Board),
            "gender" => Ok(Self::Gender),
            "category" | "cat" => Ok(Self::Category),
            _ => Err(ModelError::UnknownFilterField(s.to_string())),
        }
    }
}

/// Current filter selections. Unset and empty values are both inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub state: Option<String>,
    pub board: Option<String>,
    pub gender: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a discrete filter.
    #[must_use]
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Builder-style setter for the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::State => self.state.as_deref(),
            FilterField::Board => self.board.as_deref(),
            FilterField::Gender => self.gender.as_deref(),
            FilterField::Category => self.category.as_deref(),
        }
    }

    /// Value of a discrete filter if it constrains the view.
    pub fn active(&self, field: FilterField) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    /// Query text if it constrains the view.
    pub fn active_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|query| !query.is_empty())
    }

    /// Returns true when no predicate is active.
    pub fn is_unconstrained(&self) -> bool {
        FilterField::ALL
            .iter()
            .all(|field| self.active(*field).is_none())
            && self.active_query().is_none()
    }

    /// Resets every control to unset.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::State => &mut self.state,
            FilterField::Board => &mut self.board,
            FilterField::Gender => &mut self.gender,
            FilterField::Category => &mut self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_inactive() {
        let filters = FilterState::new()
            .with(FilterField::State, "")
            .with_query("");
        assert_eq!(filters.get(FilterField::State), Some(""));
        assert_eq!(filters.active(FilterField::State), None);
        assert!(filters.is_unconstrained());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut filters = FilterState::new()
            .with(FilterField::Board, "CBSE")
            .with_query("pune");
        assert!(!filters.is_unconstrained());
        filters.clear();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_parse_filter_field() {
        assert_eq!("cat".parse::<FilterField>(), Ok(FilterField::Category));
        assert_eq!(" Board".parse::<FilterField>(), Ok(FilterField::Board));
        assert!("medium".parse::<FilterField>().is_err());
        assert_eq!(FilterField::Category.column(), Column::Category);
    }
}
