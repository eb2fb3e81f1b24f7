//! Chart specifications rebuilt on every filter pass.

use std::fmt;

use chrono::{DateTime, Utc};
use roster_model::{Column, StudentRecord};
use serde::Serialize;

use crate::aggregate::{DEFAULT_TOP_N, age_histogram, top_n_counts};

/// Label shown for an empty category value.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Default size of the gender ranking.
pub const DEFAULT_GENDER_TOP_N: usize = 5;

/// Chart slots on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Gender,
    Category,
    States,
    Boards,
    Age,
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        Self::Gender,
        Self::Category,
        Self::States,
        Self::Boards,
        Self::Age,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Category => "category",
            Self::States => "states",
            Self::Boards => "boards",
            Self::Age => "age",
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::Category => "Category",
            Self::States => "Top States",
            Self::Boards => "Top Boards",
            Self::Age => "Age Distribution",
        }
    }

    pub const fn kind(&self) -> ChartKind {
        match self {
            Self::Gender => ChartKind::Pie,
            _ => ChartKind::Bar,
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// Data for one chart: parallel labels and values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl ChartSpec {
    fn from_counts(id: ChartId, counts: Vec<(String, usize)>) -> Self {
        let (labels, values) = counts
            .into_iter()
            .map(|(label, count)| (display_label(label), count))
            .unzip();
        Self {
            id,
            kind: id.kind(),
            title: id.title().to_string(),
            labels,
            values,
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn points(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn max_value(&self) -> usize {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

fn display_label(label: String) -> String {
    if label.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        label
    }
}

/// Ranking sizes for the frequency charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub top_n: usize,
    pub gender_top_n: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            gender_top_n: DEFAULT_GENDER_TOP_N,
        }
    }
}

/// Builds the five dashboard charts, in [`ChartId::ALL`] order.
pub fn build_chart_specs(
    records: &[&StudentRecord],
    options: ChartOptions,
    now: DateTime<Utc>,
) -> Vec<ChartSpec> {
    let rows = || records.iter().copied();
    let histogram = age_histogram(rows(), now);

    vec![
        ChartSpec::from_counts(
            ChartId::Gender,
            top_n_counts(rows(), Column::Gender, options.gender_top_n),
        ),
        ChartSpec::from_counts(
            ChartId::Category,
            top_n_counts(rows(), Column::Category, options.top_n),
        ),
        ChartSpec::from_counts(
            ChartId::States,
            top_n_counts(rows(), Column::State, options.top_n),
        ),
        ChartSpec::from_counts(
            ChartId::Boards,
            top_n_counts(rows(), Column::Board, options.top_n),
        ),
        ChartSpec::from_counts(
            ChartId::Age,
            histogram
                .iter()
                .map(|(label, count)| (label.to_string(), count))
                .collect(),
        ),
    ]
}
