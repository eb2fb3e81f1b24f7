//! Headline figures for the current view.

use std::collections::HashSet;

use roster_model::StudentRecord;
use serde::Serialize;

/// KPI values shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    /// Share of records with gender `F`, as a whole percentage.
    pub female_pct: u32,
    pub distinct_states: usize,
    pub distinct_boards: usize,
}

impl SummaryStats {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a StudentRecord>,
    {
        let mut total = 0usize;
        let mut females = 0usize;
        let mut states = HashSet::new();
        let mut boards = HashSet::new();
        for record in records {
            total += 1;
            if record.gender == "F" {
                females += 1;
            }
            if !record.state.is_empty() {
                states.insert(record.state.as_str());
            }
            if !record.board.is_empty() {
                boards.insert(record.board.as_str());
            }
        }
        Self {
            total,
            female_pct: rounded_percentage(females, total),
            distinct_states: states.len(),
            distinct_boards: boards.len(),
        }
    }
}

/// `part / whole` as a percentage rounded half-up; `0` for an empty whole.
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u128, whole as u128);
    let pct = (200 * part + whole) / (2 * whole);
    u32::try_from(pct).unwrap_or(u32::MAX)
}
