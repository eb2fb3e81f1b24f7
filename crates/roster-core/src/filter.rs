//! Filter engine: the subset of records matching the current controls.

use roster_model::{FilterField, FilterState, StudentRecord};

/// Compiled form of a [`FilterState`], built once per filter pass.
#[derive(Debug, Clone)]
pub struct RecordFilter<'f> {
    choices: Vec<(FilterField, &'f str)>,
    query: Option<String>,
}

impl<'f> RecordFilter<'f> {
    pub fn new(filters: &'f FilterState) -> Self {
        let choices = FilterField::ALL
            .iter()
            .filter_map(|field| filters.active(*field).map(|value| (*field, value)))
            .collect();
        Self {
            choices,
            query: filters.active_query().map(str::to_lowercase),
        }
    }

    /// Returns true when every active predicate holds for `record`.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        let choices_match = self.choices.iter().all(|(field, expected)| {
            record.text(field.column()).is_some_and(|value| value == *expected)
        });
        if !choices_match {
            return false;
        }
        match &self.query {
            Some(query) => search_text(record).contains(query.as_str()),
            None => true,
        }
    }
}

/// Lowercased text the free-text query searches in.
fn search_text(record: &StudentRecord) -> String {
    format!(
        "{} {} {} {}",
        record.name, record.city, record.district, record.state
    )
    .to_lowercase()
}

/// Returns true when `record` satisfies `filters`.
pub fn matches(record: &StudentRecord, filters: &FilterState) -> bool {
    RecordFilter::new(filters).matches(record)
}

/// Positions of the matching records, in dataset order.
pub fn filter_indices(records: &[StudentRecord], filters: &FilterState) -> Vec<usize> {
    let filter = RecordFilter::new(filters);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(index, _)| index)
        .collect()
}

/// The matching records, in dataset order.
pub fn filter_records<'a>(
    records: &'a [StudentRecord],
    filters: &FilterState,
) -> Vec<&'a StudentRecord> {
    let filter = RecordFilter::new(filters);
    records.iter().filter(|record| filter.matches(record)).collect()
}
