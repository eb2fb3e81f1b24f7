//! Aggregations over student records.
//!
//! - [`distinct_values`]: sorted unique values of a column (filter choices)
//! - [`top_n_counts`]: most frequent values of a column (bar/pie charts)
//! - [`age_histogram`]: estimated ages in fixed buckets

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use roster_model::{Column, StudentRecord};
use serde::Serialize;

use crate::age::estimate_age;

/// Default size of top-N rankings.
pub const DEFAULT_TOP_N: usize = 10;

/// Orders strings the way a locale-aware collator would for plain text:
/// case-insensitive first, lowercase before uppercase on ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.chars().map(swap_case).cmp(b.chars().map(swap_case)))
}

fn swap_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

/// Unique non-empty values of `column`, sorted with [`locale_cmp`].
pub fn distinct_values<'a, I>(records: I, column: Column) -> Vec<String>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut values: Vec<String> = records
        .into_iter()
        .map(|record| record.field(column))
        .filter(|value| !value.is_empty())
        .map(std::borrow::Cow::into_owned)
        .collect();
    values.sort_by(|a, b| locale_cmp(a, b));
    values.dedup();
    values
}

/// Counts non-empty values of `column` and keeps the `n` most frequent.
///
/// Sorted by descending count; equal counts keep first-encountered order.
pub fn top_n_counts<'a, I>(records: I, column: Column, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        let value = record.field(column);
        if value.is_empty() {
            continue;
        }
        if let Some(&slot) = index.get(value.as_ref()) {
            counts[slot].1 += 1;
        } else {
            index.insert(value.to_string(), counts.len());
            counts.push((value.into_owned(), 1));
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Fixed age ranges used by the age chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    UpTo10,
    From11To15,
    From16To20,
    From21To25,
    From26To30,
    From31To35,
    From36To40,
    From41To45,
    From46To50,
    From51To60,
    Over60,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 11] = [
        AgeBucket::UpTo10,
        AgeBucket::From11To15,
        AgeBucket::From16To20,
        AgeBucket::From21To25,
        AgeBucket::From26To30,
        AgeBucket::From31To35,
        AgeBucket::From36To40,
        AgeBucket::From41To45,
        AgeBucket::From46To50,
        AgeBucket::From51To60,
        AgeBucket::Over60,
    ];

    pub fn for_age(age: u32) -> Self {
        match age {
            0..=10 => Self::UpTo10,
            11..=15 => Self::From11To15,
            16..=20 => Self::From16To20,
            21..=25 => Self::From21To25,
            26..=30 => Self::From26To30,
            31..=35 => Self::From31To35,
            36..=40 => Self::From36To40,
            41..=45 => Self::From41To45,
            46..=50 => Self::From46To50,
            51..=60 => Self::From51To60,
            _ => Self::Over60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UpTo10 => "≤10",
            Self::From11To15 => "11–15",
            Self::From16To20 => "16–20",
            Self::From21To25 => "21–25",
            Self::From26To30 => "26–30",
            Self::From31To35 => "31–35",
            Self::From36To40 => "36–40",
            Self::From41To45 => "41–45",
            Self::From46To50 => "46–50",
            Self::From51To60 => "51–60",
            Self::Over60 => ">60",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Counts per [`AgeBucket`], in bucket order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgeHistogram {
    counts: [usize; 11],
}

impl AgeHistogram {
    pub fn add(&mut self, age: u32) {
        self.counts[AgeBucket::for_age(age).index()] += 1;
    }

    pub fn count(&self, bucket: AgeBucket) -> usize {
        self.counts[bucket.index()]
    }

    pub fn counts(&self) -> &[usize; 11] {
        &self.counts
    }

    /// Number of records with a known age.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(label, count)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        AgeBucket::ALL
            .iter()
            .map(|bucket| (bucket.label(), self.count(*bucket)))
    }
}

/// Estimates every age against `now` and buckets the known ones.
pub fn age_histogram<'a, I>(records: I, now: DateTime<Utc>) -> AgeHistogram
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut histogram = AgeHistogram::default();
    for age in records
        .into_iter()
        .filter_map(|record| estimate_age(&record.dob, now))
    {
        histogram.add(age);
    }
    histogram
}
