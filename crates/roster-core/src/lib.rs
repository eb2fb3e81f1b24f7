//! Student roster pipeline.
//!
//! Everything between raw rows and what the dashboard shows:
//!
//! - **normalize**: raw rows into [`StudentRecord`]s
//! - **datetime**: free-form date-of-birth parsing
//! - **age**: age estimation from tagged dates of birth
//! - **aggregate**: distinct values, top-N counts, age histogram
//! - **filter**: the filter engine
//! - **summary**: KPI figures for the current view
//! - **charts**: chart data for the five dashboard charts
//! - **table**: table pagination
//! - **dashboard**: the controller that owns state and drives a renderer
//!
//! [`StudentRecord`]: roster_model::StudentRecord

pub mod age;
pub mod aggregate;
pub mod charts;
pub mod dashboard;
pub mod dataset;
pub mod datetime;
pub mod filter;
pub mod normalize;
pub mod summary;
pub mod table;

pub use age::{estimate_age, estimate_age_now};
pub use aggregate::{
    AgeBucket, AgeHistogram, DEFAULT_TOP_N, age_histogram, distinct_values, locale_cmp,
    top_n_counts,
};
pub use charts::{ChartId, ChartKind, ChartOptions, ChartSpec, build_chart_specs};
pub use dashboard::{
    ChartHandle, Dashboard, DashboardOptions, DashboardRenderer, FilterChoices, LoadOutcome,
    LoadTicket,
};
pub use dataset::Dataset;
pub use filter::{filter_indices, filter_records, matches};
pub use normalize::{normalize_row, normalize_rows};
pub use summary::SummaryStats;
pub use table::{DEFAULT_PAGE_LENGTH, TablePage, paginate};
