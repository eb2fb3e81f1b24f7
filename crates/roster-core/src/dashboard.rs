//! Dashboard controller.
//!
//! [`Dashboard`] owns all application state: the loaded [`Dataset`], the
//! filter selections, the filtered view, and the live chart handles. Every
//! change to data or filters flows through it, and it pushes the results to
//! a [`DashboardRenderer`].
//!
//! Loads may be started before an earlier one finished (a slow auto-load
//! racing a file the user picked). [`Dashboard::begin_load`] hands out a
//! [`LoadTicket`]; only the most recently begun load is applied.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use roster_model::{FilterField, FilterState, StudentRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::distinct_values;
use crate::charts::{ChartId, ChartOptions, ChartSpec, build_chart_specs};
use crate::dataset::Dataset;
use crate::filter::filter_indices;
use crate::summary::SummaryStats;
use crate::table::{DEFAULT_PAGE_LENGTH, TablePage, paginate};

/// A live chart owned by the renderer.
pub trait ChartHandle {
    /// Releases the chart. Called exactly once, before a replacement for the
    /// same slot is created.
    fn dispose(&mut self);
}

/// Output side of the dashboard.
pub trait DashboardRenderer {
    type Chart: ChartHandle;

    /// Replaces the options of the four filter controls.
    fn populate_choices(&mut self, choices: &FilterChoices);

    fn render_summary(&mut self, summary: &SummaryStats);

    fn render_table(&mut self, page: &TablePage);

    fn create_chart(&mut self, spec: &ChartSpec) -> Self::Chart;
}

/// Sorted options for each discrete filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterChoices {
    pub states: Vec<String>,
    pub boards: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterChoices {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        let values = |field: FilterField| distinct_values(records, field.column());
        Self {
            states: values(FilterField::State),
            boards: values(FilterField::Board),
            genders: values(FilterField::Gender),
            categories: values(FilterField::Category),
        }
    }

    pub fn get(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::State => &self.states,
            FilterField::Board => &self.boards,
            FilterField::Gender => &self.genders,
            FilterField::Category => &self.categories,
        }
    }
}

/// Handle for a load in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of [`Dashboard::complete_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A later load was begun; the dataset was discarded.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub page_length: usize,
    pub charts: ChartOptions,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            charts: ChartOptions::default(),
        }
    }
}

pub struct Dashboard<R: DashboardRenderer> {
    renderer: R,
    options: DashboardOptions,
    dataset: Dataset,
    filters: FilterState,
    view: Vec<usize>,
    choices: FilterChoices,
    summary: SummaryStats,
    page: usize,
    charts: BTreeMap<ChartId, R::Chart>,
    generation: u64,
    reference_time: Option<DateTime<Utc>>,
}

impl<R: DashboardRenderer> Dashboard<R> {
    pub fn new(renderer: R, options: DashboardOptions) -> Self {
        Self {
            renderer,
            options,
            dataset: Dataset::default(),
            filters: FilterState::default(),
            view: Vec::new(),
            choices: FilterChoices::default(),
            summary: SummaryStats::default(),
            page: 1,
            charts: BTreeMap::new(),
            generation: 0,
            reference_time: None,
        }
    }

    /// Pins the "now" used for age estimation. Unset means the wall clock.
    #[must_use]
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    /// Replaces the dataset immediately, superseding any load in flight.
    pub fn load(&mut self, dataset: Dataset) {
        let ticket = self.begin_load();
        self.complete_load(ticket, dataset);
    }

    /// Starts a load. Any earlier ticket stops being current.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        debug!(generation = self.generation, "load begun");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Applies `dataset` if `ticket` belongs to the most recently begun load.
    pub fn complete_load(&mut self, ticket: LoadTicket, dataset: Dataset) -> LoadOutcome {
        if ticket.generation != self.generation {
            info!(
                ticket = ticket.generation,
                current = self.generation,
                records = dataset.len(),
                "ignoring superseded load"
            );
            return LoadOutcome::Superseded;
        }

        info!(
            source = dataset.source().unwrap_or("<memory>"),
            records = dataset.len(),
            "dataset loaded"
        );
        self.dataset = dataset;
        self.choices = FilterChoices::from_records(self.dataset.records());
        self.renderer.populate_choices(&self.choices);
        self.apply_filters();
        LoadOutcome::Applied
    }

    /// Sets or clears (`None`) a discrete filter and re-applies.
    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) {
        self.filters.set(field, value);
        self.apply_filters();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = Some(query.into());
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.apply_filters();
    }

    /// Replaces every selection at once and re-applies.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.apply_filters();
    }

    /// Recomputes the view and pushes summary, charts, and the first table
    /// page to the renderer.
    pub fn apply_filters(&mut self) {
        self.view = filter_indices(self.dataset.records(), &self.filters);
        self.page = 1;
        debug!(
            matched = self.view.len(),
            total = self.dataset.len(),
            "filters applied"
        );

        let now = self.now();
        let all = self.dataset.records();
        let records: Vec<&StudentRecord> = self.view.iter().map(|&index| &all[index]).collect();
        self.summary = SummaryStats::compute(records.iter().copied());
        let specs = build_chart_specs(&records, self.options.charts, now);
        let page = paginate(&records, self.page, self.options.page_length);

        self.renderer.render_summary(&self.summary);
        for spec in specs {
            if let Some(mut previous) = self.charts.remove(&spec.id) {
                previous.dispose();
            }
            let chart = self.renderer.create_chart(&spec);
            self.charts.insert(spec.id, chart);
        }
        self.renderer.render_table(&page);
    }

    /// Moves the table to page `page` (clamped) and re-renders it.
    pub fn set_page(&mut self, page: usize) {
        let table = paginate(&self.view_records(), page, self.options.page_length);
        self.page = table.page;
        self.renderer.render_table(&table);
    }

    /// Disposes every live chart.
    pub fn dispose_charts(&mut self) {
        for (_, mut chart) in std::mem::take(&mut self.charts) {
            chart.dispose();
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn choices(&self) -> &FilterChoices {
        &self.choices
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    /// Records in the filtered view, in dataset order.
    pub fn view_records(&self) -> Vec<&StudentRecord> {
        let records = self.dataset.records();
        self.view.iter().map(|&index| &records[index]).collect()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// The current table page, recomputed from the view.
    pub fn table_page(&self) -> TablePage {
        paginate(&self.view_records(), self.page, self.options.page_length)
    }

    /// Current chart data, recomputed from the view.
    pub fn chart_specs(&self) -> Vec<ChartSpec> {
        build_chart_specs(&self.view_records(), self.options.charts, self.now())
    }

    pub fn chart(&self, id: ChartId) -> Option<&R::Chart> {
        self.charts.get(&id)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }
}
