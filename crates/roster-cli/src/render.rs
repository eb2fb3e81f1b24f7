//! Terminal implementation of the dashboard renderer.
//!
//! The renderer keeps the latest frame (choices, KPIs, charts, table page)
//! and writes it on demand. Chart handles share a board with the renderer;
//! disposing a handle takes its chart off the board.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;
use tracing::trace;

use roster_core::{
    ChartHandle, ChartId, ChartSpec, Dashboard, DashboardRenderer, FilterChoices, SummaryStats,
    TablePage,
};
use roster_model::FilterState;

use crate::summary::{chart_table, choices_table, page_footer, records_table, summary_table};

type ChartBoard = Rc<RefCell<BTreeMap<ChartId, ChartSpec>>>;

/// Chart drawn on the terminal board.
#[derive(Debug)]
pub struct TerminalChart {
    id: ChartId,
    board: ChartBoard,
}

impl TerminalChart {
    pub fn id(&self) -> ChartId {
        self.id
    }
}

impl ChartHandle for TerminalChart {
    fn dispose(&mut self) {
        trace!(chart = %self.id, "chart disposed");
        self.board.borrow_mut().remove(&self.id);
    }
}

#[derive(Debug, Default)]
pub struct TerminalRenderer {
    choices: FilterChoices,
    summary: SummaryStats,
    page: Option<TablePage>,
    board: ChartBoard,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charts currently on the board, in dashboard order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        self.board.borrow().values().cloned().collect()
    }

    pub fn choices(&self) -> &FilterChoices {
        &self.choices
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    pub fn page(&self) -> Option<&TablePage> {
        self.page.as_ref()
    }

    /// Writes KPIs, charts, and the table page.
    pub fn write_dashboard<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", summary_table(&self.summary))?;
        for spec in self.board.borrow().values() {
            writeln!(out, "{}", chart_table(spec))?;
        }
        self.write_table(out)
    }

    /// Writes only the table page.
    pub fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(page) = &self.page {
            writeln!(out, "{}", records_table(page))?;
            writeln!(out, "{}", page_footer(page))?;
        }
        Ok(())
    }

    pub fn write_choices<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", choices_table(&self.choices))
    }
}

impl DashboardRenderer for TerminalRenderer {
    type Chart = TerminalChart;

    fn populate_choices(&mut self, choices: &FilterChoices) {
        self.choices = choices.clone();
    }

    fn render_summary(&mut self, summary: &SummaryStats) {
        self.summary = *summary;
    }

    fn render_table(&mut self, page: &TablePage) {
        self.page = Some(page.clone());
    }

    fn create_chart(&mut self, spec: &ChartSpec) -> TerminalChart {
        self.board.borrow_mut().insert(spec.id, spec.clone());
        TerminalChart {
            id: spec.id,
            board: Rc::clone(&self.board),
        }
    }
}

/// Machine-readable dashboard state for `--format json`.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub source: Option<&'a str>,
    pub filters: &'a FilterState,
    pub summary: &'a SummaryStats,
    pub charts: Vec<ChartSpec>,
    pub table: TablePage,
}

impl<'a> DashboardSnapshot<'a> {
    pub fn capture(dashboard: &'a Dashboard<TerminalRenderer>) -> Self {
        Self {
            source: dashboard.dataset().source(),
            filters: dashboard.filters(),
            summary: dashboard.summary(),
            charts: dashboard.renderer().charts(),
            table: dashboard.table_page(),
        }
    }
}
