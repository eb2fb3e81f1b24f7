//! Dashboard controller behavior against a recording renderer.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use roster_core::{
    ChartHandle, ChartSpec, Dashboard, DashboardOptions, DashboardRenderer, Dataset,
    FilterChoices, LoadOutcome, SummaryStats, TablePage,
};
use roster_model::{Dob, FilterField, StudentRecord};

type Log = Rc<RefCell<Vec<String>>>;

struct RecordingChart {
    id: String,
    log: Log,
    disposed: bool,
}

impl ChartHandle for RecordingChart {
    fn dispose(&mut self) {
        assert!(!self.disposed, "chart {} disposed twice", self.id);
        self.disposed = true;
        self.log.borrow_mut().push(format!("dispose:{}", self.id));
    }
}

#[derive(Default)]
struct RecordingRenderer {
    log: Log,
    choices: Option<FilterChoices>,
    summary: Option<SummaryStats>,
    page: Option<TablePage>,
}

impl DashboardRenderer for RecordingRenderer {
    type Chart = RecordingChart;

    fn populate_choices(&mut self, choices: &FilterChoices) {
        self.log.borrow_mut().push("choices".to_string());
        self.choices = Some(choices.clone());
    }

    fn render_summary(&mut self, summary: &SummaryStats) {
        self.log.borrow_mut().push("summary".to_string());
        self.summary = Some(*summary);
    }

    fn render_table(&mut self, page: &TablePage) {
        self.log.borrow_mut().push(format!("table:{}", page.page));
        self.page = Some(page.clone());
    }

    fn create_chart(&mut self, spec: &ChartSpec) -> RecordingChart {
        self.log.borrow_mut().push(format!("create:{}", spec.id));
        RecordingChart {
            id: spec.id.to_string(),
            log: Rc::clone(&self.log),
            disposed: false,
        }
    }
}

fn student(name: &str, gender: &str, state: &str, board: &str) -> StudentRecord {
    StudentRecord {
        name: name.to_string(),
        gender: gender.to_string(),
        state: state.to_string(),
        board: board.to_string(),
        cat: "GEN".to_string(),
        dob: Dob::Textual("13-Jan-98".to_string()),
        ..StudentRecord::default()
    }
}

fn dataset() -> Dataset {
    Dataset::new(
        vec![
            student("Asha", "F", "Kerala", "CBSE"),
            student("Ravi", "M", "Bihar", "BSEB"),
            student("Meera", "F", "Kerala", "ICSE"),
            student("Kabir", "M", "Goa", "CBSE"),
        ],
        Some("students.csv".to_string()),
    )
}

fn dashboard() -> Dashboard<RecordingRenderer> {
    Dashboard::new(RecordingRenderer::default(), DashboardOptions::default())
        .with_reference_time(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap())
}

#[test]
fn load_populates_choices_and_renders() {
    let mut dashboard = dashboard();
    dashboard.load(dataset());

    let renderer = dashboard.renderer();
    let choices = renderer.choices.as_ref().expect("choices rendered");
    assert_eq!(choices.states, vec!["Bihar", "Goa", "Kerala"]);
    assert_eq!(choices.get(FilterField::Gender).to_vec(), vec!["F", "M"]);

    let summary = renderer.summary.expect("summary rendered");
    assert_eq!(summary.total, 4);
    assert_eq!(summary.female_pct, 50);
    assert_eq!(summary.distinct_states, 3);
    assert_eq!(summary.distinct_boards, 3);

    let log = renderer.log.borrow();
    assert_eq!(log.first().map(String::as_str), Some("choices"));
    assert_eq!(log.last().map(String::as_str), Some("table:1"));
    assert_eq!(log.iter().filter(|e| e.starts_with("create:")).count(), 5);
}

#[test]
fn charts_disposed_before_replacement() {
    let mut dashboard = dashboard();
    dashboard.load(dataset());
    dashboard.renderer().log.borrow_mut().clear();

    dashboard.set_filter(FilterField::State, Some("Kerala".to_string()));

    let log = dashboard.renderer().log.borrow().clone();
    for id in ["gender", "category", "states", "boards", "age"] {
        let disposed = log.iter().position(|e| *e == format!("dispose:{id}"));
        let created = log.iter().position(|e| *e == format!("create:{id}"));
        assert!(
            disposed.is_some() && disposed < created,
            "{id}: dispose must precede create in {log:?}"
        );
    }
    assert_eq!(log.iter().filter(|e| e.starts_with("dispose:")).count(), 5);
}

#[test]
fn filters_update_view_and_summary() {
    let mut dashboard = dashboard();
    dashboard.load(dataset());

    dashboard.set_filter(FilterField::State, Some("Kerala".to_string()));
    assert_eq!(dashboard.view_len(), 2);
    assert_eq!(dashboard.summary().female_pct, 100);

    dashboard.set_query("meera");
    let names: Vec<&str> = dashboard
        .view_records()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Meera"]);

    dashboard.clear_filters();
    assert_eq!(dashboard.view_len(), 4);
    assert!(dashboard.filters().is_unconstrained());
}

#[test]
fn age_chart_uses_reference_time() {
    let mut dashboard = dashboard();
    dashboard.load(dataset());

    let specs = dashboard.chart_specs();
    let age = specs.last().expect("age chart");
    let index = age.labels.iter().position(|l| l == "26–30").expect("bucket");
    assert_eq!(age.values[index], 4);
}

#[test]
fn superseded_load_is_ignored() {
    let mut dashboard = dashboard();
    let slow = dashboard.begin_load();
    let fast = dashboard.begin_load();

    let picked = Dataset::new(
        vec![student("Picked", "F", "Goa", "CBSE")],
        Some("picked.csv".to_string()),
    );
    assert_eq!(dashboard.complete_load(fast, picked), LoadOutcome::Applied);
    assert_eq!(dashboard.complete_load(slow, dataset()), LoadOutcome::Superseded);

    assert_eq!(dashboard.dataset().len(), 1);
    assert_eq!(dashboard.dataset().source(), Some("picked.csv"));
}

#[test]
fn pending_load_superseded_by_direct_load() {
    let mut dashboard = dashboard();
    let pending = dashboard.begin_load();
    dashboard.load(dataset());

    assert_eq!(
        dashboard.complete_load(pending, Dataset::default()),
        LoadOutcome::Superseded
    );
    assert_eq!(dashboard.dataset().len(), 4);
}

#[test]
fn set_page_clamps_and_renders_table_only() {
    let records: Vec<StudentRecord> = (0..25)
        .map(|i| student(&format!("S{i:02}"), "F", "Goa", "CBSE"))
        .collect();
    let mut dashboard = dashboard();
    dashboard.load(Dataset::new(records, None));
    dashboard.renderer().log.borrow_mut().clear();

    dashboard.set_page(7);
    assert_eq!(dashboard.page(), 3);
    assert_eq!(*dashboard.renderer().log.borrow(), vec!["table:3".to_string()]);

    let page = dashboard.renderer().page.as_ref().expect("page rendered");
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.rows[0][0], "S20");

    // Filtering resets to the first page.
    dashboard.set_query("s0");
    assert_eq!(dashboard.page(), 1);
    assert_eq!(dashboard.table_page().total_rows, 10);
}

#[test]
fn empty_dashboard_renders_zeroes() {
    let mut dashboard = dashboard();
    dashboard.apply_filters();

    let summary = dashboard.renderer().summary.expect("summary rendered");
    assert_eq!(summary, SummaryStats::default());
    let page = dashboard.table_page();
    assert_eq!(page.page_count, 1);
    assert!(page.rows.is_empty());
}

#[test]
fn dispose_charts_releases_everything() {
    let mut dashboard = dashboard();
    dashboard.load(dataset());
    dashboard.renderer().log.borrow_mut().clear();

    dashboard.dispose_charts();
    assert_eq!(
        dashboard
            .renderer()
            .log
            .borrow()
            .iter()
            .filter(|e| e.starts_with("dispose:"))
            .count(),
        5
    );
    assert!(dashboard.chart(roster_core::ChartId::Age).is_none());
}
