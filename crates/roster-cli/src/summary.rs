//! Table builders for the terminal dashboard.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use roster_core::{ChartSpec, FilterChoices, SummaryStats, TablePage};
use roster_model::FilterField;

/// Width of the longest bar in a chart.
const BAR_WIDTH: usize = 32;
const BAR_GLYPH: char = '█';

pub fn summary_table(summary: &SummaryStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Students"),
        header_cell("Female"),
        header_cell("States"),
        header_cell("Boards"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        Cell::new(format!("{}%", summary.female_pct)).fg(Color::Magenta),
        Cell::new(summary.distinct_states),
        Cell::new(summary.distinct_boards),
    ]);
    table
}

pub fn chart_table(spec: &ChartSpec) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&spec.title),
        header_cell("Count"),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let max = spec.max_value();
    if spec.labels.is_empty() {
        table.add_row(vec![dim_cell("no data"), dim_cell("-"), dim_cell("")]);
    }
    for (label, value) in spec.points() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value),
            Cell::new(bar(value, max)).fg(Color::Cyan),
        ]);
    }
    table
}

/// Horizontal bar scaled against the chart maximum; non-zero values always
/// get at least one glyph.
pub fn bar(value: usize, max: usize) -> String {
    if value == 0 || max == 0 {
        return String::new();
    }
    let width = (value * BAR_WIDTH).div_ceil(max).clamp(1, BAR_WIDTH);
    std::iter::repeat_n(BAR_GLYPH, width).collect()
}

pub fn records_table(page: &TablePage) -> Table {
    let mut table = Table::new();
    table.set_header(TablePage::headers().map(header_cell).to_vec());
    apply_records_table_style(&mut table);
    if page.rows.is_empty() {
        table.add_row(vec![dim_cell("No matching students")]);
    }
    for row in &page.rows {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    table
}

/// "Showing 11 to 20 of 23 entries (page 2 of 3)".
pub fn page_footer(page: &TablePage) -> String {
    let first = page.first_row();
    let last = if page.rows.is_empty() {
        0
    } else {
        first + page.rows.len() - 1
    };
    format!(
        "Showing {first} to {last} of {} entries (page {} of {})",
        page.total_rows, page.page, page.page_count
    )
}

pub fn choices_table(choices: &FilterChoices) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Filter"),
        header_cell("Options"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for field in FilterField::ALL {
        let values = choices.get(field);
        let listed = if values.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(values.join(", "))
        };
        table.add_row(vec![
            Cell::new(field.as_str()).add_attribute(Attribute::Bold),
            Cell::new(values.len()),
            listed,
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() == 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_records_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 9 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(15)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
