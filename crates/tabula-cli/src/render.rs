//! Terminal rendering of a grid page

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use tabula_core::{ColumnConfig, FilterConfig, Value};
use tabula_grid::{GridState, GridView, Pagination};

/// Draw the current page with sort indicators in the header
pub fn page_table(state: &GridState, columns: &[&ColumnConfig], view: &GridView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(columns.iter().map(|column| {
        match state.sort_indicator(&column.id) {
            Some(indicator) => Cell::new(format!("{} {}", column.label, indicator)),
            None => Cell::new(&column.label),
        }
    }));

    for row in &view.page_rows {
        table.add_row(columns.iter().map(|column| {
            let value = row.get(&column.id);
            let cell = Cell::new(value.to_string());
            match value {
                Value::Number(_) => cell.set_alignment(CellAlignment::Right),
                _ => cell,
            }
        }));
    }
    table
}

/// `1–50 of 1000 · page 1/20`
pub fn footer(pagination: &Pagination) -> String {
    format!(
        "{}–{} of {} · page {}/{}",
        pagination.start_item,
        pagination.end_item,
        pagination.total_items,
        pagination.page,
        pagination.total_pages.max(1)
    )
}

/// One line per applied filter, empty if there are none
pub fn filter_summary(filters: &[FilterConfig]) -> String {
    filters
        .iter()
        .map(|f| format!("filter: {}", f.describe()))
        .collect::<Vec<_>>()
        .join("\n")
}
