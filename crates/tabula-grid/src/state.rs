//! Per-table grid view state

use serde::{Deserialize, Serialize};
use tabula_core::{
    ColumnConfig, FilterConfig, Row, RowId, SortConfig, SortDirection, TableDefinition,
    ViewOptions, process_data, update_filters, update_sort,
};

use crate::{ColumnLayout, Pagination, RowSelection};

/// Defaults applied when a grid is opened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub default_page_size: usize,
    pub default_column_width: f64,
    pub min_column_width: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            default_column_width: 150.0,
            min_column_width: 80.0,
        }
    }
}

/// What a column header shows about sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortIndicator {
    pub direction: SortDirection,
    /// 1-based priority, only set when more than one sort key is active
    pub priority: Option<usize>,
}

impl std::fmt::Display for SortIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.priority {
            Some(priority) => write!(f, "{}{}", self.direction.arrow(), priority),
            None => write!(f, "{}", self.direction.arrow()),
        }
    }
}

/// The result of rendering a grid against its table
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Every row that survives the filters, in sorted order
    pub rows: Vec<Row>,
    /// The current page of `rows`
    pub page_rows: Vec<Row>,
    pub pagination: Pagination,
}

/// Sort, filter, selection, layout and paging state of one table view.
///
/// The table itself is passed in where needed; the state only holds ids.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    options: GridOptions,
    sort_by: Vec<SortConfig>,
    filters: Vec<FilterConfig>,
    selection: RowSelection,
    layout: ColumnLayout,
    page: usize,
    page_size: usize,
}

impl GridState {
    pub fn new(table: &TableDefinition) -> Self {
        Self::with_options(table, GridOptions::default())
    }

    pub fn with_options(table: &TableDefinition, options: GridOptions) -> Self {
        Self {
            options,
            sort_by: Vec::new(),
            filters: Vec::new(),
            selection: RowSelection::new(),
            layout: ColumnLayout::from_columns(&table.columns),
            page: 1,
            page_size: options.default_page_size.max(1),
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn sort_by(&self) -> &[SortConfig] {
        &self.sort_by
    }

    pub fn filters(&self) -> &[FilterConfig] {
        &self.filters
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions::new(self.sort_by.clone(), self.filters.clone())
    }

    /// Header click on `column_id`. Columns that are unknown or not sortable
    /// are ignored. Returns true if the sort changed.
    pub fn toggle_sort(&mut self, table: &TableDefinition, column_id: &str, additive: bool) -> bool {
        match table.column(column_id) {
            Some(column) if column.sortable => {}
            Some(_) => {
                tracing::warn!(column_id, "Ignoring sort on non-sortable column");
                return false;
            }
            None => {
                tracing::warn!(column_id, "Ignoring sort on unknown column");
                return false;
            }
        }

        self.sort_by = update_sort(&self.sort_by, column_id, additive);
        tracing::info!(
            column_id,
            additive,
            sort = ?self.sort_by,
            "Sort changed"
        );
        true
    }

    /// Apply a filter, replacing any filter on the same column
    pub fn apply_filter(&mut self, filter: FilterConfig) {
        tracing::info!(filter = %filter.describe(), "Filter applied");
        self.filters = update_filters(&self.filters, filter);
        self.page = 1;
    }

    /// Drop the filter on `column_id`. Returns true if there was one.
    pub fn remove_filter(&mut self, column_id: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.column_id != column_id);
        self.page = 1;

        let removed = self.filters.len() != before;
        if removed {
            tracing::info!(column_id, "Filter removed");
        }
        removed
    }

    pub fn filter_for(&self, column_id: &str) -> Option<&FilterConfig> {
        self.filters.iter().find(|f| f.column_id == column_id)
    }

    pub fn select_row(&mut self, id: RowId, selected: bool) {
        self.selection.select(id, selected);
    }

    /// Select exactly the rows of the current page, or clear the selection
    pub fn select_all(&mut self, selected: bool, page_rows: &[Row]) {
        self.selection.select_page(page_rows, selected);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn reorder_column(&mut self, from: usize, to: usize) -> bool {
        let moved = self.layout.reorder(from, to);
        if !moved {
            tracing::debug!(from, to, "Ignoring out of range column move");
        }
        moved
    }

    /// Set a column width, clamped to the minimum. Returns the stored width.
    pub fn resize_column(&mut self, column_id: &str, width: f64) -> f64 {
        self.layout
            .set_width(column_id, width, self.options.min_column_width)
    }

    /// Effective width: user override, else the column's own width, else
    /// the default
    pub fn column_width(&self, table: &TableDefinition, column_id: &str) -> f64 {
        self.layout
            .width_override(column_id)
            .or_else(|| table.column(column_id).and_then(|c| c.width))
            .unwrap_or(self.options.default_column_width)
    }

    /// Returns true if the column is now visible
    pub fn toggle_column(&mut self, column_id: &str) -> bool {
        self.layout.toggle(column_id)
    }

    pub fn visible_columns<'a>(&self, table: &'a TableDefinition) -> Vec<&'a ColumnConfig> {
        self.layout.visible_columns(&table.columns)
    }

    /// Reconcile the layout after the table's columns were edited. Sort keys
    /// and filters on removed columns are dropped too.
    pub fn sync_columns(&mut self, table: &TableDefinition) {
        self.layout.sync(&table.columns);
        self.sort_by
            .retain(|s| table.column(&s.column_id).is_some());
        self.filters
            .retain(|f| table.column(&f.column_id).is_some());
    }

    /// Go to `page`, clamped to the pages available for `total_items` rows
    pub fn set_page(&mut self, page: usize, total_items: usize) {
        let total_pages = total_items.div_ceil(self.page_size);
        self.page = Pagination::clamp_page(page, total_pages);
    }

    /// Change the page size and go back to the first page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn sort_indicator(&self, column_id: &str) -> Option<SortIndicator> {
        let ix = self.sort_by.iter().position(|s| s.column_id == column_id)?;
        Some(SortIndicator {
            direction: self.sort_by[ix].direction,
            priority: (self.sort_by.len() > 1).then_some(ix + 1),
        })
    }

    /// Materialize the view: filter, sort, then take the current page.
    ///
    /// A page past the end (e.g. after rows were deleted) renders the last
    /// page instead.
    pub fn render(&self, table: &TableDefinition) -> GridView {
        let rows = process_data(&table.data, &self.view_options());

        let total_pages = rows.len().div_ceil(self.page_size);
        let page = Pagination::clamp_page(self.page, total_pages);
        let pagination = Pagination::new(page, self.page_size, rows.len());
        let page_rows = pagination.slice(&rows).to_vec();

        tracing::debug!(
            table_id = %table.id,
            total_items = pagination.total_items,
            page = pagination.page,
            page_rows = page_rows.len(),
            "Rendered grid"
        );

        GridView {
            rows,
            page_rows,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_core::ColumnType;

    fn table() -> TableDefinition {
        let mut table = TableDefinition::new("t", "People");
        table.columns = vec![
            ColumnConfig::new("name", "Name", ColumnType::Text),
            ColumnConfig::new("salary", "Salary", ColumnType::Number).with_width(120.0),
            ColumnConfig::new("notes", "Notes", ColumnType::Text).with_sortable(false),
        ];
        table.data = (1..=7)
            .map(|i| {
                Row::new(i)
                    .with("name", format!("Person {i}"))
                    .with("salary", i * 1000)
            })
            .collect();
        table
    }

    #[test]
    fn test_toggle_sort_respects_sortable() {
        let table = table();
        let mut state = GridState::new(&table);

        assert!(!state.toggle_sort(&table, "notes", false));
        assert!(!state.toggle_sort(&table, "missing", false));
        assert!(state.sort_by().is_empty());

        assert!(state.toggle_sort(&table, "salary", false));
        assert_eq!(state.sort_by(), &[SortConfig::ascending("salary")]);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let table = table();
        let mut state = GridState::new(&table);
        state.set_page_size(2);
        state.set_page(3, 7);
        assert_eq!(state.page(), 3);

        state.apply_filter(FilterConfig::range("salary", Some(2000.0), None));
        assert_eq!(state.page(), 1);

        state.set_page(2, 6);
        assert!(state.remove_filter("salary"));
        assert_eq!(state.page(), 1);
        assert!(!state.remove_filter("salary"));
    }

    #[test]
    fn test_set_page_is_clamped() {
        let table = table();
        let mut state = GridState::new(&table);
        state.set_page_size(3);

        state.set_page(10, 7);
        assert_eq!(state.page(), 3);
        state.set_page(0, 7);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let table = table();
        let mut state = GridState::new(&table);
        state.set_page_size(2);
        state.set_page(2, 7);

        state.set_page_size(25);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 25);

        state.set_page_size(0);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn test_column_width_fallbacks() {
        let table = table();
        let mut state = GridState::new(&table);

        assert_eq!(state.column_width(&table, "name"), 150.0);
        assert_eq!(state.column_width(&table, "salary"), 120.0);

        assert_eq!(state.resize_column("salary", 10.0), 80.0);
        assert_eq!(state.column_width(&table, "salary"), 80.0);
    }

    #[test]
    fn test_sort_indicator_priority() {
        let table = table();
        let mut state = GridState::new(&table);

        state.toggle_sort(&table, "salary", false);
        assert_eq!(
            state.sort_indicator("salary"),
            Some(SortIndicator {
                direction: SortDirection::Ascending,
                priority: None,
            })
        );

        state.toggle_sort(&table, "name", true);
        state.toggle_sort(&table, "name", true);
        let indicator = state.sort_indicator("name").unwrap();
        assert_eq!(indicator.priority, Some(2));
        assert_eq!(indicator.to_string(), "▼2");
        assert_eq!(state.sort_indicator("notes"), None);
    }

    #[test]
    fn test_render_pages() {
        let table = table();
        let mut state = GridState::new(&table);
        state.set_page_size(3);
        state.toggle_sort(&table, "salary", false);
        state.toggle_sort(&table, "salary", false);
        state.set_page(3, 7);

        let view = state.render(&table);
        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.page_rows.len(), 1);
        assert_eq!(view.page_rows[0].id, RowId::from(1));
        assert_eq!(view.pagination.total_pages, 3);
        assert_eq!(
            (view.pagination.start_item, view.pagination.end_item),
            (7, 7)
        );
    }

    #[test]
    fn test_render_past_end_shows_last_page() {
        let mut table = table();
        let mut state = GridState::new(&table);
        state.set_page_size(3);
        state.set_page(3, 7);

        table.data.truncate(4);
        let view = state.render(&table);
        assert_eq!(view.pagination.page, 2);
        assert_eq!(view.page_rows.len(), 1);
    }

    #[test]
    fn test_select_all_uses_page_rows() {
        let table = table();
        let mut state = GridState::new(&table);
        state.set_page_size(3);
        state.select_row(RowId::from(7), true);

        let view = state.render(&table);
        state.select_all(true, &view.page_rows);
        assert_eq!(state.selection().len(), 3);
        assert!(!state.selection().contains(&RowId::from(7)));

        state.clear_selection();
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_sync_columns_drops_stale_directives() {
        let mut table = table();
        let mut state = GridState::new(&table);
        state.toggle_sort(&table, "salary", false);
        state.apply_filter(FilterConfig::text("name", "1"));

        table.columns.retain(|c| c.id != "salary");
        state.sync_columns(&table);

        assert!(state.sort_by().is_empty());
        assert_eq!(state.filters().len(), 1);
        assert_eq!(state.layout().order(), &["name", "notes"]);
    }
}
