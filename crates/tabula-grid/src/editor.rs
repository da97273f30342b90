//! Table editor
//!
//! Builds or edits a `TableDefinition` one operation at a time, the way the
//! table manager dialog does. Column and row ids are drawn from monotonic
//! counters and are never handed out twice by the same editor, even after
//! the entity that held them was removed.

use tabula_core::{
    ColumnConfig, ColumnType, Result, Row, RowId, TableDefinition, TabulaError, Value,
};
use uuid::Uuid;

const NEW_COLUMN_WIDTH: f64 = 200.0;

/// Partial update of a column descriptor. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPatch {
    pub label: Option<String>,
    pub column_type: Option<ColumnType>,
    pub sortable: Option<bool>,
    pub filterable: Option<bool>,
    pub width: Option<f64>,
}

impl ColumnPatch {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = Some(filterable);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TableEditor {
    id: String,
    name: String,
    columns: Vec<ColumnConfig>,
    data: Vec<Row>,
    next_column: u64,
    next_row: u64,
}

impl Default for TableEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableEditor {
    /// Start a new table: one text column and one empty row
    pub fn new() -> Self {
        let mut editor = Self {
            id: format!("table_{}", Uuid::new_v4().simple()),
            name: String::new(),
            columns: Vec::new(),
            data: Vec::new(),
            next_column: 1,
            next_row: 1,
        };
        editor.add_column();
        editor.add_row();
        editor
    }

    /// Edit an existing table. The table keeps its id.
    pub fn edit(table: TableDefinition) -> Self {
        let next_column = table
            .columns
            .iter()
            .filter_map(|c| id_suffix(&c.id, "col_"))
            .max()
            .map_or(1, |n| n + 1);
        let next_row = table
            .data
            .iter()
            .filter_map(|r| match &r.id {
                RowId::Text(id) => id_suffix(id, "row_"),
                RowId::Number(_) => None,
            })
            .max()
            .map_or(1, |n| n + 1);

        Self {
            id: table.id,
            name: table.name,
            columns: table.columns,
            data: table.data,
            next_column,
            next_row,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.data
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a text column labelled "Column N" and give every row an empty
    /// cell for it. Returns the new column's id.
    pub fn add_column(&mut self) -> String {
        let id = loop {
            let candidate = format!("col_{}", self.next_column);
            self.next_column += 1;
            if !self.columns.iter().any(|c| c.id == candidate) {
                break candidate;
            }
        };

        let label = format!("Column {}", self.columns.len() + 1);
        self.columns
            .push(ColumnConfig::new(&id, label, ColumnType::Text).with_width(NEW_COLUMN_WIDTH));
        for row in &mut self.data {
            row.set(&id, "");
        }

        tracing::debug!(column_id = %id, "Added column");
        id
    }

    /// Remove a column and its cells. The last column cannot be removed.
    pub fn remove_column(&mut self, column_id: &str) -> Result<()> {
        let ix = self.column_index(column_id)?;
        if self.columns.len() == 1 {
            return Err(TabulaError::InvalidTable(
                "a table needs at least one column".to_string(),
            ));
        }

        self.columns.remove(ix);
        for row in &mut self.data {
            row.cells.shift_remove(column_id);
        }

        tracing::debug!(column_id, "Removed column");
        Ok(())
    }

    pub fn update_column(&mut self, column_id: &str, patch: ColumnPatch) -> Result<()> {
        let ix = self.column_index(column_id)?;
        if let Some(width) = patch.width {
            if !(width.is_finite() && width > 0.0) {
                return Err(TabulaError::InvalidWidth {
                    column: column_id.to_string(),
                    width,
                });
            }
        }

        let column = &mut self.columns[ix];
        if let Some(label) = patch.label {
            column.label = label;
        }
        if let Some(column_type) = patch.column_type {
            column.column_type = column_type;
        }
        if let Some(sortable) = patch.sortable {
            column.sortable = sortable;
        }
        if let Some(filterable) = patch.filterable {
            column.filterable = filterable;
        }
        if let Some(width) = patch.width {
            column.width = Some(width);
        }
        Ok(())
    }

    /// Append a row with an empty text cell per column. Returns its id.
    pub fn add_row(&mut self) -> RowId {
        let id = loop {
            let candidate = RowId::Text(format!("row_{}", self.next_row));
            self.next_row += 1;
            if !self.data.iter().any(|r| r.id == candidate) {
                break candidate;
            }
        };

        let mut row = Row::new(id.clone());
        for column in &self.columns {
            row.set(&column.id, "");
        }
        self.data.push(row);
        id
    }

    pub fn remove_row(&mut self, id: &RowId) -> Result<()> {
        let ix = self.row_index(id)?;
        self.data.remove(ix);
        Ok(())
    }

    /// Set a cell from user input.
    ///
    /// Text typed into a number column is stored as a number when it parses,
    /// and as null when blank, so it sorts and filters numerically.
    pub fn update_cell(
        &mut self,
        id: &RowId,
        column_id: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let column_ix = self.column_index(column_id)?;
        let row_ix = self.row_index(id)?;

        let value = match (self.columns[column_ix].column_type, value.into()) {
            (ColumnType::Number, Value::Text(text)) if text.trim().is_empty() => Value::Null,
            (ColumnType::Number, Value::Text(text)) => match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Number(n),
                _ => Value::Text(text),
            },
            (_, value) => value,
        };

        self.data[row_ix].set(column_id, value);
        Ok(())
    }

    /// Whether `finish` would succeed on the name and column checks
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.columns.is_empty()
    }

    /// Produce the edited table definition
    pub fn finish(self) -> Result<TableDefinition> {
        if self.name.trim().is_empty() {
            return Err(TabulaError::InvalidTable(
                "table name must not be blank".to_string(),
            ));
        }
        if self.columns.is_empty() {
            return Err(TabulaError::InvalidTable(
                "a table needs at least one column".to_string(),
            ));
        }

        let table = TableDefinition {
            id: self.id,
            name: self.name,
            columns: self.columns,
            data: self.data,
        };
        table.validate()?;

        tracing::info!(
            table_id = %table.id,
            columns = table.columns.len(),
            rows = table.data.len(),
            "Table saved"
        );
        Ok(table)
    }

    fn column_index(&self, column_id: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| TabulaError::ColumnNotFound(column_id.to_string()))
    }

    fn row_index(&self, id: &RowId) -> Result<usize> {
        self.data
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| TabulaError::RowNotFound(id.to_string()))
    }
}

fn id_suffix(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_table_defaults() {
        let editor = TableEditor::new();
        assert!(editor.id().starts_with("table_"));
        assert_eq!(editor.columns().len(), 1);

        let column = &editor.columns()[0];
        assert_eq!(column.id, "col_1");
        assert_eq!(column.label, "Column 1");
        assert_eq!(column.column_type, ColumnType::Text);
        assert_eq!(column.width, Some(200.0));

        assert_eq!(editor.rows().len(), 1);
        assert_eq!(editor.rows()[0].id, RowId::from("row_1"));
        assert_eq!(editor.rows()[0].get("col_1"), &Value::from(""));
    }

    #[test]
    fn test_add_column_fills_rows() {
        let mut editor = TableEditor::new();
        editor.add_row();
        let id = editor.add_column();

        assert_eq!(id, "col_2");
        assert_eq!(editor.columns()[1].label, "Column 2");
        assert!(editor.rows().iter().all(|r| r.get(&id) == &Value::from("")));
    }

    #[test]
    fn test_remove_column_drops_cells() {
        let mut editor = TableEditor::new();
        let id = editor.add_column();
        editor.remove_column(&id).unwrap();

        assert_eq!(editor.columns().len(), 1);
        assert!(!editor.rows()[0].cells.contains_key(&id));
    }

    #[test]
    fn test_cannot_remove_last_column() {
        let mut editor = TableEditor::new();
        assert!(matches!(
            editor.remove_column("col_1"),
            Err(TabulaError::InvalidTable(_))
        ));
        assert!(matches!(
            editor.remove_column("nope"),
            Err(TabulaError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut editor = TableEditor::new();
        let second = editor.add_column();
        editor.remove_column(&second).unwrap();
        assert_eq!(editor.add_column(), "col_3");

        let row = editor.add_row();
        editor.remove_row(&row).unwrap();
        assert_eq!(editor.add_row(), RowId::from("row_3"));
    }

    #[test]
    fn test_update_column() {
        let mut editor = TableEditor::new();
        editor
            .update_column(
                "col_1",
                ColumnPatch::default()
                    .label("Salary")
                    .column_type(ColumnType::Number)
                    .sortable(false),
            )
            .unwrap();

        let column = &editor.columns()[0];
        assert_eq!(column.label, "Salary");
        assert_eq!(column.column_type, ColumnType::Number);
        assert!(!column.sortable);
        assert!(column.filterable);

        assert!(matches!(
            editor.update_column("col_1", ColumnPatch::default().width(-1.0)),
            Err(TabulaError::InvalidWidth { .. })
        ));
    }

    #[test]
    fn test_update_cell_coerces_number_columns() {
        let mut editor = TableEditor::new();
        editor
            .update_column("col_1", ColumnPatch::default().column_type(ColumnType::Number))
            .unwrap();
        let row = RowId::from("row_1");

        editor.update_cell(&row, "col_1", "42").unwrap();
        assert_eq!(editor.rows()[0].get("col_1"), &Value::Number(42.0));

        editor.update_cell(&row, "col_1", " ").unwrap();
        assert!(editor.rows()[0].get("col_1").is_null());

        editor.update_cell(&row, "col_1", "n/a").unwrap();
        assert_eq!(editor.rows()[0].get("col_1"), &Value::from("n/a"));

        assert!(matches!(
            editor.update_cell(&RowId::from("row_9"), "col_1", "1"),
            Err(TabulaError::RowNotFound(_))
        ));
    }

    #[test]
    fn test_finish_requires_name() {
        let editor = TableEditor::new();
        assert!(!editor.is_valid());
        assert!(matches!(editor.finish(), Err(TabulaError::InvalidTable(_))));

        let mut editor = TableEditor::new();
        editor.rename("  Sales 2024 ");
        let table = editor.finish().unwrap();
        assert_eq!(table.name, "  Sales 2024 ");
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn test_edit_continues_counters() {
        let mut table = TableDefinition::new("table_1", "People");
        table
            .columns
            .push(ColumnConfig::new("col_7", "Name", ColumnType::Text));
        table.data.push(Row::new("row_4").with("col_7", "Emma"));
        table.data.push(Row::new(12).with("col_7", "Liam"));

        let mut editor = TableEditor::edit(table);
        assert_eq!(editor.id(), "table_1");
        assert_eq!(editor.add_column(), "col_8");
        assert_eq!(editor.add_row(), RowId::from("row_5"));
    }
}
