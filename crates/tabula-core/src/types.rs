//! Core types for Tabula

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Result, TabulaError};

/// A single cell value.
///
/// Cells are loosely typed: a `number` column may still hold text typed by a
/// user, so comparison and coercion rules live on the value, not the column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (JSON `null` or a missing key)
    #[default]
    Null,
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

static MISSING: Value = Value::Null;

impl Value {
    /// Check if the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get the text content
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to a finite number.
    ///
    /// Text is trimmed and parsed; blank text, unparsable text, non-finite
    /// results and `Null` all yield `None`. Unlike JavaScript's `Number()`,
    /// null and blank never coerce to `0`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            Value::Null => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            // -0 reads as 0
            Value::Number(n) if *n == 0.0 => f.write_str("0"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Stable row identity. Unique within a table and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Number(n)
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        RowId::Number(n as i64)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

/// A row of a table: an id plus one cell per column id.
///
/// Serializes as a flat object, `{"id": 1, "name": "Emma", "salary": 50000}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    #[serde(flatten)]
    pub cells: IndexMap<String, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: IndexMap::new(),
        }
    }

    /// Builder-style cell assignment
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }

    /// Get a cell by column id. Missing keys read as `Value::Null`.
    pub fn get(&self, column_id: &str) -> &Value {
        self.cells.get(column_id).unwrap_or(&MISSING)
    }

    /// Set a cell value
    pub fn set(&mut self, column_id: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column_id.into(), value.into());
    }
}

/// Column data type.
///
/// Decides which filter shape the column offers: `text` columns get a
/// substring filter, `number` columns a range filter, `select` columns a
/// match-any value list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Select,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Select => "Select",
        }
    }

    pub fn all() -> &'static [ColumnType] {
        &[Self::Text, Self::Number, Self::Select]
    }
}

fn default_true() -> bool {
    true
}

/// Column descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Column id, unique within a table
    pub id: String,
    /// Display name
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Preferred width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ColumnConfig {
    /// Create a sortable, filterable column without a preferred width
    pub fn new(id: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            column_type,
            sortable: true,
            filterable: true,
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }
}

/// A table: ordered columns plus its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub data: Vec<Row>,
}

impl TableDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Get a column descriptor by id
    pub fn column(&self, column_id: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Get a row by id
    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.data.iter().find(|r| &r.id == id)
    }

    /// Check the identity invariants: unique column ids, unique row ids and
    /// positive column widths.
    pub fn validate(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(TabulaError::DuplicateColumn(column.id.clone()));
            }
            if let Some(width) = column.width {
                if !(width.is_finite() && width > 0.0) {
                    return Err(TabulaError::InvalidWidth {
                        column: column.id.clone(),
                        width,
                    });
                }
            }
        }

        let mut row_ids = HashSet::new();
        for row in &self.data {
            if !row_ids.insert(&row.id) {
                return Err(TabulaError::DuplicateRow(row.id.to_string()));
            }
        }

        Ok(())
    }

    /// Parse and validate a table definition from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let table: TableDefinition = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
