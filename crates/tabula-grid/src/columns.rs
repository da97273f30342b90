//! Column order, width overrides and visibility

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tabula_core::ColumnConfig;

/// Per-view column layout.
///
/// Tracks the display order of column ids, user width overrides and the set
/// of hidden columns. The column descriptors themselves stay on the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    order: Vec<String>,
    widths: IndexMap<String, f64>,
    hidden: IndexSet<String>,
}

impl ColumnLayout {
    /// Layout with the table's own column order, no overrides, all visible
    pub fn from_columns(columns: &[ColumnConfig]) -> Self {
        Self {
            order: columns.iter().map(|c| c.id.clone()).collect(),
            widths: IndexMap::new(),
            hidden: IndexSet::new(),
        }
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Reconcile with an edited column list: new columns are appended at the
    /// end, state for removed columns is dropped.
    pub fn sync(&mut self, columns: &[ColumnConfig]) {
        let exists = |id: &String| columns.iter().any(|c| &c.id == id);
        self.order.retain(exists);
        self.widths.retain(|id, _| exists(id));
        self.hidden.retain(exists);

        for column in columns {
            if !self.order.contains(&column.id) {
                self.order.push(column.id.clone());
            }
        }
    }

    /// Move the column at `from` so that it ends up at index `to`.
    ///
    /// Returns false (and leaves the order untouched) if either index is out
    /// of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        let moved = self.order.remove(from);
        self.order.insert(to, moved);
        true
    }

    /// Record a width override, clamped to `min_width`. Returns the stored width.
    pub fn set_width(&mut self, column_id: &str, width: f64, min_width: f64) -> f64 {
        let width = if width.is_finite() {
            width.max(min_width)
        } else {
            min_width
        };
        self.widths.insert(column_id.to_string(), width);
        width
    }

    pub fn width_override(&self, column_id: &str) -> Option<f64> {
        self.widths.get(column_id).copied()
    }

    /// Flip a column's visibility. Returns true if the column is now visible.
    pub fn toggle(&mut self, column_id: &str) -> bool {
        if self.hidden.shift_remove(column_id) {
            true
        } else {
            self.hidden.insert(column_id.to_string());
            false
        }
    }

    pub fn is_visible(&self, column_id: &str) -> bool {
        !self.hidden.contains(column_id)
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Visible column descriptors in display order
    pub fn visible_columns<'a>(&self, columns: &'a [ColumnConfig]) -> Vec<&'a ColumnConfig> {
        self.order
            .iter()
            .filter(|id| self.is_visible(id))
            .filter_map(|id| columns.iter().find(|c| &c.id == id))
            .collect()
    }
}
