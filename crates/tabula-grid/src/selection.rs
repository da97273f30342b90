//! Row selection bookkeeping

use indexmap::IndexSet;
use tabula_core::{Row, RowId};

/// Tri-state of a "select all" checkbox for the rows on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

/// Selected row ids, in selection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSelection {
    selected: IndexSet<RowId>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: RowId, selected: bool) {
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.shift_remove(&id);
        }
    }

    /// Replace the selection with exactly the given rows, or clear it
    pub fn select_page(&mut self, rows: &[Row], selected: bool) {
        self.selected.clear();
        if selected {
            self.selected.extend(rows.iter().map(|r| r.id.clone()));
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    /// Checkbox state for the rows currently on screen
    pub fn state_for(&self, rows: &[Row]) -> SelectionState {
        let selected = rows.iter().filter(|r| self.contains(&r.id)).count();
        match selected {
            0 => SelectionState::None,
            n if n == rows.len() => SelectionState::All,
            _ => SelectionState::Partial,
        }
    }
}
