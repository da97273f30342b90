//! Per-column filter evaluation

use crate::{FilterConfig, FilterPredicate, Row, Value};

impl FilterPredicate {
    /// Evaluate the predicate against a single cell.
    pub fn matches(&self, cell: &Value) -> bool {
        match self {
            Self::Text { value } => cell
                .to_string()
                .to_lowercase()
                .contains(&value.to_lowercase()),

            // Cells that don't coerce to a finite number never pass,
            // whatever the bounds.
            Self::Range { min, max } => match cell.as_number() {
                Some(n) => {
                    n >= min.unwrap_or(f64::NEG_INFINITY) && n <= max.unwrap_or(f64::INFINITY)
                }
                None => false,
            },

            Self::Select { values } => {
                if cell.is_null() {
                    return false;
                }
                let cell = cell.to_string();
                values
                    .as_ref()
                    .is_some_and(|values| values.iter().any(|v| *v == cell))
            }

            Self::Unsupported => true,
        }
    }
}

impl FilterConfig {
    /// Evaluate this filter against a row
    pub fn matches(&self, row: &Row) -> bool {
        self.predicate.matches(row.get(&self.column_id))
    }
}

/// Keep the rows that pass every filter, in their original order.
pub fn apply_filters(rows: &[Row], filters: &[FilterConfig]) -> Vec<Row> {
    rows.iter()
        .filter(|row| filters.iter().all(|filter| filter.matches(row)))
        .cloned()
        .collect()
}
