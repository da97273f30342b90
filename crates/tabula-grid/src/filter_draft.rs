//! Editable filter form state for one column

use std::collections::BTreeSet;

use tabula_core::{ColumnConfig, ColumnType, FilterConfig, FilterPredicate, Row};

/// Unapplied filter inputs for a column.
///
/// Inputs are kept as typed text. `to_filter` turns them into the filter
/// shape implied by the column type, or `None` when the inputs are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDraft {
    pub text: String,
    pub min: String,
    pub max: String,
    pub selected: Vec<String>,
}

impl FilterDraft {
    /// Seed a draft from the column's currently applied filter
    pub fn from_filter(filter: Option<&FilterConfig>) -> Self {
        let mut draft = Self::default();
        match filter.map(|f| &f.predicate) {
            Some(FilterPredicate::Text { value }) => draft.text = value.clone(),
            Some(FilterPredicate::Range { min, max }) => {
                draft.min = min.map(|n| n.to_string()).unwrap_or_default();
                draft.max = max.map(|n| n.to_string()).unwrap_or_default();
            }
            Some(FilterPredicate::Select { values }) => {
                draft.selected = values.clone().unwrap_or_default();
            }
            Some(FilterPredicate::Unsupported) | None => {}
        }
        draft
    }

    /// Check or uncheck a select option
    pub fn toggle_value(&mut self, value: &str) {
        if let Some(ix) = self.selected.iter().position(|v| v == value) {
            self.selected.remove(ix);
        } else {
            self.selected.push(value.to_string());
        }
    }

    /// Reset the inputs. The applied filter is left alone.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the filter for `column`, or `None` if the inputs describe no filter
    pub fn to_filter(&self, column: &ColumnConfig) -> Option<FilterConfig> {
        match column.column_type {
            ColumnType::Text => {
                let value = self.text.trim();
                (!value.is_empty()).then(|| FilterConfig::text(&column.id, value))
            }
            ColumnType::Number => {
                let min = parse_bound(&self.min);
                let max = parse_bound(&self.max);
                (min.is_some() || max.is_some()).then(|| FilterConfig::range(&column.id, min, max))
            }
            ColumnType::Select => (!self.selected.is_empty())
                .then(|| FilterConfig::select(&column.id, self.selected.iter().cloned())),
        }
    }
}

fn parse_bound(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Sorted distinct non-null values of a column, as offered by a select filter
pub fn distinct_values(rows: &[Row], column_id: &str) -> Vec<String> {
    rows.iter()
        .map(|row| row.get(column_id))
        .filter(|value| !value.is_null())
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
