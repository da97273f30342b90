//! Sort and filter directive types
//!
//! Shared declarative structures describing how a table is viewed. A sort
//! specification is an ordered `Vec<SortConfig>` (first entry = primary key),
//! a filter specification a `Vec<FilterConfig>` with at most one entry per
//! column. Use `update_sort` / `update_filters` to change them so the
//! one-entry-per-column invariant holds.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison result for this direction
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A single sort key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    /// Column id to sort by
    pub column_id: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Ascending)
    }

    pub fn descending(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Descending)
    }
}

/// The predicate part of a filter, tagged by shape.
///
/// Unknown shapes deserialize to `Unsupported`, which lets every row through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterPredicate {
    /// Case-insensitive substring match
    Text { value: String },
    /// Inclusive numeric bounds, either side optional
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Match any of the stringified values
    Select {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
    },
    #[serde(other)]
    Unsupported,
}

impl FilterPredicate {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text { .. } => "contains",
            Self::Range { .. } => "is between",
            Self::Select { .. } => "is in list",
            Self::Unsupported => "[Unsupported]",
        }
    }
}

/// A filter directive bound to one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Column the filter applies to
    pub column_id: String,
    #[serde(flatten)]
    pub predicate: FilterPredicate,
}

impl FilterConfig {
    pub fn new(column_id: impl Into<String>, predicate: FilterPredicate) -> Self {
        Self {
            column_id: column_id.into(),
            predicate,
        }
    }

    /// Substring filter
    pub fn text(column_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            column_id,
            FilterPredicate::Text {
                value: value.into(),
            },
        )
    }

    /// Inclusive range filter
    pub fn range(column_id: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(column_id, FilterPredicate::Range { min, max })
    }

    /// Match-any filter
    pub fn select<I, S>(column_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            column_id,
            FilterPredicate::Select {
                values: Some(values.into_iter().map(Into::into).collect()),
            },
        )
    }

    /// Human readable summary, e.g. `salary is between 10 and 20`
    pub fn describe(&self) -> String {
        match &self.predicate {
            FilterPredicate::Text { value } => format!("{} contains \"{}\"", self.column_id, value),
            FilterPredicate::Range { min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    format!("{} is between {} and {}", self.column_id, min, max)
                }
                (Some(min), None) => format!("{} >= {}", self.column_id, min),
                (None, Some(max)) => format!("{} <= {}", self.column_id, max),
                (None, None) => format!("{} is any number", self.column_id),
            },
            FilterPredicate::Select { values } => format!(
                "{} is in ({})",
                self.column_id,
                values.as_deref().unwrap_or_default().join(", ")
            ),
            FilterPredicate::Unsupported => format!("{} [unsupported filter]", self.column_id),
        }
    }
}
