//! Query engine
//!
//! Turns a raw dataset plus sort/filter directives into the materialized
//! view the grid renders. Filtering always runs before sorting.

mod filtering;
mod sorting;

pub use filtering::apply_filters;
pub use sorting::{apply_sort, compare_rows, locale_compare, sort_rows};

use serde::{Deserialize, Serialize};

use crate::{FilterConfig, Row, SortConfig};

/// The directives that shape a view of a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    #[serde(default)]
    pub sort_by: Vec<SortConfig>,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

impl ViewOptions {
    pub fn new(sort_by: Vec<SortConfig>, filters: Vec<FilterConfig>) -> Self {
        Self { sort_by, filters }
    }

    pub fn is_empty(&self) -> bool {
        self.sort_by.is_empty() && self.filters.is_empty()
    }
}

/// Filter then sort. Sorting never restores filtered-out rows.
pub fn process_data(rows: &[Row], options: &ViewOptions) -> Vec<Row> {
    let mut result = apply_filters(rows, &options.filters);
    sort_rows(&mut result, &options.sort_by);

    tracing::debug!(
        input_rows = rows.len(),
        output_rows = result.len(),
        filters = options.filters.len(),
        sort_keys = options.sort_by.len(),
        "Processed table data"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortConfig;

    #[test]
    fn test_filter_runs_before_sort() {
        // Sorted ascending by salary, row 2 would come first; the filter
        // removes it, so row 3 must lead.
        let rows = vec![
            Row::new(1).with("name", "Emma").with("salary", 50000),
            Row::new(2).with("name", "Liam").with("salary", 30000),
            Row::new(3).with("name", "Olivia").with("salary", 40000),
        ];
        let options = ViewOptions::new(
            vec![SortConfig::ascending("salary")],
            vec![FilterConfig::range("salary", Some(35000.0), None)],
        );

        let result = process_data(&rows, &options);
        let ids: Vec<_> = result.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_empty_options_keep_rows() {
        let rows = vec![Row::new(2), Row::new(1)];
        let result = process_data(&rows, &ViewOptions::default());
        assert_eq!(result, rows);
    }
}
