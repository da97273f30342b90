//! Interaction state reducer
//!
//! Computes the next sort or filter specification from a user interaction
//! with a column header. These are the only sanctioned way to change the
//! specifications, which keeps at most one entry per column.

use crate::{FilterConfig, SortConfig, SortDirection};

/// Sort state of one column: unsorted -> ascending -> descending -> unsorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortState {
    /// Read the current state of a column from a sort specification
    pub fn of(sort_by: &[SortConfig], column_id: &str) -> Self {
        sort_by
            .iter()
            .find(|s| s.column_id == column_id)
            .map(|s| s.direction.into())
            .unwrap_or_default()
    }

    /// The state after one more click
    pub fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    pub fn direction(self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Ascending => Some(SortDirection::Ascending),
            Self::Descending => Some(SortDirection::Descending),
        }
    }
}

impl From<SortDirection> for SortState {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Self::Ascending,
            SortDirection::Descending => Self::Descending,
        }
    }
}

/// How a header click combines with the existing sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Plain click: the clicked column becomes the only sort key
    #[default]
    Replace,
    /// Modified click (e.g. shift): keep other keys, edit this one in place
    Additive,
}

impl From<bool> for SortMode {
    fn from(additive: bool) -> Self {
        if additive {
            Self::Additive
        } else {
            Self::Replace
        }
    }
}

/// Advance the sort state of `column_id` by one click.
///
/// Replace mode yields at most one key. Additive mode appends a new key at
/// the lowest priority, flips an ascending key in place, and removes a
/// descending key.
pub fn update_sort(current: &[SortConfig], column_id: &str, additive: bool) -> Vec<SortConfig> {
    let next = SortState::of(current, column_id).next();

    let updated = match SortMode::from(additive) {
        SortMode::Replace => next
            .direction()
            .map(|direction| vec![SortConfig::new(column_id, direction)])
            .unwrap_or_default(),
        SortMode::Additive => {
            let mut updated = current.to_vec();
            let position = updated.iter().position(|s| s.column_id == column_id);
            match (position, next.direction()) {
                (Some(ix), Some(direction)) => updated[ix].direction = direction,
                (Some(ix), None) => {
                    updated.remove(ix);
                }
                (None, Some(direction)) => updated.push(SortConfig::new(column_id, direction)),
                (None, None) => {}
            }
            updated
        }
    };

    tracing::trace!(column_id, additive, keys = updated.len(), "Sort updated");
    updated
}

/// Upsert a filter by column: drop any existing filter on the same column,
/// then append the new one. The old filter is replaced, never merged.
pub fn update_filters(current: &[FilterConfig], new_filter: FilterConfig) -> Vec<FilterConfig> {
    let mut updated: Vec<FilterConfig> = current
        .iter()
        .filter(|f| f.column_id != new_filter.column_id)
        .cloned()
        .collect();
    updated.push(new_filter);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_mode_cycle() {
        let step1 = update_sort(&[], "x", false);
        assert_eq!(step1, vec![SortConfig::ascending("x")]);

        let step2 = update_sort(&step1, "x", false);
        assert_eq!(step2, vec![SortConfig::descending("x")]);

        let step3 = update_sort(&step2, "x", false);
        assert!(step3.is_empty());
    }

    #[test]
    fn test_replace_mode_drops_other_keys() {
        let current = vec![SortConfig::ascending("a"), SortConfig::descending("b")];
        assert_eq!(
            update_sort(&current, "c", false),
            vec![SortConfig::ascending("c")]
        );
        assert_eq!(
            update_sort(&current, "a", false),
            vec![SortConfig::descending("a")]
        );
        assert!(update_sort(&current, "b", false).is_empty());
    }

    #[test]
    fn test_additive_appends_lowest_priority() {
        let current = vec![SortConfig::ascending("a")];
        assert_eq!(
            update_sort(&current, "b", true),
            vec![SortConfig::ascending("a"), SortConfig::ascending("b")]
        );
    }

    #[test]
    fn test_additive_flips_in_place_then_removes() {
        let current = vec![SortConfig::ascending("a"), SortConfig::ascending("b")];

        let flipped = update_sort(&current, "a", true);
        assert_eq!(
            flipped,
            vec![SortConfig::descending("a"), SortConfig::ascending("b")]
        );

        let removed = update_sort(&flipped, "a", true);
        assert_eq!(removed, vec![SortConfig::ascending("b")]);
    }

    #[test]
    fn test_additive_removal_shifts_priorities() {
        let current = vec![
            SortConfig::ascending("a"),
            SortConfig::descending("b"),
            SortConfig::ascending("c"),
        ];
        assert_eq!(
            update_sort(&current, "b", true),
            vec![SortConfig::ascending("a"), SortConfig::ascending("c")]
        );
    }

    #[test]
    fn test_sort_state_of() {
        let current = vec![SortConfig::descending("a")];
        assert_eq!(SortState::of(&current, "a"), SortState::Descending);
        assert_eq!(SortState::of(&current, "b"), SortState::Unsorted);
        assert_eq!(SortState::Descending.next(), SortState::Unsorted);
    }

    #[test]
    fn test_filter_upsert_replaces() {
        let current = vec![FilterConfig::range("x", Some(0.0), Some(10.0))];
        let updated = update_filters(&current, FilterConfig::range("x", Some(5.0), None));
        assert_eq!(updated, vec![FilterConfig::range("x", Some(5.0), None)]);
    }

    #[test]
    fn test_filter_upsert_moves_to_end() {
        let current = vec![
            FilterConfig::text("name", "em"),
            FilterConfig::select("status", ["Active"]),
        ];
        let updated = update_filters(&current, FilterConfig::text("name", "li"));
        assert_eq!(
            updated,
            vec![
                FilterConfig::select("status", ["Active"]),
                FilterConfig::text("name", "li"),
            ]
        );
    }

    #[test]
    fn test_filter_upsert_can_change_shape() {
        let current = vec![FilterConfig::text("x", "1")];
        let updated = update_filters(&current, FilterConfig::range("x", None, Some(3.0)));
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0], FilterConfig::range("x", None, Some(3.0)));
    }
}
