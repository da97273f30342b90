//! Multi-column sorting
//!
//! Sort keys are evaluated in priority order; a key only breaks ties left by
//! the keys before it. Absent values always sort last, whatever the direction.

use std::cell::RefCell;
use std::cmp::Ordering;

use feruca::{Collator, Tailoring};

use crate::{Row, SortConfig, Value};

/// Compare two rows using all sort keys in priority order
pub fn compare_rows(a: &Row, b: &Row, sort_by: &[SortConfig]) -> Ordering {
    for sort in sort_by {
        let ordering = match (a.get(&sort.column_id), b.get(&sort.column_id)) {
            // Both absent: this key can't tell them apart
            (Value::Null, Value::Null) => continue,
            // Nulls last, independent of direction
            (Value::Null, _) => return Ordering::Greater,
            (_, Value::Null) => return Ordering::Less,
            (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
            (x, y) => locale_compare(&x.to_string(), &y.to_string()),
        };

        if ordering != Ordering::Equal {
            return sort.direction.apply(ordering);
        }
    }
    Ordering::Equal
}

/// Sort rows in place. Stable: rows tied on every key keep their order.
pub fn sort_rows(rows: &mut [Row], sort_by: &[SortConfig]) {
    if sort_by.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare_rows(a, b, sort_by));
}

/// Return a sorted copy of `rows`
pub fn apply_sort(rows: &[Row], sort_by: &[SortConfig]) -> Vec<Row> {
    let mut sorted = rows.to_vec();
    sort_rows(&mut sorted, sort_by);
    sorted
}

thread_local! {
    // CLDR root order with punctuation kept significant
    static COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::default(), false, true));
}

/// Locale-aware string ordering (Unicode Collation Algorithm, CLDR root).
///
/// Accents and case only break ties between otherwise equal letters, so
/// `"Álvaro"` sorts before `"Bruno"` and `"a"` before `"A"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}
