//! Tabula Core - data model and query engine for the table builder
//!
//! This crate holds everything with non-trivial semantics in Tabula:
//!
//! - `Value`, `Row`, `ColumnConfig`, `TableDefinition` - the data model
//! - `SortConfig`, `FilterConfig` - declarative view directives
//! - `apply_filters`, `apply_sort`, `process_data` - the query engine
//! - `update_sort`, `update_filters` - the interaction state reducer
//!
//! Every engine function is pure: inputs are read-only snapshots and the
//! results are freshly built sequences. Nothing here performs I/O.

mod error;
mod filter_types;
pub mod query;
mod reducer;
mod types;

pub use error::*;
pub use filter_types::*;
pub use query::{ViewOptions, apply_filters, apply_sort, locale_compare, process_data, sort_rows};
pub use reducer::{SortMode, SortState, update_filters, update_sort};
pub use types::*;
