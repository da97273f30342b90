//! Tabula Grid - presentation state for a table view
//!
//! Owns everything the grid keeps between recomputations: pagination,
//! column order/width/visibility, row selection and the applied sort and
//! filter specifications. The materialized rows always come from
//! `tabula_core::process_data`; pagination is a plain slice taken after it.
//!
//! Also hosts the two editing collaborators of a grid: `FilterDraft` for the
//! per-column filter popover and `TableEditor` for creating and editing table
//! definitions.

mod columns;
mod editor;
mod filter_draft;
mod pagination;
mod selection;
mod state;

pub use columns::ColumnLayout;
pub use editor::{ColumnPatch, TableEditor};
pub use filter_draft::{FilterDraft, distinct_values};
pub use pagination::Pagination;
pub use selection::{RowSelection, SelectionState};
pub use state::{GridOptions, GridState, GridView, SortIndicator};
