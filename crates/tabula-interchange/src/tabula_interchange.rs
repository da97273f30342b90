//! Tabula Interchange - export of materialized views
//!
//! Every encoder takes the already filtered and sorted rows plus the visible
//! columns in display order. Nothing here re-runs the query engine.
//!
//! - `csv_export` - UTF-8 CSV with a byte order mark
//! - `xlsx_export` - single-sheet Excel workbook with fitted column widths
//! - `pdf_export` - titled table on landscape pages
//! - `json_export` - array of row objects limited to the visible columns
//!
//! `export_view` wraps them into a call that reports an `ExportOutcome`
//! instead of failing.

pub mod csv_export;
mod exporter;
pub mod json_export;
pub mod pdf_export;
pub mod xlsx_export;

pub use exporter::{
    ExportError, ExportFormat, ExportOptions, ExportOutcome, default_path, export_view,
    export_view_with,
};
