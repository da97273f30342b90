//! Error types for Tabula

use thiserror::Error;

/// Core error type for table definitions and editing operations.
///
/// The query engine itself never fails; these errors only come from loading,
/// validating or editing a `TableDefinition`.
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("Duplicate row id: {0}")]
    DuplicateRow(String),

    #[error("Invalid width {width} for column '{column}'")]
    InvalidWidth { column: String, width: f64 },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Tabula operations
pub type Result<T> = std::result::Result<T, TabulaError>;
