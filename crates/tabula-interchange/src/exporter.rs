//! Export entry point and error reporting

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tabula_core::{ColumnConfig, Row};
use thiserror::Error;

use crate::{csv_export, json_export, pdf_export, xlsx_export};

/// Errors during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: no visible columns")]
    NoColumns,

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Too many {what} for a worksheet: {count}")]
    SheetLimit { what: &'static str, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel encoding error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF encoding error: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xlsx => "Excel",
            Self::Pdf => "PDF",
            Self::Json => "JSON",
        }
    }

    pub fn all() -> &'static [ExportFormat] {
        &[Self::Csv, Self::Xlsx, Self::Pdf, Self::Json]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Encoder settings shared by all formats
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Document title, printed above the PDF table
    pub title: String,
    /// Worksheet name used by the Excel encoder
    pub sheet_name: String,
    /// Upper bound for fitted Excel column widths, in characters
    pub max_column_width: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Table".to_string(),
            sheet_name: "Data".to_string(),
            max_column_width: 50.0,
        }
    }
}

impl ExportOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn with_max_column_width(mut self, width: f64) -> Self {
        self.max_column_width = width;
        self
    }
}

/// User-facing result of an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub success: bool,
    pub message: String,
    /// Written file, on success
    pub path: Option<PathBuf>,
}

/// `<dir>/<stem>.<extension>`
pub fn default_path(dir: &Path, stem: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{}.{}", stem, format.extension()))
}

/// Export with default options. See `export_view_with`.
pub fn export_view(
    format: ExportFormat,
    rows: &[Row],
    columns: &[&ColumnConfig],
    path: &Path,
) -> ExportOutcome {
    export_view_with(format, rows, columns, path, &ExportOptions::default())
}

/// Encode `rows` restricted to `columns` and write them to `path`.
///
/// Failures are logged and reported in the outcome; this never panics or
/// returns an error.
pub fn export_view_with(
    format: ExportFormat,
    rows: &[Row],
    columns: &[&ColumnConfig],
    path: &Path,
    options: &ExportOptions,
) -> ExportOutcome {
    match write(format, rows, columns, path, options) {
        Ok(()) => {
            tracing::info!(
                format = %format,
                rows = rows.len(),
                columns = columns.len(),
                path = %path.display(),
                "Export finished"
            );
            ExportOutcome {
                success: true,
                message: format!(
                    "Exported {} rows to {} ({})",
                    rows.len(),
                    path.display(),
                    format.label()
                ),
                path: Some(path.to_path_buf()),
            }
        }
        Err(e) => {
            tracing::error!(format = %format, path = %path.display(), error = %e, "Export failed");
            ExportOutcome {
                success: false,
                message: format!("{} export failed: {}", format.label(), e),
                path: None,
            }
        }
    }
}

fn write(
    format: ExportFormat,
    rows: &[Row],
    columns: &[&ColumnConfig],
    path: &Path,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    if columns.is_empty() {
        return Err(ExportError::NoColumns);
    }

    match format {
        ExportFormat::Csv => std::fs::write(path, csv_export::encode_csv(rows, columns))?,
        ExportFormat::Json => std::fs::write(path, json_export::encode_json(rows, columns)?)?,
        ExportFormat::Xlsx => xlsx_export::write_xlsx(rows, columns, path, options)?,
        ExportFormat::Pdf => pdf_export::write_pdf(rows, columns, path, options)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            "odt".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "odt"
        ));
        assert_eq!(ExportFormat::all().len(), 4);
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            default_path(Path::new("/tmp"), "table", ExportFormat::Xlsx),
            PathBuf::from("/tmp/table.xlsx")
        );
    }

    #[test]
    fn test_no_columns_is_reported() {
        let outcome = export_view(
            ExportFormat::Csv,
            &[Row::new(1)],
            &[],
            Path::new("unused.csv"),
        );
        assert!(!outcome.success);
        assert!(outcome.message.contains("no visible columns"));
        assert_eq!(outcome.path, None);
    }
}
