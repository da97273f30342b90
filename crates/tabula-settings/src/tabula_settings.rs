//! Tabula Settings
//!
//! User preferences stored as JSON in `<config_dir>/tabula/settings.json`:
//! - Grid defaults (page size, page size choices, column widths)
//! - Export defaults (file stem, Excel sheet name and width cap)
//! - Logging default filter
//!
//! Every section and field falls back to its default when missing, so older
//! or partial files keep loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod settings_file;

pub use settings_file::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TabulaSettings {
    pub grid: GridSettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

impl TabulaSettings {
    /// Load from the default location, or defaults if there is no file yet
    pub fn load() -> Result<Self> {
        Self::load_from(&settings_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let mut settings: Self =
            serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&settings_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    /// Replace values that would break the grid with their defaults
    fn sanitize(&mut self) {
        let defaults = GridSettings::default();
        if self.grid.default_page_size == 0 {
            tracing::warn!("Ignoring page size 0 in settings");
            self.grid.default_page_size = defaults.default_page_size;
        }
        self.grid.page_size_options.retain(|size| *size > 0);
        if self.grid.page_size_options.is_empty() {
            self.grid.page_size_options = defaults.page_size_options;
        }
        if !(self.grid.min_column_width.is_finite() && self.grid.min_column_width > 0.0) {
            tracing::warn!(
                width = self.grid.min_column_width,
                "Ignoring invalid minimum column width in settings"
            );
            self.grid.min_column_width = defaults.min_column_width;
        }
        if !(self.grid.default_column_width.is_finite() && self.grid.default_column_width > 0.0) {
            self.grid.default_column_width = defaults.default_column_width;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub default_column_width: f64,
    pub min_column_width: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            page_size_options: vec![25, 50, 100, 200],
            default_column_width: 150.0,
            min_column_width: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File name used when no output path is given, without extension
    pub file_stem: String,
    pub xlsx_sheet_name: String,
    pub xlsx_max_column_width: f64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_stem: "table".to_string(),
            xlsx_sheet_name: "Data".to_string(),
            xlsx_max_column_width: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
        }
    }
}
