//! `tabula` - view, filter, sort and export table definitions from the terminal

mod args;
mod logging;
mod render;
mod sample;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tabula_core::{FilterConfig, TableDefinition};
use tabula_grid::{GridOptions, GridState, distinct_values};
use tabula_interchange::{ExportFormat, ExportOptions, default_path, export_view_with};
use tabula_settings::TabulaSettings;

use crate::args::{SortArg, parse_range, parse_select, parse_sort, parse_text};
use crate::logging::LoggingConfig;

#[derive(Parser)]
#[command(name = "tabula", version, about = "Smart table viewer and exporter")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "TABULA_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of a table
    View {
        /// Table definition JSON file
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Export the filtered and sorted rows
    Export {
        /// Table definition JSON file
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        #[arg(long, value_enum)]
        format: FormatArg,

        /// Output file (defaults to <file_stem>.<ext> in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the columns of a table, with the options of select columns
    Columns {
        /// Table definition JSON file
        file: PathBuf,
    },

    /// Write an employee sample table
    Sample {
        #[arg(long, default_value_t = 1000)]
        rows: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Sort, filter and visibility options shared by `view` and `export`
#[derive(Args, Debug, Default)]
struct ViewArgs {
    /// Sort key COL[:asc|:desc], repeat for tie-breakers
    #[arg(long = "sort", value_parser = parse_sort)]
    sort: Vec<SortArg>,

    /// Substring filter COL=VALUE
    #[arg(long = "text", value_parser = parse_text)]
    text: Vec<FilterConfig>,

    /// Numeric range filter COL=MIN..MAX (either bound optional)
    #[arg(long = "range", value_parser = parse_range)]
    range: Vec<FilterConfig>,

    /// Match-any filter COL=A,B,C
    #[arg(long = "select", value_parser = parse_select)]
    select: Vec<FilterConfig>,

    /// Hide a column
    #[arg(long = "hide")]
    hide: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
    Pdf,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_result = match &cli.settings {
        Some(path) => TabulaSettings::load_from(path),
        None => TabulaSettings::load(),
    };
    let logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        let filter = settings_result
            .as_ref()
            .map(|s| s.logging.default_filter.clone())
            .unwrap_or_else(|_| "info".to_string());
        LoggingConfig::default().with_default_filter(filter)
    };
    logging::init(logging)?;

    let settings = settings_result.unwrap_or_else(|err| {
        tracing::warn!("Failed to load settings, using defaults: {:#}", err);
        TabulaSettings::default()
    });

    match cli.command {
        Command::View {
            file,
            view,
            page,
            page_size,
        } => run_view(&settings, &file, &view, page, page_size),
        Command::Export {
            file,
            view,
            format,
            out,
        } => run_export(&settings, &file, &view, format.into(), out),
        Command::Columns { file } => run_columns(&file),
        Command::Sample { rows, seed, out } => run_sample(rows, seed, out),
    }
}

fn load_table(path: &Path) -> Result<TableDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read table from {:?}", path))?;
    let table = TableDefinition::from_json(&content)
        .with_context(|| format!("Invalid table definition in {:?}", path))?;
    tracing::debug!(
        table_id = %table.id,
        columns = table.columns.len(),
        rows = table.data.len(),
        "Loaded table"
    );
    Ok(table)
}

fn grid_options(settings: &TabulaSettings) -> GridOptions {
    GridOptions {
        default_page_size: settings.grid.default_page_size,
        default_column_width: settings.grid.default_column_width,
        min_column_width: settings.grid.min_column_width,
    }
}

/// Replay the command line options as grid interactions
fn build_state(
    table: &TableDefinition,
    settings: &TabulaSettings,
    args: &ViewArgs,
) -> Result<GridState> {
    let mut state = GridState::with_options(table, grid_options(settings));

    for column_id in &args.hide {
        ensure_column(table, column_id)?;
        if state.layout().is_visible(column_id) {
            state.toggle_column(column_id);
        }
    }

    for sort in &args.sort {
        ensure_column(table, &sort.column_id)?;
        if state.sort_indicator(&sort.column_id).is_some() {
            bail!("Column '{}' is sorted more than once", sort.column_id);
        }
        for _ in 0..sort.clicks() {
            if !state.toggle_sort(table, &sort.column_id, true) {
                bail!("Column '{}' is not sortable", sort.column_id);
            }
        }
    }

    for filter in args.text.iter().chain(&args.range).chain(&args.select) {
        ensure_column(table, &filter.column_id)?;
        state.apply_filter(filter.clone());
    }

    Ok(state)
}

fn ensure_column(table: &TableDefinition, column_id: &str) -> Result<()> {
    if table.column(column_id).is_none() {
        let known: Vec<_> = table.columns.iter().map(|c| c.id.as_str()).collect();
        bail!(
            "Unknown column '{}' (columns: {})",
            column_id,
            known.join(", ")
        );
    }
    Ok(())
}

fn run_view(
    settings: &TabulaSettings,
    file: &Path,
    args: &ViewArgs,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let table = load_table(file)?;
    let mut state = build_state(&table, settings, args)?;

    if let Some(page_size) = page_size {
        if page_size == 0 {
            bail!("Page size must be at least 1");
        }
        if !settings.grid.page_size_options.contains(&page_size) {
            tracing::debug!(page_size, "Page size is not one of the configured options");
        }
        state.set_page_size(page_size);
    }

    let total_items = state.render(&table).pagination.total_items;
    state.set_page(page, total_items);
    if state.page() != page {
        tracing::warn!(requested = page, shown = state.page(), "Page out of range");
    }

    let view = state.render(&table);
    let columns = state.visible_columns(&table);

    println!("{}", table.name);
    let filters = render::filter_summary(state.filters());
    if !filters.is_empty() {
        println!("{filters}");
    }
    println!("{}", render::page_table(&state, &columns, &view));
    println!("{}", render::footer(&view.pagination));
    Ok(())
}

fn run_export(
    settings: &TabulaSettings,
    file: &Path,
    args: &ViewArgs,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let table = load_table(file)?;
    let state = build_state(&table, settings, args)?;
    let view = state.render(&table);
    let columns = state.visible_columns(&table);

    let path = match out {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("Could not determine current directory")?;
            default_path(&cwd, &settings.export.file_stem, format)
        }
    };
    let options = ExportOptions::default()
        .with_title(&table.name)
        .with_sheet_name(&settings.export.xlsx_sheet_name)
        .with_max_column_width(settings.export.xlsx_max_column_width);

    let outcome = export_view_with(format, &view.rows, &columns, &path, &options);
    if !outcome.success {
        bail!(outcome.message);
    }
    println!("{}", outcome.message);
    Ok(())
}

fn run_columns(file: &Path) -> Result<()> {
    let table = load_table(file)?;
    for column in &table.columns {
        let mut flags = Vec::new();
        if !column.sortable {
            flags.push("not sortable");
        }
        if !column.filterable {
            flags.push("not filterable");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        println!(
            "{}\t{}\t{}{}",
            column.id,
            column.label,
            column.column_type.label(),
            flags
        );
        if column.column_type == tabula_core::ColumnType::Select {
            println!("\t{}", distinct_values(&table.data, &column.id).join(", "));
        }
    }
    Ok(())
}

fn run_sample(rows: usize, seed: Option<u64>, out: Option<PathBuf>) -> Result<()> {
    let table = sample::employees(rows, seed);
    let json = table.to_json()?;
    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write sample table to {:?}", path))?;
            tracing::info!(path = %path.display(), rows, "Sample table written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
