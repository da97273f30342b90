//! Exports written to disk

use pretty_assertions::assert_eq;
use tabula_core::{ColumnConfig, ColumnType, Row, SortConfig, ViewOptions, process_data};
use tabula_interchange::{
    ExportFormat, ExportOptions, default_path, export_view, export_view_with,
};
use tempfile::tempdir;

fn columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("name", "Name", ColumnType::Text),
        ColumnConfig::new("salary", "Salary", ColumnType::Number),
        ColumnConfig::new("notes", "Notes", ColumnType::Text),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        Row::new(1)
            .with("name", "Emma")
            .with("salary", 98000)
            .with("notes", "lead, backend"),
        Row::new(2).with("name", "Liam").with("salary", 54000),
    ]
}

#[test]
fn test_csv_export_of_materialized_view() {
    let dir = tempdir().unwrap();
    let path = default_path(dir.path(), "staff", ExportFormat::Csv);

    let columns = columns();
    let visible: Vec<&ColumnConfig> = columns.iter().take(2).collect();
    let view = process_data(
        &rows(),
        &ViewOptions::new(vec![SortConfig::ascending("salary")], vec![]),
    );

    let outcome = export_view(ExportFormat::Csv, &view, &visible, &path);
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.path.as_deref(), Some(path.as_path()));

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "\u{feff}Name,Salary\nLiam,54000\nEmma,98000");
}

#[test]
fn test_json_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.json");
    let columns = columns();
    let visible: Vec<&ColumnConfig> = columns.iter().collect();

    let outcome = export_view(ExportFormat::Json, &rows(), &visible, &path);
    assert!(outcome.success);

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed[0]["notes"], "lead, backend");
    assert_eq!(parsed[1]["notes"], serde_json::Value::Null);
    assert_eq!(parsed[1]["salary"], 54000.0);
}

#[test]
fn test_xlsx_export_writes_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.xlsx");
    let columns = columns();
    let visible: Vec<&ColumnConfig> = columns.iter().collect();

    let options = ExportOptions::default().with_sheet_name("Staff");
    let outcome = export_view_with(ExportFormat::Xlsx, &rows(), &visible, &path, &options);
    assert!(outcome.success, "{}", outcome.message);

    // xlsx files are zip archives
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_pdf_export_writes_titled_document() {
    let dir = tempdir().unwrap();
    let path = default_path(dir.path(), "staff", ExportFormat::Pdf);
    let columns = columns();
    let visible: Vec<&ColumnConfig> = columns.iter().collect();

    let options = ExportOptions::default().with_title("Employees");
    let outcome = export_view_with(ExportFormat::Pdf, &rows(), &visible, &path, &options);
    assert!(outcome.success, "{}", outcome.message);
    assert!(outcome.message.ends_with("(PDF)"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"%PDF");
}

#[test]
fn test_json_export_keeps_reordered_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.json");
    let columns = columns();
    let visible = vec![&columns[2], &columns[1], &columns[0]];

    let outcome = export_view(ExportFormat::Json, &rows(), &visible, &path);
    assert!(outcome.success);

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let keys: Vec<&str> = parsed[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["id", "notes", "salary", "name"]);
}

#[test]
fn test_failure_is_an_outcome_not_a_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("staff.csv");
    let columns = columns();
    let visible: Vec<&ColumnConfig> = columns.iter().collect();

    let outcome = export_view(ExportFormat::Csv, &rows(), &visible, &path);
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("CSV export failed"));
    assert!(!path.exists());
}

#[test]
fn test_invalid_sheet_name_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.xlsx");
    let columns = columns();
    let visible: Vec<&ColumnConfig> = columns.iter().collect();

    let options = ExportOptions::default().with_sheet_name("bad/name");
    let outcome = export_view_with(ExportFormat::Xlsx, &rows(), &visible, &path, &options);
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Excel export failed"));
}
