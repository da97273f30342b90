//! Excel workbook encoding

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tabula_core::{ColumnConfig, Row, Value};

use crate::{ExportError, ExportOptions};

/// Write a single-sheet workbook: a bold header row of labels, then one row
/// per data row. Numbers are written as numbers, nulls are left blank.
pub fn write_xlsx(
    rows: &[Row],
    columns: &[&ColumnConfig],
    path: &Path,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&options.sheet_name)?;

    let widths = column_widths(rows, columns, options.max_column_width);
    for (ix, (column, width)) in columns.iter().zip(widths).enumerate() {
        let col = column_index(ix)?;
        worksheet.write_string_with_format(0, col, &column.label, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }

    for (ix, row) in rows.iter().enumerate() {
        let sheet_row = u32::try_from(ix + 1).map_err(|_| ExportError::SheetLimit {
            what: "rows",
            count: rows.len(),
        })?;
        for (col_ix, column) in columns.iter().enumerate() {
            let col = column_index(col_ix)?;
            match row.get(&column.id) {
                Value::Null => {}
                Value::Number(n) => {
                    worksheet.write_number(sheet_row, col, *n)?;
                }
                Value::Text(s) => {
                    worksheet.write_string(sheet_row, col, s)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Fitted width per column in characters: the longest of the label and the
/// stringified cells, plus 2, capped at `max_width`.
pub fn column_widths(rows: &[Row], columns: &[&ColumnConfig], max_width: f64) -> Vec<f64> {
    columns
        .iter()
        .map(|column| {
            let longest = rows
                .iter()
                .map(|row| row.get(&column.id).to_string().chars().count())
                .chain(std::iter::once(column.label.chars().count()))
                .max()
                .unwrap_or_default();
            ((longest + 2) as f64).min(max_width)
        })
        .collect()
}

fn column_index(ix: usize) -> Result<u16, ExportError> {
    u16::try_from(ix).map_err(|_| ExportError::SheetLimit {
        what: "columns",
        count: ix + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_core::ColumnType;

    #[test]
    fn test_column_widths() {
        let name = ColumnConfig::new("name", "Name", ColumnType::Text);
        let notes = ColumnConfig::new("notes", "Notes", ColumnType::Text);
        let rows = vec![
            Row::new(1).with("name", "Olivia Brown").with("notes", "x".repeat(80)),
            Row::new(2).with("name", "Ava"),
        ];

        assert_eq!(column_widths(&rows, &[&name, &notes], 50.0), vec![14.0, 50.0]);
        assert_eq!(column_widths(&[], &[&name], 50.0), vec![6.0]);
    }
}
