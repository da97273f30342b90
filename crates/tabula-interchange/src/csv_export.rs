//! CSV encoding

use tabula_core::{ColumnConfig, Row, Value};

/// UTF-8 byte order mark, so spreadsheet apps detect the encoding
pub const BOM: char = '\u{feff}';

/// Encode a header of column labels plus one line per row, joined by `\n`
/// and prefixed with a BOM.
pub fn encode_csv(rows: &[Row], columns: &[&ColumnConfig]) -> String {
    let header = columns
        .iter()
        .map(|c| qualify(&c.label))
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::new();
    out.push(BOM);
    out.push_str(&header);

    for row in rows {
        out.push('\n');
        let line = columns
            .iter()
            .map(|c| encode_value(row.get(&c.id)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
    }
    out
}

fn encode_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Text(s) => qualify(s),
    }
}

/// Quote text containing a delimiter, quote or line break; inner quotes are
/// doubled.
fn qualify(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
