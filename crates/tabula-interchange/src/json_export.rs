//! JSON encoding

use serde_json::{Map, Value as JsonValue};
use tabula_core::{ColumnConfig, Row};

use crate::ExportError;

/// Encode rows as a pretty-printed JSON array of objects holding `id` and the
/// given columns, in column order. Missing cells are written as `null`.
pub fn encode_json(rows: &[Row], columns: &[&ColumnConfig]) -> Result<String, ExportError> {
    let objects = rows
        .iter()
        .map(|row| -> Result<JsonValue, serde_json::Error> {
            let mut object = Map::new();
            object.insert("id".to_string(), serde_json::to_value(&row.id)?);
            for column in columns {
                object.insert(column.id.clone(), serde_json::to_value(row.get(&column.id))?);
            }
            Ok(JsonValue::Object(object))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(serde_json::to_string_pretty(&objects)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::ColumnType;

    #[test]
    fn test_only_visible_columns_are_written() {
        let name = ColumnConfig::new("name", "Name", ColumnType::Text);
        let rows = vec![
            Row::new(1).with("name", "Emma").with("salary", 50000),
            Row::new("row_2"),
        ];

        let json = encode_json(&rows, &[&name]).unwrap();
        let parsed: JsonValue = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"id": 1, "name": "Emma"},
                {"id": "row_2", "name": null}
            ])
        );
    }

    #[test]
    fn test_keys_follow_display_order() {
        let salary = ColumnConfig::new("salary", "Salary", ColumnType::Number);
        let name = ColumnConfig::new("name", "Name", ColumnType::Text);
        let rows = vec![Row::new(1).with("name", "Emma").with("salary", 5)];

        let json = encode_json(&rows, &[&salary, &name]).unwrap();
        let parsed: JsonValue = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = parsed[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "salary", "name"]);

        let salary_at = json.find("\"salary\"").unwrap();
        let name_at = json.find("\"name\"").unwrap();
        assert!(salary_at < name_at);
    }
}
