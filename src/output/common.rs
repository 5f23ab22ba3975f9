//! Common utilities for output formatters

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::{CfError, Result};

/// Render any serializable value as pretty JSON or YAML
pub fn render_structured<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yml::to_string(data)
            .map_err(|e| CfError::Json(format!("Failed to render YAML: {}", e))),
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(data)?),
    }
}

/// Output a raw API document
///
/// Tables show one row per top-level field; nested values are printed as
/// compact JSON.
pub fn output_raw(raw: &Value, format: OutputFormat, no_header: bool) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", field_table(&value_rows(raw), no_header)),
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", render_structured(raw, format)?.trim_end())
        }
    }
    Ok(())
}

/// Two-column field/value table
pub fn field_table(rows: &[(String, String)], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["Field", "Value"]);
    }
    for (field, value) in rows {
        table.add_row(vec![field.as_str(), value.as_str()]);
    }
    table
}

/// Field/value pairs of a JSON document
pub fn value_rows(raw: &Value) -> Vec<(String, String)> {
    match raw {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), display_value(v)))
            .collect(),
        other => vec![(String::new(), display_value(other))],
    }
}

/// Scalars as plain text, everything else as compact JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&serde_json::json!("text")), "text");
        assert_eq!(display_value(&serde_json::json!(3)), "3");
        assert_eq!(display_value(&serde_json::json!(false)), "false");
        assert_eq!(display_value(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_value_rows_object() {
        let rows = value_rows(&serde_json::json!({"name": "dev", "instances": 2}));
        assert!(rows.contains(&("name".to_string(), "dev".to_string())));
        assert!(rows.contains(&("instances".to_string(), "2".to_string())));
    }

    #[test]
    fn test_value_rows_array() {
        let rows = value_rows(&serde_json::json!(["a", "b"]));
        assert_eq!(
            rows,
            vec![
                ("0".to_string(), "a".to_string()),
                ("1".to_string(), "b".to_string())
            ]
        );
    }

    #[test]
    fn test_render_structured() {
        let data = serde_json::json!({"name": "dev"});
        assert!(render_structured(&data, OutputFormat::Json)
            .unwrap()
            .contains("\"name\": \"dev\""));
        assert!(render_structured(&data, OutputFormat::Yaml)
            .unwrap()
            .contains("name: dev"));
    }

    #[test]
    fn test_field_table_header() {
        let rows = vec![("name".to_string(), "dev".to_string())];
        let with_header = field_table(&rows, false).to_string();
        assert!(with_header.contains("Field"));
        let without_header = field_table(&rows, true).to_string();
        assert!(!without_header.contains("Field"));
        assert!(without_header.contains("dev"));
    }
}
