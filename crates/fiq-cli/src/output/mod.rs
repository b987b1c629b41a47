use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(match value {
        Value::Array(items) => {
            let rows: Vec<Vec<String>> = items
                .iter()
                .enumerate()
                .map(|(index, item)| vec![index.to_string(), value_to_cell(item)])
                .collect();
            table::render(&["#", "value"], &rows)
        }
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect();
            table::render(&["key", "value"], &rows)
        }
        scalar => table::render(&["value"], &[vec![value_to_cell(&scalar)]]),
    })
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_is_pretty_and_raw_is_compact() {
        let value = json!({"sus_score": 50.0});
        assert_eq!(
            render(&value, OutputFormat::Json).unwrap(),
            "{\n  \"sus_score\": 50.0\n}"
        );
        assert_eq!(
            render(&value, OutputFormat::Raw).unwrap(),
            "{\"sus_score\":50.0}"
        );
    }

    #[test]
    fn table_renders_null_as_dash() {
        let rendered = render(&json!({"trust_average": null}), OutputFormat::Table).unwrap();
        assert!(rendered.contains("trust_average"));
        assert!(
            rendered
                .lines()
                .any(|line| line.starts_with("trust_average") && line.ends_with('-'))
        );
    }
}
