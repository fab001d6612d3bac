pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` member of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into dotted `(key, value)` pairs.
/// Arrays of objects are left out; the caller renders those as their own sections.
pub(crate) fn flatten_scalars(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_scalars(&name, inner, out),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {}
            _ => out.push((name, val.clone())),
        }
    }
}

/// Collect arrays of objects, keyed by dotted path.
pub(crate) fn object_arrays<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    out: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => object_arrays(&name, inner, out),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                out.push((name, items.as_slice()))
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_and_collect() {
        let value = json!({
            "interest_saved": "120.5",
            "plan": {"months": 12, "timeline": [{"month_index": 0}]},
            "payoff_order": ["a", "b"]
        });
        let map = value.as_object().unwrap();

        let mut scalars = Vec::new();
        flatten_scalars("", map, &mut scalars);
        let keys: Vec<&str> = scalars.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["interest_saved", "payoff_order", "plan.months"]);

        let mut arrays = Vec::new();
        object_arrays("", map, &mut arrays);
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].0, "plan.timeline");
    }

    #[test]
    fn test_result_of_envelope() {
        let envelope = json!({"result": {"months": 3}, "warnings": []});
        assert_eq!(result_of(&envelope), &json!({"months": 3}));
        let bare = json!({"months": 3});
        assert_eq!(result_of(&bare), &bare);
    }
}
