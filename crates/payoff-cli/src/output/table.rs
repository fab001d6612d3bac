use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_scalars, object_arrays, result_of};

/// Format output as tables using the tabled crate: one for the headline
/// fields, then one per row-shaped section (timeline, payoff, plan, ...).
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            let mut scalars = Vec::new();
            flatten_scalars("", map, &mut scalars);
            if !scalars.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in &scalars {
                    builder.push_record([key.as_str(), &format_value(val)]);
                }
                println!("{}", Table::from(builder));
            }

            let mut sections = Vec::new();
            object_arrays("", map, &mut sections);
            for (name, rows) in sections {
                println!("\n{}:", name);
                print_array_table(rows);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", result),
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }

        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
