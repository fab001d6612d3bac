use serde_json::Value;

use super::result_of;

/// Headline fields, most important first.
const PRIORITY_KEYS: [&str; 6] = [
    "months",
    "interest_saved",
    "cheaper",
    "total_interest",
    "debt_free",
    "months_saved",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, then falls back to
/// the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(result_of(value)));
}

fn minimal_line(result: &Value) -> String {
    if let Value::Object(map) = result {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_order() {
        assert_eq!(minimal_line(&json!({"total_interest": "10", "months": 7})), "7");
        assert_eq!(
            minimal_line(&json!({"interest_saved": "88.10", "plan": {}})),
            "88.10"
        );
        assert_eq!(minimal_line(&json!({"other": true})), "other: true");
    }
}
