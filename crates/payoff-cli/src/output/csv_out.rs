use serde_json::Value;
use std::io;

use super::{flatten_scalars, object_arrays, result_of};

/// Row-shaped sections worth exporting, most useful first.
const PRIMARY_SECTIONS: [&str; 6] = [
    "plan",
    "timeline",
    "closing_dates",
    "milestones",
    "payoff",
    "plan.plan",
];

/// Write output as CSV to stdout: the primary row section if the result has
/// one, otherwise a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(map) => {
            let mut sections = Vec::new();
            object_arrays("", map, &mut sections);
            let primary = PRIMARY_SECTIONS
                .iter()
                .find_map(|name| sections.iter().find(|(n, _)| n == name));

            if let Some((_, rows)) = primary {
                write_array_csv(&mut wtr, rows);
            } else {
                let mut scalars = Vec::new();
                flatten_scalars("", map, &mut scalars);
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in &scalars {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_csv_value).collect::<Vec<_>>().join(";"),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_month_rows_to_csv() {
        let rows = json!([
            {"month_index": 0, "payments": ["250", "50"], "total_remaining": "1266.67"},
            {"month_index": 1, "payments": ["250", "50"], "total_remaining": "1032.1"}
        ]);
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_array_csv(&mut wtr, rows.as_array().unwrap());
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "month_index,payments,total_remaining");
        assert_eq!(lines[1], "0,250;50,1266.67");
        assert_eq!(lines.len(), 3);
    }
}
