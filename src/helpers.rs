use chrono::{DateTime, Utc};
use serde_json::Value;

/// Splits a comma separated list into trimmed, lowercased identifiers.
/// Empty tokens are dropped and duplicates keep their first position.
pub fn parse_list(data: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for token in data.split(',') {
        let item = token.trim().to_lowercase();
        if item.is_empty() || items.contains(&item) {
            continue;
        }
        items.push(item);
    }

    items
}

/// Reads a numeric upstream value. Numbers pass through, strings are
/// parsed, anything else (or a non-finite result) is `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|n| n.is_finite())
}

pub fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let seconds = coerce_number(value)?;
    DateTime::from_timestamp(seconds as i64, 0)
}
