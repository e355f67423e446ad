//! Coercion of raw prediction values.
//!
//! A raw record is a JSON object such as
//! `{"value": 12.5, "confidence": 0.98, "polygon": [[0.1, 0.2], ...]}`.
//! Absent keys, JSON `null` and the `"N/A"` sentinel all mean "missing".

use serde_json::Value;

/// Sentinel the extraction layer emits for a value it could not read.
pub const NOT_AVAILABLE: &str = "N/A";

/// True when a raw value stands for "no value".
pub fn is_missing(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s == NOT_AVAILABLE,
        _ => false,
    }
}

/// Look up `key` in `record`, treating missing markers as absent.
pub fn present<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !is_missing(v))
}

/// Numeric coercion: JSON numbers, or strings holding a finite number.
pub fn to_f64(raw: &Value) -> Option<f64> {
    let n = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Read `record["confidence"]`, falling back to 0.0.
pub fn confidence(record: &Value) -> f64 {
    present(record, "confidence").and_then(to_f64).unwrap_or(0.0)
}

/// Read `record["page_id"]` when it is a non-negative integer.
pub fn page_id(record: &Value) -> Option<usize> {
    record
        .get("page_id")
        .and_then(Value::as_u64)
        .and_then(|p| usize::try_from(p).ok())
}
