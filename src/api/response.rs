use serde_json::Value;

use crate::model::{LogPoint, ScalarValue, LOG_SENTINEL};

/// Session id from a login response (`result.sid`). An empty sid is treated
/// the same as a missing one.
pub fn sid(doc: &Value) -> Option<&str> {
    doc.get("result")
        .and_then(|result| result.get("sid"))
        .and_then(Value::as_str)
        .filter(|sid| !sid.is_empty())
}

/// Top-level firmware error code, if the response carries one.
pub fn err_code(doc: &Value) -> Option<u64> {
    doc.get("err").and_then(Value::as_u64)
}

/// Payload of the single device under `result`. The device id is not known
/// ahead of time; the schema guarantees one device per query, so the first
/// entry is taken. An empty or missing `result` object is malformed.
pub fn first_device(doc: &Value) -> Option<&Value> {
    doc.get("result")
        .and_then(Value::as_object)
        .and_then(|result| result.values().next())
}

/// Value of `key` inside a device payload, found at `<key>."1"[0].val`.
/// Anything other than an integer or string leaf on that path degrades to
/// `Missing`.
pub fn scalar(device: &Value, key: &str) -> ScalarValue {
    let val = device
        .get(key)
        .and_then(|entry| entry.get("1"))
        .and_then(|channel| channel.get(0))
        .and_then(|slot| slot.get("val"));

    match val {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => ScalarValue::Integer(v),
            None => ScalarValue::Missing,
        },
        Some(Value::String(s)) => ScalarValue::Text(s.clone()),
        _ => ScalarValue::Missing,
    }
}

/// Log series from a device payload: `{t, v}` entries in document order,
/// truncated to `capacity`. A non-integer `t` or `v` degrades to the
/// sentinel without dropping the point.
pub fn log_series(device: &Value, capacity: usize) -> Vec<LogPoint> {
    let entries = match device.as_array() {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .take(capacity)
        .map(|entry| LogPoint {
            timestamp: field_u32(entry, "t"),
            value: field_u32(entry, "v"),
        })
        .collect()
}

fn field_u32(entry: &Value, field: &str) -> u32 {
    entry
        .get(field)
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(LOG_SENTINEL)
}
