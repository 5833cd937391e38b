//! JSON format handler

use serde_json::{Map, Number, Value};

use crate::error::{ParseError, offset_at};
use crate::format::{Format, FormatHandler};

/// Handler for bracket-delimited documents
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn canonicalize(&self, source: &str) -> Result<Value, ParseError> {
        let value: Value = serde_json::from_str(source).map_err(|e| {
            ParseError::new(Format::Json, e.to_string()).at(offset_at(source, e.line(), e.column()))
        })?;

        Ok(canonical_value(value))
    }
}

/// Sort keys recursively and canonicalize numbers.
pub(crate) fn canonical_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut sorted = Map::new();
            for (key, v) in entries {
                sorted.insert(key, canonical_value(v));
            }
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(canonical_value).collect()),
        Value::Number(n) => canonical_number(&n),
        other => other,
    }
}

fn canonical_number(n: &Number) -> Value {
    if n.is_i64() || n.is_u64() {
        return Value::Number(n.clone());
    }
    match n.as_f64() {
        Some(f) => canonical_float(f),
        None => Value::Number(n.clone()),
    }
}

/// Integral floats collapse to integers so `1.0` and `1` read the same.
///
/// Non-finite values have no JSON number form and are kept as their YAML
/// spelling.
pub(crate) fn canonical_float(f: f64) -> Value {
    if f.is_nan() {
        return Value::String(".nan".to_string());
    }
    if f.is_infinite() {
        let spelled = if f > 0.0 { ".inf" } else { "-.inf" };
        return Value::String(spelled.to_string());
    }

    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Value::Number((f as i64).into());
    }

    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
