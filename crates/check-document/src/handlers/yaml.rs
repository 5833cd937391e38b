//! YAML format handler using serde_yaml

use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

use super::json::canonical_float;
use crate::error::ParseError;
use crate::format::{Format, FormatHandler};

/// Handler for YAML documents using serde_yaml
#[derive(Debug, Default)]
pub struct YamlHandler;

impl YamlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn canonicalize(&self, source: &str) -> Result<Value, ParseError> {
        let yaml_value: YamlValue = serde_yaml::from_str(source).map_err(|e| {
            ParseError::new(Format::Yaml, e.to_string()).at(e.location().map(|l| l.index()))
        })?;

        yaml_to_json_sorted(&yaml_value)
    }
}

fn yaml_to_json_sorted(value: &YamlValue) -> Result<Value, ParseError> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                canonical_float(f)
            } else {
                Value::Null
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(arr) => Value::Array(
            arr.iter()
                .map(yaml_to_json_sorted)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                entries.push((key_to_string(k)?, yaml_to_json_sorted(v)?));
            }
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut json_map = Map::new();
            for (key, v) in entries {
                if json_map.insert(key.clone(), v).is_some() {
                    return Err(ParseError::new(
                        Format::Yaml,
                        format!("duplicate mapping key '{key}' after key normalization"),
                    ));
                }
            }
            Value::Object(json_map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json_sorted(&tagged.value)?,
    })
}

/// JSON only has string keys, so scalar YAML keys are spelled out. Empty
/// keys have no JSON counterpart and are rejected.
fn key_to_string(key: &YamlValue) -> Result<String, ParseError> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => key_to_string(&tagged.value),
        YamlValue::Null => Err(ParseError::new(Format::Yaml, "mapping keys must not be empty")),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ParseError::new(
            Format::Yaml,
            "mapping keys must be scalars",
        )),
    }
}
