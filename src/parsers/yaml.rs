use super::{Parser, float_value, into_mapping, read_source};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use serde_json::Value;
use serde_yaml::Value as YamlValue;
use std::path::Path;

/// Parser for `.yaml` / `.yml` files
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl Parser for YamlParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        let doc: YamlValue = serde_yaml::from_str(&content)
            .map_err(|e| Error::parse(path, format!("invalid YAML: {e}")))?;
        into_mapping(path, convert(doc))
    }
}

fn convert(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64().map_or(Value::Null, float_value)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(items.into_iter().map(convert).collect()),
        YamlValue::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (key_string(k), convert(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => convert(tagged.value),
    }
}

fn key_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => String::new(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
