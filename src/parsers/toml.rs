use super::{Parser, float_value, read_source};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Parser for `.toml` files
///
/// Datetimes are kept as their RFC 3339 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl Parser for TomlParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        let table: ::toml::Table = ::toml::from_str(&content)
            .map_err(|e| Error::parse(path, format!("invalid TOML: {e}")))?;
        Ok(convert_table(table))
    }
}

fn convert_table(table: ::toml::Table) -> ConfigMap {
    table.into_iter().map(|(k, v)| (k, convert(v))).collect()
}

fn convert(value: ::toml::Value) -> Value {
    match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::Number(i.into()),
        ::toml::Value::Float(f) => float_value(f),
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        ::toml::Value::Array(items) => Value::Array(items.into_iter().map(convert).collect()),
        ::toml::Value::Table(table) => Value::Object(convert_table(table)),
    }
}
