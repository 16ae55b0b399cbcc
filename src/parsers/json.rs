use super::{Parser, into_mapping, read_source};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Parser for `.json` files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        if content.trim().is_empty() {
            return Ok(ConfigMap::new());
        }
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| Error::parse(path, format!("invalid JSON: {e}")))?;
        into_mapping(path, value)
    }
}
