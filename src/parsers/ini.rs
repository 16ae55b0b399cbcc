use super::{Parser, read_source, typed_scalar};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use ::ini::{Ini, ParseOption, Properties};
use serde_json::Value;
use std::path::Path;

/// Parser for `.ini` files
///
/// Keys before the first section are top-level; each `[section]` becomes a
/// nested mapping. `key[] = value` lines collect into a list.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniParser;

impl Parser for IniParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&content, options)
            .map_err(|e| Error::parse(path, format!("invalid INI: {e}")))?;

        let mut out = ConfigMap::new();
        for (section, props) in ini.iter() {
            match section {
                None => collect_properties(props, &mut out),
                Some(name) => {
                    let mut nested = match out.shift_remove(name) {
                        Some(Value::Object(existing)) => existing,
                        _ => ConfigMap::new(),
                    };
                    collect_properties(props, &mut nested);
                    out.insert(name.to_string(), Value::Object(nested));
                }
            }
        }
        Ok(out)
    }
}

fn collect_properties(props: &Properties, out: &mut ConfigMap) {
    for (key, raw) in props.iter() {
        let value = typed_scalar(raw);
        match key.strip_suffix("[]") {
            Some(list_key) => match out.get_mut(list_key) {
                Some(Value::Array(items)) => items.push(value),
                _ => {
                    out.insert(list_key.to_string(), Value::Array(vec![value]));
                }
            },
            None => {
                out.insert(key.to_string(), value);
            }
        }
    }
}
