//! Format parsers and the extension registry
//!
//! Every format implements [`Parser`], turning a file into a [`ConfigMap`].
//! The [`ParserRegistry`] picks a parser by file extension.

mod conf;
mod json;
mod php;
mod registry;

#[cfg(feature = "ini")]
mod ini;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "xml")]
mod xml;
#[cfg(feature = "yaml")]
mod yaml;

pub use conf::ConfParser;
pub use json::JsonParser;
pub use php::PhpParser;
pub use registry::{ParserFactory, ParserRegistry, factory};

#[cfg(feature = "ini")]
pub use self::ini::IniParser;
#[cfg(feature = "toml")]
pub use self::toml::TomlParser;
#[cfg(feature = "xml")]
pub use self::xml::XmlParser;
#[cfg(feature = "yaml")]
pub use self::yaml::YamlParser;

use crate::config::ConfigMap;
use crate::error::{Error, Result};
use serde_json::{Number, Value};
use std::path::Path;

/// Trait for configuration format parsers
///
/// Implementations read the file at `path` and return its top-level mapping.
/// Unreadable or malformed input is an [`Error::Parse`]; a document whose top
/// level is not a mapping is an [`Error::InvalidFormat`].
///
/// # Example
///
/// ```rust
/// use flatconf::{ConfigMap, Error, Parser, Result, parsers::read_source};
/// use serde_json::Value;
/// use std::path::Path;
///
/// /// `key -> value` lines
/// struct ArrowParser;
///
/// impl Parser for ArrowParser {
///     fn parse(&self, path: &Path) -> Result<ConfigMap> {
///         let mut out = ConfigMap::new();
///         for line in read_source(path)?.lines().map(str::trim) {
///             if line.is_empty() || line.starts_with('#') {
///                 continue;
///             }
///             let (key, value) = line
///                 .split_once("->")
///                 .ok_or_else(|| Error::parse(path, format!("invalid line: {line}")))?;
///             out.insert(key.trim().into(), Value::String(value.trim().into()));
///         }
///         Ok(out)
///     }
/// }
/// ```
pub trait Parser: Send + Sync {
    /// Parse the file at `path` into a mapping
    fn parse(&self, path: &Path) -> Result<ConfigMap>;
}

/// Read a configuration file as UTF-8 text
///
/// # Errors
///
/// Returns [`Error::Parse`] if the file is missing, unreadable, or not valid UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::parse(path, "file not found or unreadable"));
    }
    let bytes = std::fs::read(path).map_err(|e| Error::parse(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::parse(path, "File encoding must be UTF-8"))
}

/// Require a parsed document to be a mapping
///
/// A null document (empty file) counts as an empty mapping.
pub(crate) fn into_mapping(path: &Path, value: Value) -> Result<ConfigMap> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigMap::new()),
        other => Err(Error::InvalidFormat(format!(
            "'{}' must contain a mapping at the top level, found {}",
            path.display(),
            value_kind(&other)
        ))),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Float to JSON number; non-finite values become null
pub(crate) fn float_value(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// Convert a raw scalar from a text format into a typed value.
///
/// Quoted text stays a string (quotes removed). Otherwise `true/on/yes` and
/// `false/off/no/none` become booleans, `null` becomes null, and numeric
/// literals become numbers. Anything else is kept as a string.
pub(crate) fn typed_scalar(raw: &str) -> Value {
    let raw = raw.trim();

    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return Value::String(raw[1..raw.len() - 1].to_string());
        }
    }

    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => return Value::Bool(true),
        "false" | "off" | "no" | "none" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return float_value(f);
            }
        }
    }

    Value::String(raw.to_string())
}
