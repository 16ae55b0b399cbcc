//! Plain `key = value` configuration files
//!
//! Accepted line forms: `key = value`, `key: value` and `key value`.
//! Lines starting with `#` or `;` are comments. Values go through the same
//! typed conversion as INI values.

use super::{Parser, read_source, typed_scalar};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_.\-]*)\s*(?:[=:]\s*|\s+)(.*)$")
        .expect("valid conf line regex")
});

/// Parser for `.conf` files
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfParser;

impl Parser for ConfParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        let mut out = ConfigMap::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let caps = LINE_RE.captures(line).ok_or_else(|| {
                Error::parse(path, format!("invalid line {}: {line}", idx + 1))
            })?;
            out.insert(caps[1].to_string(), typed_scalar(&caps[2]));
        }

        Ok(out)
    }
}
