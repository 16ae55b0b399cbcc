//! Dot-notation flattening of nested configuration data
//!
//! Walks a nested mapping with an explicit work stack and produces the flat
//! key/value map plus the member index used for group deletion.

use crate::config::{ConfigMap, DEFAULT_MAX_DEPTH, GroupMembers, validate_max_depth};
use crate::error::{Error, Result};
use serde_json::Value;

/// Output of [`Flattener::flatten`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    /// Dot-notated key to leaf value, in document order
    pub values: ConfigMap,
    /// Dot-notated key to the last path segment
    pub members: GroupMembers,
}

/// Converts nested mappings into dot-notated keys, bounded by a max depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flattener {
    max_depth: usize,
}

/// One pending entry: `value` lives at `key` inside a container at `depth`
struct Frame<'a> {
    key: String,
    segment: String,
    value: &'a Value,
    depth: usize,
}

impl Default for Flattener {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn join_key(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}.{segment}")
    }
}

impl Flattener {
    /// Create a flattener accepting at most `max_depth` nested levels
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `max_depth` is 0.
    pub fn new(max_depth: usize) -> Result<Self> {
        validate_max_depth(max_depth)?;
        Ok(Self { max_depth })
    }

    /// Maximum accepted nesting depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Flatten `data`, prefixing every key with `base_key`.
    ///
    /// The top-level mapping sits at depth 0. Every nested mapping or list
    /// adds one level; reaching a level beyond `max_depth` fails with
    /// [`Error::DepthExceeded`] naming the offending key, and nothing is
    /// returned. List elements are keyed by their index. Empty containers
    /// produce no entries.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::Flattener;
    /// use serde_json::json;
    ///
    /// let data = json!({"database": {"host": "localhost", "port": 3306}});
    /// let flat = Flattener::new(10)?
    ///     .flatten(data.as_object().unwrap(), "config")?;
    ///
    /// assert_eq!(flat.values["config.database.host"], json!("localhost"));
    /// assert_eq!(flat.members["config.database.port"], "port");
    /// # Ok::<(), flatconf::Error>(())
    /// ```
    pub fn flatten(&self, data: &ConfigMap, base_key: &str) -> Result<Flattened> {
        let mut out = Flattened::default();

        // Children are pushed in reverse so pops follow document order
        let mut stack: Vec<Frame<'_>> = data
            .iter()
            .rev()
            .map(|(k, v)| Frame {
                key: join_key(base_key, k),
                segment: k.clone(),
                value: v,
                depth: 0,
            })
            .collect();

        while let Some(frame) = stack.pop() {
            match frame.value {
                Value::Object(map) => {
                    let depth = self.descend(&frame)?;
                    stack.extend(map.iter().rev().map(|(k, v)| Frame {
                        key: join_key(&frame.key, k),
                        segment: k.clone(),
                        value: v,
                        depth,
                    }));
                }
                Value::Array(items) => {
                    let depth = self.descend(&frame)?;
                    stack.extend(items.iter().enumerate().rev().map(|(i, v)| {
                        let segment = i.to_string();
                        Frame {
                            key: join_key(&frame.key, &segment),
                            segment,
                            value: v,
                            depth,
                        }
                    }));
                }
                leaf => {
                    out.values.insert(frame.key.clone(), leaf.clone());
                    out.members.insert(frame.key, frame.segment);
                }
            }
        }

        Ok(out)
    }

    fn descend(&self, frame: &Frame<'_>) -> Result<usize> {
        let depth = frame.depth + 1;
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.max_depth,
                key: frame.key.clone(),
            });
        }
        Ok(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ConfigMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_flatten_nested() {
        let data = map(json!({
            "database": {"host": "localhost", "port": 3306},
            "app": {"debug": true, "cache": null}
        }));

        let flat = Flattener::new(10).unwrap().flatten(&data, "config").unwrap();

        assert_eq!(flat.values["config.database.host"], json!("localhost"));
        assert_eq!(flat.values["config.database.port"], json!(3306));
        assert_eq!(flat.values["config.app.debug"], json!(true));
        assert_eq!(flat.values["config.app.cache"], Value::Null);
        assert_eq!(flat.members["config.app.cache"], "cache");

        let keys: Vec<&str> = flat.values.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "config.database.host",
                "config.database.port",
                "config.app.debug",
                "config.app.cache"
            ]
        );
    }

    #[test]
    fn test_depth_boundary() {
        let flattener = Flattener::new(2).unwrap();

        let ok = map(json!({"a": {"b": 1}}));
        assert!(flattener.flatten(&ok, "t").is_ok());

        let exactly_max = map(json!({"a": {"b": {"c": 1}}}));
        let flat = flattener.flatten(&exactly_max, "t").unwrap();
        assert_eq!(flat.values["t.a.b.c"], json!(1));

        let too_deep = map(json!({"a": {"b": {"c": {"d": 1}}}}));
        match flattener.flatten(&too_deep, "t") {
            Err(Error::DepthExceeded { max_depth, key }) => {
                assert_eq!(max_depth, 2);
                assert_eq!(key, "t.a.b.c");
            }
            other => panic!("expected DepthExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_containers_vanish() {
        let data = map(json!({"empty": {}, "list": [], "kept": 1}));
        let flat = Flattener::new(10).unwrap().flatten(&data, "f").unwrap();

        assert_eq!(flat.values.len(), 1);
        assert_eq!(flat.values["f.kept"], json!(1));
        assert_eq!(flat.members.len(), 1);
    }

    #[test]
    fn test_lists_keyed_by_index() {
        let data = map(json!({"hosts": ["a", "b"]}));
        let flat = Flattener::new(10).unwrap().flatten(&data, "srv").unwrap();

        assert_eq!(flat.values["srv.hosts.0"], json!("a"));
        assert_eq!(flat.values["srv.hosts.1"], json!("b"));
        assert_eq!(flat.members["srv.hosts.1"], "1");
    }

    #[test]
    fn test_empty_base_key() {
        let data = map(json!({"a": {"b": 1}}));
        let flat = Flattener::new(10).unwrap().flatten(&data, "").unwrap();

        assert_eq!(flat.values["a.b"], json!(1));
    }

    #[test]
    fn test_deeply_nested_input_rejected() {
        let mut value = json!(1);
        for _ in 0..500 {
            value = json!({ "n": value });
        }
        let data = map(value);

        let err = Flattener::new(10).unwrap().flatten(&data, "deep");
        assert!(matches!(err, Err(Error::DepthExceeded { .. })));
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(Flattener::new(0), Err(Error::InvalidArgument(_))));
    }
}
