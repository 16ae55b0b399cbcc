//! XML configuration files
//!
//! The root element is discarded and its children become top-level keys.
//! Attributes are stored as `@name`, repeated sibling elements become a
//! list, and text content is converted like INI values. An element holding
//! both children and text keeps the text under `#text`.

use super::{Parser, read_source, typed_scalar};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::Value;
use serde_json::map::Entry;
use std::path::Path;

const TEXT_KEY: &str = "#text";

/// Parser for `.xml` files
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl Parser for XmlParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        let root = read_root(&content).map_err(|reason| Error::parse(path, reason))?;

        let Some(root) = root else {
            return Ok(ConfigMap::new());
        };
        if root.children.is_empty() && !root.text.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "root element <{}> of '{}' holds text, not a mapping",
                root.name,
                path.display()
            )));
        }
        Ok(root.children)
    }
}

struct Element {
    name: String,
    children: ConfigMap,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> std::result::Result<Self, String> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| format!("invalid element name: {e}"))?
            .to_string();

        let mut children = ConfigMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| format!("invalid attribute in <{name}>: {e}"))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| format!("invalid attribute name in <{name}>: {e}"))?;
            let value = attr
                .unescape_value()
                .map_err(|e| format!("invalid attribute value in <{name}>: {e}"))?;
            children.insert(format!("@{key}"), typed_scalar(&value));
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn close(mut self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.children.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                typed_scalar(text)
            }
        } else {
            if !text.is_empty() {
                self.children
                    .insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
            }
            Value::Object(self.children)
        };
        (self.name, value)
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }
}

fn read_root(content: &str) -> std::result::Result<Option<Element>, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("invalid XML at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err("multiple root elements".to_string());
                }
                stack.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                match stack.last_mut() {
                    Some(parent) => {
                        let (name, value) = element.close();
                        parent.add_child(name, value);
                    }
                    None if root.is_none() => root = Some(element),
                    None => return Err("multiple root elements".to_string()),
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| format!("invalid text: {e}"))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let data = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|e| format!("invalid CDATA: {e}"))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&data);
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                match stack.last_mut() {
                    Some(parent) => {
                        let (name, value) = element.close();
                        parent.add_child(name, value);
                    }
                    None => root = Some(element),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn parse_str(content: &str) -> Result<ConfigMap> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.xml");
        std::fs::write(&path, content).unwrap();
        XmlParser.parse(&path)
    }

    #[test]
    fn test_xml_parser() {
        let config = parse_str(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<config>
    <!-- connection -->
    <database driver="mysql">
        <host>localhost</host>
        <port>3306</port>
        <password><![CDATA[p<a>ss]]></password>
    </database>
    <debug>true</debug>
    <server>a</server>
    <server>b</server>
    <empty/>
    <title>Tom &amp; Jerry</title>
</config>
"#,
        )
        .unwrap();

        assert_eq!(config["database"]["@driver"], json!("mysql"));
        assert_eq!(config["database"]["host"], json!("localhost"));
        assert_eq!(config["database"]["port"], json!(3306));
        assert_eq!(config["database"]["password"], json!("p<a>ss"));
        assert_eq!(config["debug"], json!(true));
        assert_eq!(config["server"], json!(["a", "b"]));
        assert_eq!(config["empty"], Value::Null);
        assert_eq!(config["title"], json!("Tom & Jerry"));
    }

    #[test]
    fn test_xml_mixed_content() {
        let config = parse_str("<root><note>hello<b>1</b></note></root>").unwrap();

        assert_eq!(config["note"]["#text"], json!("hello"));
        assert_eq!(config["note"]["b"], json!(1));
    }

    #[test]
    fn test_xml_parser_malformed() {
        let err = parse_str("<root><a>1</b></root>").unwrap_err();
        assert!(err.is_parse_error());

        let err = parse_str("<root><a>1</a>").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_xml_text_root_rejected() {
        assert!(matches!(
            parse_str("<root>just text</root>"),
            Err(Error::InvalidFormat(_))
        ));
    }
}
