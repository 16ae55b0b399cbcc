//! PHP array configuration files
//!
//! Only the data subset is understood: an optional `<?php` tag and
//! `declare(...)` statements, then `return [...]` or `return array(...)`.
//! Values are strings, numbers, booleans, `null` and nested arrays. No code
//! is evaluated.

use super::{Parser, float_value, read_source};
use crate::config::ConfigMap;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

const MAX_NESTING: usize = 128;

/// Parser for `.php` files returning an array literal
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpParser;

impl Parser for PhpParser {
    fn parse(&self, path: &Path) -> Result<ConfigMap> {
        let content = read_source(path)?;
        let value = Lexer::new(&content)
            .document()
            .map_err(|reason| Error::parse(path, reason))?;

        match value {
            Value::Object(map) => Ok(map),
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect()),
            _ => Err(Error::InvalidFormat(format!(
                "'{}' must return an array",
                path.display()
            ))),
        }
    }
}

enum Key {
    Int(i64),
    Str(String),
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

type LexResult<T> = std::result::Result<T, String>;

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn line(&self) -> usize {
        self.src[..self.pos].matches('\n').count() + 1
    }

    fn error(&self, msg: impl std::fmt::Display) -> String {
        format!("{msg} on line {}", self.line())
    }

    fn skip_trivia(&mut self) -> LexResult<()> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") || trimmed.starts_with('#') {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                let end = trimmed[2..]
                    .find("*/")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += end + 4;
            } else {
                return Ok(());
            }
        }
    }

    fn eat(&mut self, token: &str) -> LexResult<bool> {
        self.skip_trivia()?;
        if self.rest().starts_with(token) {
            self.pos += token.len();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn eat_keyword(&mut self, word: &str) -> LexResult<bool> {
        self.skip_trivia()?;
        let rest = self.rest();
        let matches = rest
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word))
            && !rest[word.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if matches {
            self.pos += word.len();
        }
        Ok(matches)
    }

    fn expect(&mut self, token: &str) -> LexResult<()> {
        if self.eat(token)? {
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}'")))
        }
    }

    fn document(&mut self) -> LexResult<Value> {
        self.eat("<?php")?;

        while self.eat_keyword("declare")? {
            self.expect("(")?;
            let end = self
                .rest()
                .find(')')
                .ok_or_else(|| self.error("unterminated declare"))?;
            self.pos += end + 1;
            self.expect(";")?;
        }

        if !self.eat_keyword("return")? {
            return Err(self.error("expected 'return'"));
        }
        let value = self.value(0)?;
        self.expect(";")?;

        self.eat("?>")?;
        self.skip_trivia()?;
        if !self.rest().is_empty() {
            return Err(self.error("unexpected content after return statement"));
        }
        Ok(value)
    }

    fn value(&mut self, depth: usize) -> LexResult<Value> {
        self.skip_trivia()?;

        if self.eat("[")? {
            return self.array("]", depth);
        }
        if self.eat_keyword("array")? {
            self.expect("(")?;
            return self.array(")", depth);
        }
        if self.eat_keyword("true")? {
            return Ok(Value::Bool(true));
        }
        if self.eat_keyword("false")? {
            return Ok(Value::Bool(false));
        }
        if self.eat_keyword("null")? {
            return Ok(Value::Null);
        }

        match self.peek() {
            Some('\'') => self.single_quoted().map(Value::String),
            Some('"') => self.double_quoted().map(Value::String),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) => Err(self.error(format!("unexpected '{c}'"))),
            None => Err(self.error("unexpected end of file")),
        }
    }

    fn array(&mut self, close: &str, depth: usize) -> LexResult<Value> {
        if depth >= MAX_NESTING {
            return Err(self.error(format!("arrays nested deeper than {MAX_NESTING}")));
        }

        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut next_index: i64 = 0;
        let mut sequential = true;

        loop {
            if self.eat(close)? {
                break;
            }

            let first = self.value(depth + 1)?;
            let (key, value) = if self.eat("=>")? {
                let key = match first {
                    Value::String(s) => match s.parse::<i64>() {
                        Ok(n) if n.to_string() == s => Key::Int(n),
                        _ => Key::Str(s),
                    },
                    Value::Number(n) => Key::Int(
                        n.as_i64()
                            .or_else(|| n.as_f64().map(|f| f as i64))
                            .ok_or_else(|| self.error("invalid array key"))?,
                    ),
                    Value::Bool(b) => Key::Int(i64::from(b)),
                    Value::Null => Key::Str(String::new()),
                    _ => return Err(self.error("array keys must be scalars")),
                };
                (key, self.value(depth + 1)?)
            } else {
                (Key::Int(next_index), first)
            };

            let key = match key {
                Key::Int(n) => {
                    if n != entries.len() as i64 {
                        sequential = false;
                    }
                    next_index = next_index.max(n.saturating_add(1));
                    n.to_string()
                }
                Key::Str(s) => {
                    sequential = false;
                    s
                }
            };

            match positions.entry(key) {
                Entry::Occupied(slot) => {
                    entries[*slot.get()].1 = value;
                    sequential = false;
                }
                Entry::Vacant(slot) => {
                    entries.push((slot.key().clone(), value));
                    slot.insert(entries.len() - 1);
                }
            }

            if !self.eat(",")? {
                self.expect(close)?;
                break;
            }
        }

        if sequential && !entries.is_empty() {
            Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()))
        } else {
            Ok(Value::Object(entries.into_iter().collect()))
        }
    }

    fn single_quoted(&mut self) -> LexResult<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.peek() {
                    Some(c @ ('\'' | '\\')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some('\'') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn double_quoted(&mut self) -> LexResult<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => {
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some(c @ ('"' | '\\' | '$')) => c,
                        _ => {
                            out.push('\\');
                            continue;
                        }
                    };
                    self.bump();
                    out.push(escaped);
                }
                Some('"') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn number(&mut self) -> LexResult<Value> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_alphanumeric()
                    || c == '.'
                    || c == '_'
                    || (i == 0 && matches!(c, '-' | '+'))
                    || (matches!(c, '-' | '+') && rest[..i].ends_with(['e', 'E'])))
            })
            .map_or(rest.len(), |(i, _)| i);
        let literal = &rest[..len];
        self.pos += len;

        let cleaned = literal.replace('_', "");
        let invalid = || self.error(format!("invalid number '{literal}'"));

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };
        if let Some((radix, digits)) = integer_radix(unsigned) {
            let magnitude = i128::from_str_radix(digits, radix).map_err(|_| invalid())?;
            let n = if negative { -magnitude } else { magnitude };
            return i64::try_from(n)
                .map(|n| Value::Number(n.into()))
                .or_else(|_| Ok(float_value(n as f64)));
        }

        match cleaned.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(float_value(f)),
            _ => Err(invalid()),
        }
    }
}

/// Radix and digits of an unsigned integer literal, `None` for floats.
///
/// `0x`, `0b` and `0o` select their base; a leading zero followed by digits
/// is octal, as in PHP (`0755` is 493).
fn integer_radix(literal: &str) -> Option<(u32, &str)> {
    let bytes = literal.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let digits = &literal[2..];
        match bytes[1] {
            b'x' | b'X' => return Some((16, digits)),
            b'b' | b'B' => return Some((2, digits)),
            b'o' | b'O' => return Some((8, digits)),
            _ => {}
        }
    }
    if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match literal.strip_prefix('0') {
        Some(octal) if !octal.is_empty() => Some((8, octal)),
        _ => Some((10, literal)),
    }
}
