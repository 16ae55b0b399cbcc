//! Extension to parser mapping

use super::{ConfParser, JsonParser, Parser, PhpParser};
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// Constructor for a parser instance
pub type ParserFactory = Arc<dyn Fn() -> Box<dyn Parser> + Send + Sync>;

static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_+-]*$").expect("valid extension regex"));

/// Factory for any parser with a `Default` constructor
pub fn factory<P: Parser + Default + 'static>() -> ParserFactory {
    Arc::new(|| Box::new(P::default()) as Box<dyn Parser>)
}

/// Maps lowercase file extensions to parser factories
///
/// # Example
///
/// ```rust
/// use flatconf::{JsonParser, ParserRegistry};
///
/// let mut registry = ParserRegistry::default();
/// assert!(registry.contains("json"));
///
/// registry.register_parser::<JsonParser>(".jsonc")?;
/// assert!(registry.contains("JSONC"));
///
/// assert!(registry.unregister("jsonc"));
/// # Ok::<(), flatconf::Error>(())
/// ```
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: BTreeMap<String, ParserFactory>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

impl ParserRegistry {
    /// Create a registry with no parsers
    pub fn empty() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Create a registry holding every built-in parser enabled at compile time
    pub fn with_defaults() -> Self {
        let mut parsers: BTreeMap<String, ParserFactory> = BTreeMap::new();
        parsers.insert("json".into(), factory::<JsonParser>());
        parsers.insert("conf".into(), factory::<ConfParser>());
        parsers.insert("php".into(), factory::<PhpParser>());

        #[cfg(feature = "yaml")]
        {
            parsers.insert("yaml".into(), factory::<super::YamlParser>());
            parsers.insert("yml".into(), factory::<super::YamlParser>());
        }
        #[cfg(feature = "xml")]
        parsers.insert("xml".into(), factory::<super::XmlParser>());
        #[cfg(feature = "ini")]
        parsers.insert("ini".into(), factory::<super::IniParser>());
        #[cfg(feature = "toml")]
        parsers.insert("toml".into(), factory::<super::TomlParser>());

        Self { parsers }
    }

    /// Normalize an extension: one leading dot stripped, lowercased
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParser`] if the result is empty or contains
    /// characters other than ASCII letters, digits, `_`, `+` and `-`.
    pub fn normalize_extension(extension: &str) -> Result<String> {
        let ext = extension
            .strip_prefix('.')
            .unwrap_or(extension)
            .to_ascii_lowercase();
        if !EXTENSION_RE.is_match(&ext) {
            return Err(Error::InvalidParser(format!(
                "'{extension}' is not a valid file extension"
            )));
        }
        Ok(ext)
    }

    /// Add or replace the parser for `extension`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParser`] for an invalid extension.
    pub fn register(&mut self, extension: &str, factory: ParserFactory) -> Result<()> {
        let ext = Self::normalize_extension(extension)?;
        if self.parsers.insert(ext.clone(), factory).is_some() {
            debug!("Replaced parser for .{ext}");
        } else {
            debug!("Registered parser for .{ext}");
        }
        Ok(())
    }

    /// Add or replace the parser for `extension` with a `Default`-constructed `P`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParser`] for an invalid extension.
    pub fn register_parser<P: Parser + Default + 'static>(&mut self, extension: &str) -> Result<()> {
        self.register(extension, factory::<P>())
    }

    /// Remove the parser for `extension`, returning whether one was registered
    pub fn unregister(&mut self, extension: &str) -> bool {
        Self::normalize_extension(extension)
            .map(|ext| self.parsers.remove(&ext).is_some())
            .unwrap_or(false)
    }

    /// Register several parsers at once
    ///
    /// All extensions are checked first; nothing is registered if any is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParser`] for the first invalid extension.
    pub fn load_parsers<I, K>(&mut self, parsers: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, ParserFactory)>,
        K: AsRef<str>,
    {
        let normalized = parsers
            .into_iter()
            .map(|(ext, f)| Self::normalize_extension(ext.as_ref()).map(|ext| (ext, f)))
            .collect::<Result<Vec<_>>>()?;
        for (ext, f) in normalized {
            self.parsers.insert(ext, f);
        }
        Ok(())
    }

    /// Current extension to factory mapping
    pub fn parsers(&self) -> &BTreeMap<String, ParserFactory> {
        &self.parsers
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        self.parsers.keys().map(String::as_str).collect()
    }

    /// Check whether a parser is registered for `extension`
    pub fn contains(&self, extension: &str) -> bool {
        Self::normalize_extension(extension)
            .map(|ext| self.parsers.contains_key(&ext))
            .unwrap_or(false)
    }

    /// Instantiate the parser matching the extension of `path`
    pub fn create_parser(&self, path: &Path) -> Option<Box<dyn Parser>> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let parser = self.parsers.get(&ext).map(|f| f());
        if parser.is_none() {
            debug!("No parser registered for .{ext}");
        }
        parser
    }
}
