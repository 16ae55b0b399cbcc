//! Builder for ConfigManager
//!
//! This module contains [`ConfigManagerBuilder`] which provides a fluent API
//! for creating a [`ConfigManager`](super::ConfigManager).

use crate::config::ConfigOptionsBuilder;
use crate::error::Result;
use crate::parsers::ParserFactory;
use std::path::PathBuf;

use super::ConfigManager;

/// Builder for creating a [`ConfigManager`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use flatconf::{ConfigManager, JsonParser, parsers::factory};
///
/// let manager = ConfigManager::builder()
///     .flatten(true)
///     .max_depth(4)
///     .with_parser("jsonc", factory::<JsonParser>())
///     .build()?;
///
/// assert!(manager.parsers().contains("jsonc"));
/// # Ok::<(), flatconf::Error>(())
/// ```
#[derive(Default)]
pub struct ConfigManagerBuilder {
    options: ConfigOptionsBuilder,
    parsers: Vec<(String, ParserFactory)>,
}

impl ConfigManagerBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory bare file names are resolved against.
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options = self.options.config_path(path);
        self
    }

    /// Enable or disable flattening (default: enabled)
    pub fn flatten(mut self, flatten: bool) -> Self {
        self.options = self.options.flatten(flatten);
        self
    }

    /// Set the maximum nesting depth (default: 10)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.max_depth(depth);
        self
    }

    /// Register a parser for `extension`, replacing any built-in one
    pub fn with_parser(mut self, extension: impl Into<String>, factory: ParserFactory) -> Self {
        self.parsers.push((extension.into(), factory));
        self
    }

    /// Build the [`ConfigManager`].
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidPath`](crate::Error::InvalidPath) if the config path is
    ///   not an existing directory
    /// * [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the max
    ///   depth is 0
    /// * [`Error::InvalidParser`](crate::Error::InvalidParser) if a parser
    ///   extension is invalid
    pub fn build(self) -> Result<ConfigManager> {
        let mut manager = ConfigManager::new(self.options.build())?;
        manager.parsers.load_parsers(self.parsers)?;
        Ok(manager)
    }
}
