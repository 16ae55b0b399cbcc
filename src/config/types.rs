//! Core types for flatconf library

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Primary key/value store: dot-notated keys (when flattened) to values
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Members of one group: full dot-notated key to the sub-key it was stored under
pub type GroupMembers = BTreeMap<String, String>;

/// Group name to its members
pub type Groups = BTreeMap<String, GroupMembers>;

/// Default maximum nesting depth accepted while flattening
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Options for initializing the [`ConfigManager`](crate::ConfigManager)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Directory used to resolve bare filenames (must exist when set)
    pub config_path: Option<PathBuf>,

    /// Flatten nested structures into dot-notated keys on load
    pub flatten: bool,

    /// Maximum nesting depth accepted while flattening (at least 1)
    pub max_depth: usize,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            flatten: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConfigOptions {
    /// Create a new builder for `ConfigOptions`
    ///
    /// # Example
    /// ```rust
    /// use flatconf::ConfigOptions;
    ///
    /// let options = ConfigOptions::builder()
    ///     .config_path("/etc/my-app")
    ///     .flatten(false)
    ///     .build();
    /// assert!(!options.flatten);
    /// ```
    pub fn builder() -> ConfigOptionsBuilder {
        ConfigOptionsBuilder::new()
    }

    /// Check the options against the filesystem
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidPath`] if `config_path` is not an existing directory
    /// * [`Error::InvalidArgument`] if `max_depth` is 0
    pub fn validate(&self) -> Result<()> {
        validate_max_depth(self.max_depth)?;
        if let Some(path) = &self.config_path {
            validate_config_dir(path)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_max_depth(depth: usize) -> Result<()> {
    if depth < 1 {
        return Err(Error::InvalidArgument(
            "Maximum depth must be at least 1".into(),
        ));
    }
    Ok(())
}

/// `~` is expanded first, so options built by hand behave like the builder's
pub(crate) fn validate_config_dir(path: &Path) -> Result<()> {
    let dir = expand_home(path.to_path_buf());
    if !dir.is_dir() {
        return Err(Error::InvalidPath(dir));
    }
    Ok(())
}

/// Expand a leading `~` to the home directory
pub(crate) fn expand_home(path: PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(&path));
        }
    }
    path
}

/// Builder for creating `ConfigOptions` with a fluent API
#[derive(Debug, Clone, Default)]
pub struct ConfigOptionsBuilder {
    config_path: Option<PathBuf>,
    flatten: Option<bool>,
    max_depth: Option<usize>,
}

impl ConfigOptionsBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(expand_home(path.into()));
        self
    }

    /// Enable or disable key flattening (default: enabled)
    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = Some(flatten);
        self
    }

    /// Set the maximum nesting depth (default: 10)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Build the `ConfigOptions`
    ///
    /// Validation happens when the options are handed to a manager.
    pub fn build(self) -> ConfigOptions {
        let defaults = ConfigOptions::default();
        ConfigOptions {
            config_path: self.config_path,
            flatten: self.flatten.unwrap_or(defaults.flatten),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
        }
    }
}
