//! Resolution of configuration file names against a base directory

use crate::config::{expand_home, validate_config_dir};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Resolves bare filenames or paths to the file that should be read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    base: Option<PathBuf>,
}

impl PathResolver {
    /// Create a resolver without a base directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver rooted at `base`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`](crate::Error::InvalidPath) if `base` is not
    /// an existing directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Result<Self> {
        let mut resolver = Self::new();
        resolver.set_base(Some(base.into()))?;
        Ok(resolver)
    }

    /// Base directory, if any
    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Replace the base directory; `None` clears it
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`](crate::Error::InvalidPath) if the new base
    /// is not an existing directory. The previous base is kept in that case.
    pub fn set_base(&mut self, base: Option<PathBuf>) -> Result<()> {
        let base = base
            .filter(|p| !p.as_os_str().is_empty())
            .map(expand_home);
        if let Some(dir) = &base {
            validate_config_dir(dir)?;
        }
        self.base = base;
        Ok(())
    }

    /// Resolve `file_path`.
    ///
    /// An existing file is returned unchanged. Otherwise the path, with any
    /// leading separators trimmed, is joined onto the base directory.
    /// Returns `None` for an empty input or when no base is configured.
    pub fn resolve(&self, file_path: impl AsRef<Path>) -> Option<PathBuf> {
        let file_path = file_path.as_ref();
        if file_path.as_os_str().is_empty() {
            return None;
        }

        if file_path.is_file() {
            return Some(file_path.to_path_buf());
        }

        let base = self.base.as_ref()?;
        let raw = file_path.to_string_lossy();
        let relative = raw.trim_start_matches(['/', '\\']);
        Some(base.join(relative))
    }
}
