//! File loading for `ConfigManager`

use super::ConfigManager;
use crate::config::{ConfigMap, Groups};
use crate::error::{Error, ErrorKind, Result};
use crate::flatten::Flattened;
use crate::storage::StorageBackend;

use log::{debug, info};
use std::path::{Path, PathBuf};

impl<S: StorageBackend> ConfigManager<S> {
    /// Load a configuration file into the store.
    ///
    /// `file_path` is used as-is when it names an existing file, otherwise it
    /// is resolved against the configured directory. With flattening enabled
    /// every leaf is stored under `<base>.<path>`, where `<base>` is the
    /// lowercased file name without its extension, and the keys are grouped
    /// under `<base>`. With flattening disabled the parsed mapping is merged
    /// as-is. The store is untouched when any step fails.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] if the file cannot be resolved
    /// * [`Error::NoParser`] / [`Error::Parse`] if no parser matches or parsing fails
    /// * [`Error::InvalidFormat`] if the document is not a mapping
    /// * [`Error::DepthExceeded`] if the data nests deeper than the max depth
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::ConfigManager;
    /// use serde_json::json;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// std::fs::write(
    ///     dir.path().join("config.json"),
    ///     r#"{"database": {"host": "localhost", "port": 3306}}"#,
    /// ).unwrap();
    ///
    /// let mut config = ConfigManager::builder().config_path(dir.path()).build()?;
    /// config.load("config.json")?;
    ///
    /// assert_eq!(config.get("config.database.host"), Some(&json!("localhost")));
    /// assert!(config.has("config"));
    /// # Ok::<(), flatconf::Error>(())
    /// ```
    pub fn load(&mut self, file_path: impl AsRef<Path>) -> Result<()> {
        let path = self.resolve_file(file_path.as_ref())?;
        let data = self.parse_file(&path)?;

        if !self.flatten {
            info!("Loaded {} keys from {}", data.len(), path.display());
            self.insert(data, Groups::new());
            return Ok(());
        }

        let base = base_name(&path);
        let Flattened { values, members } = self.flattener.flatten(&data, &base)?;

        info!(
            "Loaded {} keys from {} into group '{base}'",
            values.len(),
            path.display()
        );

        let mut groups = Groups::new();
        if !members.is_empty() {
            groups.insert(base, members);
        }
        self.insert(values, groups);
        Ok(())
    }

    /// Parse a configuration file without touching the store.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus [`Error::DepthExceeded`].
    pub fn fetch(&self, file_path: impl AsRef<Path>) -> Result<ConfigMap> {
        let path = self.resolve_file(file_path.as_ref())?;
        self.parse_file(&path)
    }

    /// Resolve `file_path` to an existing file
    fn resolve_file(&self, file_path: &Path) -> Result<PathBuf> {
        let path = self
            .resolver
            .resolve(file_path)
            .filter(|p| p.is_file())
            .ok_or_else(|| Error::NotFound(file_path.display().to_string()))?;
        debug!("Resolved {} to {}", file_path.display(), path.display());
        Ok(path)
    }

    fn parse_file(&self, path: &Path) -> Result<ConfigMap> {
        let parser = self
            .parsers
            .create_parser(path)
            .ok_or_else(|| Error::NoParser {
                path: path.to_path_buf(),
            })?;

        parser.parse(path).map_err(|e| match e.kind() {
            ErrorKind::ParseFailure | ErrorKind::InvalidFormat => e,
            _ => Error::parse(path, e),
        })
    }
}

/// Lowercased file name without its last extension
fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
