//! Cache file persistence for `ConfigManager`

use super::ConfigManager;
use crate::cache::{CacheRecord, describe_expiry, expiry_timestamp, now_timestamp};
use crate::config::{ConfigMap, Groups};
use crate::error::{Error, ErrorKind, Result};
use crate::storage::StorageBackend;

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Borrowed view of the store written to disk
#[derive(Serialize)]
struct CacheSnapshot<'a> {
    config: &'a ConfigMap,
    groups: &'a Groups,
    expires: i64,
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Save the whole store to `path`.
    ///
    /// `expires_in` is a lifetime in seconds; [`EXPIRE_NEVER`](crate::EXPIRE_NEVER)
    /// writes a cache that never expires. Missing parent directories are
    /// created.
    ///
    /// Returns `Ok(false)` when the directory cannot be created, the target
    /// is read-only, or the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be serialized or `path` has no
    /// file name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::{ConfigManager, EXPIRE_ONE_DAY};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = dir.path().join("cache/config.json");
    ///
    /// let mut config = ConfigManager::default();
    /// config.add("app.name", "demo");
    /// assert!(config.save_cache(&cache, EXPIRE_ONE_DAY)?);
    ///
    /// let mut restored = ConfigManager::default();
    /// assert!(restored.load_cache(&cache)?);
    /// assert_eq!(restored.get_or("app.name", ""), "demo");
    /// # Ok::<(), flatconf::Error>(())
    /// ```
    pub fn save_cache(&self, path: impl AsRef<Path>, expires_in: u64) -> Result<bool> {
        let path = path.as_ref();
        let expires = expiry_timestamp(now_timestamp(), expires_in);
        let snapshot = CacheSnapshot {
            config: &self.config,
            groups: &self.groups,
            expires,
        };

        match self.storage.write(path, &snapshot) {
            Ok(()) => {
                info!(
                    "Saved {} keys to cache {} (expires: {})",
                    self.config.len(),
                    path.display(),
                    describe_expiry(expires)
                );
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::Io => {
                warn!("Failed to write cache {}: {e}", path.display());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the store with the contents of a cache file.
    ///
    /// Returns `Ok(true)` at once if a cache was already loaded. Returns
    /// `Ok(false)` when the file is missing or unreadable, and when it has
    /// expired, in which case the file is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the file does not hold a valid
    /// cache record.
    pub fn load_cache(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        if self.cache_loaded {
            debug!("Cache already loaded, skipping");
            return Ok(true);
        }

        let path = path.as_ref();
        if !path.is_file() {
            debug!("No cache at {}", path.display());
            return Ok(false);
        }

        let raw: Value = match self.storage.read(path) {
            Ok(raw) => raw,
            Err(e @ Error::FileRead { .. }) => {
                warn!("{e}");
                return Ok(false);
            }
            Err(e) => {
                return Err(Error::InvalidFormat(format!(
                    "cache {} is not valid {}: {e}",
                    path.display(),
                    self.storage.extension()
                )));
            }
        };

        let record = CacheRecord::from_value(raw)?;
        if record.is_expired(now_timestamp()) {
            info!(
                "Cache {} expired at {}, removing it",
                path.display(),
                describe_expiry(record.expires)
            );
            self.delete_cache(path);
            return Ok(false);
        }

        info!(
            "Loaded {} keys from cache {}",
            record.config.len(),
            path.display()
        );
        self.config = record.config;
        self.groups = record.groups;
        self.cache_loaded = true;
        Ok(true)
    }

    /// Delete a cache file, returning whether one was removed
    pub fn delete_cache(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.storage.remove(path) {
            Ok(removed) => {
                if removed {
                    debug!("Deleted cache {}", path.display());
                }
                removed
            }
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }
}
