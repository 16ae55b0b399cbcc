//! Key/value operations for `ConfigManager`

use super::ConfigManager;
use crate::config::{ConfigMap, Groups};
use crate::error::{Error, Result};
use crate::storage::StorageBackend;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

impl<S: StorageBackend> ConfigManager<S> {
    /// Check whether `key` is a stored key or a group name
    pub fn has(&self, key: &str) -> bool {
        self.config.contains_key(key) || self.groups.contains_key(key)
    }

    /// Store `value` under `key`.
    ///
    /// A dot-notated key is also registered in the group named by its first
    /// segment, so deleting that group removes it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::ConfigManager;
    ///
    /// let mut config = ConfigManager::default();
    /// config.add("app.debug", true);
    ///
    /// assert_eq!(config.get_or("app.debug", false), true);
    /// config.delete("app");
    /// assert!(!config.has("app.debug"));
    /// ```
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if let Some((group, sub_key)) = key.split_once('.').filter(|(g, _)| !g.is_empty()) {
            self.groups
                .entry(group.to_string())
                .or_default()
                .insert(key.clone(), sub_key.to_string());
        }
        self.config.insert(key, value.into());
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Get the value stored under `key`, or `default` when absent
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.config.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Get the value stored under `key` converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the stored value cannot be converted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::ConfigManager;
    ///
    /// let mut config = ConfigManager::default();
    /// config.add("server.port", 8080);
    ///
    /// let port: Option<u16> = config.get_as("server.port")?;
    /// assert_eq!(port, Some(8080));
    /// assert!(config.get_as::<bool>("server.port").is_err());
    /// # Ok::<(), flatconf::Error>(())
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.config
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| Error::TypeMismatch {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Delete a group or a single key.
    ///
    /// For a group name every member key is removed, then the group itself.
    /// Otherwise the key is removed along with its group membership; groups
    /// left without members are dropped. Absent keys are ignored.
    pub fn delete(&mut self, key: &str) {
        if let Some(members) = self.groups.remove(key) {
            self.config.retain(|k, _| !members.contains_key(k));
            // a key can sit in several groups, e.g. `app` and `app.prod`
            self.groups.retain(|_, others| {
                others.retain(|k, _| !members.contains_key(k));
                !others.is_empty()
            });
            debug!("Deleted group '{key}' ({} keys)", members.len());
            return;
        }

        if self.config.shift_remove(key).is_some() {
            self.groups.retain(|_, members| {
                members.remove(key);
                !members.is_empty()
            });
        }
    }

    /// Merge values and groups into the store.
    ///
    /// Values overwrite existing keys. Groups present on both sides keep the
    /// union of their members, incoming entries winning.
    pub fn insert(&mut self, config: ConfigMap, groups: Groups) {
        debug!(
            "Merging {} keys and {} groups into the store",
            config.len(),
            groups.len()
        );
        self.config.extend(config);
        for (name, members) in groups {
            self.groups.entry(name).or_default().extend(members);
        }
    }

    /// Remove every key and group
    pub fn clear(&mut self) {
        self.config.clear();
        self.groups.clear();
        self.cache_loaded = false;
    }
}
