//! Where cache records live on disk
//!
//! A backend owns the encoding of a cache file and the file handling around
//! it: missing directories are created, read-only caches are left alone and
//! a write never leaves a half-written cache behind.

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::io;
use std::path::Path;

/// Encoding and file handling for cache records
///
/// The cache record is a plain serde structure, so any self-describing
/// text format can back it.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "json")
    fn extension(&self) -> &str;

    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content)
    }

    /// Serialize `data` and replace the cache at `path` with it
    ///
    /// The content goes to a `.tmp` sibling first, which is then renamed over
    /// the target. An existing read-only cache is refused with
    /// [`Error::FileWrite`] before anything is touched.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        let read_only = std::fs::metadata(path)
            .is_ok_and(|m| m.is_file() && m.permissions().readonly());
        if read_only {
            return Err(Error::FileWrite {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "cache file is read-only"),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file_name = path.file_name().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }

    /// Remove the cache at `path`, returning whether a file was removed
    fn remove(&self, path: &Path) -> Result<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::FileDelete {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default), always pretty printed
#[derive(Clone, Debug, Default)]
pub struct JsonStorage;

impl JsonStorage {
    /// Create a new JSON storage backend
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        serde_json::to_string_pretty(data).map_err(Error::from)
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
