use crate::config::{ConfigMap, ConfigOptions, Groups};
use crate::error::Result;
use crate::flatten::Flattener;
use crate::parsers::ParserRegistry;
use crate::resolver::PathResolver;
use crate::storage::{JsonStorage, StorageBackend};

use log::{debug, info};
use std::path::{Path, PathBuf};

/// Configuration store loading files into a flat, grouped key/value map.
///
/// The `ConfigManager` ties the pieces together:
///
/// - **Loading**: resolve a file name, pick a parser by extension, parse
/// - **Flattening**: nested data becomes dot-notated keys grouped by file name
/// - **Queries**: `has`, `get`, `add`, `delete` over the flat map
/// - **Caching**: snapshot the whole store to a file with an optional expiry
///
/// # Example
///
/// ```rust,no_run
/// use flatconf::ConfigManager;
///
/// let mut config = ConfigManager::builder()
///     .config_path("~/.config/my-app")
///     .max_depth(5)
///     .build()?;
///
/// config.load("database.yaml")?;
/// let host = config.get_or("database.host", "localhost");
/// # Ok::<(), flatconf::Error>(())
/// ```
///
/// # Type Parameters
///
/// * `S`: storage backend used for cache files (defaults to [`JsonStorage`]).
#[derive(Debug, Clone)]
pub struct ConfigManager<S: StorageBackend = JsonStorage> {
    /// Resolves bare file names against the configured directory
    pub(crate) resolver: PathResolver,

    /// Whether `load` flattens nested data
    pub(crate) flatten: bool,

    pub(crate) flattener: Flattener,

    /// Flat key/value store
    pub(crate) config: ConfigMap,

    /// Group name to member keys
    pub(crate) groups: Groups,

    /// Set once a cache file has been loaded
    pub(crate) cache_loaded: bool,

    pub(crate) parsers: ParserRegistry,

    /// Storage backend for cache files
    pub(crate) storage: S,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            resolver: PathResolver::new(),
            flatten: true,
            flattener: Flattener::default(),
            config: ConfigMap::new(),
            groups: Groups::new(),
            cache_loaded: false,
            parsers: ParserRegistry::default(),
            storage: JsonStorage::new(),
        }
    }
}

impl ConfigManager {
    /// Create a manager with the default JSON cache storage.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidPath`](crate::Error::InvalidPath) if `config_path` is
    ///   not an existing directory
    /// * [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    ///   `max_depth` is 0
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::{ConfigManager, ConfigOptions};
    ///
    /// let manager = ConfigManager::new(ConfigOptions::default())?;
    /// assert!(manager.all().is_empty());
    /// # Ok::<(), flatconf::Error>(())
    /// ```
    pub fn new(options: ConfigOptions) -> Result<Self> {
        Self::with_storage(options, JsonStorage::new())
    }

    /// Create a builder for `ConfigManager` with a fluent API.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatconf::ConfigManager;
    ///
    /// let manager = ConfigManager::builder().flatten(false).build()?;
    /// assert!(!manager.flatten_enabled());
    /// # Ok::<(), flatconf::Error>(())
    /// ```
    pub fn builder() -> crate::manager::ConfigManagerBuilder {
        crate::manager::ConfigManagerBuilder::new()
    }
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Create a manager writing cache files through `storage`.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigManager::new`].
    pub fn with_storage(options: ConfigOptions, storage: S) -> Result<Self> {
        options.validate()?;

        let resolver = match options.config_path {
            Some(dir) => PathResolver::with_base(dir)?,
            None => PathResolver::new(),
        };
        let flattener = Flattener::new(options.max_depth)?;

        info!(
            "Initialized ConfigManager (config path: {}, flatten: {}, max depth: {})",
            resolver
                .base()
                .map_or_else(|| "none".to_string(), |p| p.display().to_string()),
            options.flatten,
            options.max_depth
        );

        Ok(Self {
            resolver,
            flatten: options.flatten,
            flattener,
            config: ConfigMap::new(),
            groups: Groups::new(),
            cache_loaded: false,
            parsers: ParserRegistry::default(),
            storage,
        })
    }

    /// Directory bare file names are resolved against
    pub fn config_path(&self) -> Option<&Path> {
        self.resolver.base()
    }

    /// Set the directory bare file names are resolved against.
    ///
    /// Supports `~` expansion for home directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`](crate::Error::InvalidPath) if `path` is not
    /// an existing directory. The previous directory is kept in that case.
    pub fn set_config_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.resolver.set_base(Some(path.into()))?;
        debug!("Config path set to {:?}", self.resolver.base());
        Ok(())
    }

    /// Stop resolving bare file names against a directory
    pub fn clear_config_path(&mut self) {
        // Clearing never fails
        let _ = self.resolver.set_base(None);
    }

    /// Whether `load` flattens nested data
    pub fn flatten_enabled(&self) -> bool {
        self.flatten
    }

    /// Enable or disable flattening for subsequent loads
    pub fn set_flatten(&mut self, flatten: bool) {
        self.flatten = flatten;
    }

    /// Maximum nesting depth accepted while flattening
    pub fn max_depth(&self) -> usize {
        self.flattener.max_depth()
    }

    /// Set the maximum nesting depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `depth` is 0.
    pub fn set_max_depth(&mut self, depth: usize) -> Result<()> {
        self.flattener = Flattener::new(depth)?;
        Ok(())
    }

    /// Every stored key and value
    pub fn all(&self) -> &ConfigMap {
        &self.config
    }

    /// Every group and its member keys
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Whether a cache file has been loaded since construction or the last `clear`
    pub fn is_cache_loaded(&self) -> bool {
        self.cache_loaded
    }

    /// Parser registry used by `load` and `fetch`
    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Mutable parser registry, for registering or removing formats
    pub fn parsers_mut(&mut self) -> &mut ParserRegistry {
        &mut self.parsers
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
