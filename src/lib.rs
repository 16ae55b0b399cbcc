//! # flatconf - Flat Configuration Store
//!
//! A Rust library that loads configuration files in several formats, flattens
//! nested data into dot-notated keys and keeps the result in a grouped
//! key/value store that can be cached to disk.
//!
//! ## Features
//!
//! - **Many Formats**: JSON, CONF and PHP array files built in; YAML, XML and INI
//!   by default; TOML behind the `toml` feature
//! - **Flattening**: `{"database": {"host": ..}}` in `config.json` becomes
//!   `config.database.host`, with a configurable depth limit
//! - **Groups**: every key loaded from a file is grouped under the file name,
//!   so a whole file can be deleted at once
//! - **Cache Files**: snapshot the store to JSON with an optional expiry
//! - **Custom Parsers**: register any [`Parser`] for a file extension
//!
//! ## Quick Start
//!
//! ```rust
//! use flatconf::ConfigManager;
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(
//!     dir.path().join("database.json"),
//!     r#"{"primary": {"host": "localhost", "port": 5432}}"#,
//! ).unwrap();
//!
//! let mut config = ConfigManager::builder()
//!     .config_path(dir.path())
//!     .build()?;
//! config.load("database.json")?;
//!
//! assert_eq!(config.get("database.primary.port"), Some(&json!(5432)));
//!
//! // Keys added with a dot join the group named by their first segment
//! config.add("database.replica.host", "10.0.0.2");
//!
//! // Deleting the group removes everything loaded from database.json
//! config.delete("database");
//! assert!(config.all().is_empty());
//! # Ok::<(), flatconf::Error>(())
//! ```
//!
//! ## Cache Files
//!
//! ```rust
//! use flatconf::{ConfigManager, EXPIRE_ONE_WEEK};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let cache = dir.path().join("config.cache.json");
//!
//! let mut config = ConfigManager::default();
//! config.add("app.name", "demo");
//! config.save_cache(&cache, EXPIRE_ONE_WEEK)?;
//!
//! let mut warm = ConfigManager::default();
//! if !warm.load_cache(&cache)? {
//!     // expired or missing: load the source files again
//! }
//! # Ok::<(), flatconf::Error>(())
//! ```
//!
//! ## Custom Parsers
//!
//! ```rust
//! use flatconf::{ConfigManager, ConfigMap, Parser, Result, parsers::{factory, read_source}};
//! use serde_json::Value;
//! use std::path::Path;
//!
//! #[derive(Default)]
//! struct LinesParser;
//!
//! impl Parser for LinesParser {
//!     fn parse(&self, path: &Path) -> Result<ConfigMap> {
//!         Ok(read_source(path)?
//!             .lines()
//!             .enumerate()
//!             .map(|(i, line)| (i.to_string(), Value::String(line.to_string())))
//!             .collect())
//!     }
//! }
//!
//! let config = ConfigManager::builder()
//!     .with_parser("lines", factory::<LinesParser>())
//!     .build()?;
//! assert!(config.parsers().contains("lines"));
//! # Ok::<(), flatconf::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade. Install any logger (for example
//! `env_logger`) to see resolution, parsing and cache activity.

mod cache;
mod config;
mod error;
mod flatten;
mod manager;
pub mod parsers;
mod resolver;
mod storage;

// Re-exports
pub use cache::{CacheRecord, EXPIRE_NEVER, EXPIRE_ONE_DAY, EXPIRE_ONE_MONTH, EXPIRE_ONE_WEEK};
pub use config::{
    ConfigMap, ConfigOptions, ConfigOptionsBuilder, DEFAULT_MAX_DEPTH, GroupMembers, Groups,
};
pub use error::{Error, ErrorKind, Result};
pub use flatten::{Flattened, Flattener};
pub use manager::{ConfigManager, ConfigManagerBuilder};
pub use parsers::{ConfParser, JsonParser, Parser, ParserFactory, ParserRegistry, PhpParser};
pub use resolver::PathResolver;
pub use storage::{JsonStorage, StorageBackend};

#[cfg(feature = "ini")]
pub use parsers::IniParser;
#[cfg(feature = "toml")]
pub use parsers::TomlParser;
#[cfg(feature = "xml")]
pub use parsers::XmlParser;
#[cfg(feature = "yaml")]
pub use parsers::YamlParser;

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
