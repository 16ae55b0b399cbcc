//! Configuration manager module
//!
//! This module contains the [`ConfigManager`] struct which is the primary entry point
//! for loading, querying and caching configuration.

mod builder;
mod cache;
mod core;
mod io;
mod operations;

pub use builder::ConfigManagerBuilder;
pub use self::core::ConfigManager;
