//! Core configuration types
//!
//! This module contains the foundational types for the configuration store:
//! - `ConfigMap` / `Groups` - The flat key/value map and its group index
//! - `ConfigOptions` - Options for the configuration manager

mod types;

pub(crate) use types::{expand_home, validate_config_dir, validate_max_depth};
pub use types::{
    ConfigMap, ConfigOptions, ConfigOptionsBuilder, DEFAULT_MAX_DEPTH, GroupMembers, Groups,
};
