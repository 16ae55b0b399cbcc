//! Common test utilities for flatconf integration tests
//!
//! Provides a temp directory seeded with configuration files and a manager
//! rooted in it.

#![allow(dead_code)]

use flatconf::ConfigManager;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Fixture Files
// =============================================================================

pub const CONFIG_JSON: &str = r#"{
    "database": {
        "host": "localhost",
        "port": 3306,
        "credentials": {"user": "root", "password": "secret"}
    },
    "debug": false
}"#;

pub const APP_CONF: &str = "\
# application
name = demo
workers: 4
verbose yes
";

pub const ROUTES_PHP: &str = "\
<?php
return [
    'home' => '/',
    'admin' => ['path' => '/admin', 'secure' => true],
];
";

pub const CUSTOM_FILE: &str = "\
# key -> value pairs
first -> one
second -> two
";

// =============================================================================
// Test Fixture
// =============================================================================

/// Temp directory with fixture files and a manager resolving against it
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub manager: ConfigManager,
}

impl TestFixture {
    /// Create a new test fixture with default options
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_file(temp_dir.path(), "config.json", CONFIG_JSON);
        write_file(temp_dir.path(), "app.conf", APP_CONF);
        write_file(temp_dir.path(), "routes.php", ROUTES_PHP);
        write_file(temp_dir.path(), "pairs.custom", CUSTOM_FILE);

        let manager = ConfigManager::builder()
            .config_path(temp_dir.path())
            .build()
            .expect("Failed to create manager");

        Self { temp_dir, manager }
    }

    /// Path inside the fixture directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write an extra file into the fixture directory
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        write_file(self.temp_dir.path(), name, content)
    }
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
    }
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
