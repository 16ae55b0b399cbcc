//! Configuration Workflow Integration Tests
//!
//! Load files from several formats into one store and query it:
//! - Flattening and grouping by file name
//! - Manual additions and group deletion
//! - Raw loads with flattening disabled

mod common;

use common::TestFixture;
use flatconf::{ConfigManager, Value};
use serde_json::json;

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_json_flattens_under_file_name() {
    let mut fixture = TestFixture::new();

    fixture.manager.load("config.json").unwrap();

    let config = &fixture.manager;
    assert!(config.has("config.database.host"));
    assert_eq!(config.get_or("config.database.host", ""), "localhost");
    assert_eq!(config.get_or("config.database.port", 0), 3306);
    assert_eq!(
        config.get("config.database.credentials.user"),
        Some(&json!("root"))
    );
    assert_eq!(config.get("config.debug"), Some(&json!(false)));
    assert!(config.has("config"));
}

#[test]
fn test_load_keeps_document_order() {
    let mut fixture = TestFixture::new();
    fixture.manager.load("config.json").unwrap();

    let keys: Vec<&str> = fixture.manager.all().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "config.database.host",
            "config.database.port",
            "config.database.credentials.user",
            "config.database.credentials.password",
            "config.debug",
        ]
    );
}

#[test]
fn test_load_several_formats() {
    let mut fixture = TestFixture::new();

    fixture.manager.load("config.json").unwrap();
    fixture.manager.load("app.conf").unwrap();
    fixture.manager.load("routes.php").unwrap();

    let config = &fixture.manager;
    assert_eq!(config.get_or("app.name", ""), "demo");
    assert_eq!(config.get_or("app.workers", 0), 4);
    assert_eq!(config.get_or("app.verbose", false), true);
    assert_eq!(config.get_or("routes.home", ""), "/");
    assert_eq!(config.get_or("routes.admin.secure", false), true);

    let groups: Vec<&str> = config.groups().keys().map(String::as_str).collect();
    assert_eq!(groups, vec!["app", "config", "routes"]);
}

#[test]
fn test_load_absolute_path_without_base() {
    let fixture = TestFixture::new();
    let mut config = ConfigManager::default();

    config.load(fixture.path("config.json")).unwrap();

    assert!(config.has("config.database.port"));
}

#[test]
fn test_reload_is_idempotent() {
    let mut fixture = TestFixture::new();

    fixture.manager.load("config.json").unwrap();
    let first = fixture.manager.all().clone();
    let groups = fixture.manager.groups().clone();
    fixture.manager.load("config.json").unwrap();

    assert_eq!(fixture.manager.all(), &first);
    assert_eq!(fixture.manager.groups(), &groups);
}

#[test]
fn test_later_loads_win() {
    let mut fixture = TestFixture::new();
    fixture.manager.load("config.json").unwrap();

    fixture.write("override/config.json", r#"{"debug": true}"#);
    fixture.manager.load("override/config.json").unwrap();

    assert_eq!(fixture.manager.get("config.debug"), Some(&json!(true)));
    assert!(fixture.manager.has("config.database.host"));
}

#[test]
fn test_load_raw_when_flattening_disabled() {
    let mut fixture = TestFixture::new();
    fixture.manager.set_flatten(false);

    fixture.manager.load("config.json").unwrap();

    let config = &fixture.manager;
    assert_eq!(config.get("database").unwrap()["port"], json!(3306));
    assert!(!config.has("config"));
    assert!(config.groups().is_empty());

    // toggling back only affects later loads
    fixture.manager.set_flatten(true);
    fixture.manager.load("app.conf").unwrap();
    assert!(fixture.manager.has("app.name"));
    assert!(fixture.manager.has("database"));
}

#[test]
fn test_fetch_returns_nested_data() {
    let fixture = TestFixture::new();

    let raw = fixture.manager.fetch("routes.php").unwrap();

    assert_eq!(raw["admin"]["path"], json!("/admin"));
    assert!(fixture.manager.all().is_empty());
}

// =============================================================================
// Manual Changes
// =============================================================================

#[test]
fn test_add_then_delete_group() {
    let mut fixture = TestFixture::new();
    fixture.manager.load("config.json").unwrap();

    fixture.manager.add("config.extra", "value");
    fixture.manager.add("standalone", 1);
    fixture.manager.delete("config");

    let config = &fixture.manager;
    assert!(!config.has("config"));
    assert!(!config.has("config.extra"));
    assert!(!config.has("config.database.host"));
    assert_eq!(config.all().len(), 1);
    assert_eq!(config.get("standalone"), Some(&json!(1)));
}

#[test]
fn test_dot_add_creates_group() {
    let mut config = ConfigManager::default();

    config.add("app.debug", true);

    assert_eq!(config.get("app.debug"), Some(&Value::Bool(true)));
    assert!(config.has("app"));
    config.delete("app");
    assert!(!config.has("app.debug"));
}

#[test]
fn test_typed_access() {
    let mut fixture = TestFixture::new();
    fixture.manager.load("config.json").unwrap();

    let port: Option<u16> = fixture.manager.get_as("config.database.port").unwrap();
    assert_eq!(port, Some(3306));

    let debug: Option<bool> = fixture.manager.get_as("config.debug").unwrap();
    assert_eq!(debug, Some(false));

    assert!(fixture.manager.get_as::<u16>("config.database.host").is_err());
}

#[test]
fn test_clear_then_reload() {
    let mut fixture = TestFixture::new();
    fixture.manager.load("config.json").unwrap();

    fixture.manager.clear();
    assert!(fixture.manager.all().is_empty());

    fixture.manager.load("app.conf").unwrap();
    assert_eq!(fixture.manager.all().len(), 3);
}
