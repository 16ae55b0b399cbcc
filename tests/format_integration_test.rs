//! YAML, XML and INI Integration Tests
//!
//! Requires the default `yaml`, `xml` and `ini` features.

mod common;

use common::TestFixture;
use flatconf::{ConfigManager, EXPIRE_NEVER, ErrorKind};
use serde_json::json;

const SERVICES_YAML: &str = "\
database:
  host: db.internal
  port: 5432
  replicas:
    - host: r1
    - host: r2
cache:
  enabled: true
";

const SITE_XML: &str = r#"<?xml version="1.0"?>
<site lang="en">
    <title>Example</title>
    <mail smtp="mail.example.com">
        <port>587</port>
    </mail>
    <mirror>a.example.com</mirror>
    <mirror>b.example.com</mirror>
</site>
"#;

const PHP_INI: &str = "\
timezone = UTC

[session]
lifetime = 120
secure = on
name = \"SESSID\"
";

#[test]
fn test_yaml_load() {
    let mut fixture = TestFixture::new();
    fixture.write("services.yml", SERVICES_YAML);

    fixture.manager.load("services.yml").unwrap();

    let config = &fixture.manager;
    assert_eq!(config.get_or("services.database.host", ""), "db.internal");
    assert_eq!(config.get_or("services.database.port", 0), 5432);
    assert_eq!(config.get_or("services.database.replicas.1.host", ""), "r2");
    assert_eq!(config.get_or("services.cache.enabled", false), true);
}

#[test]
fn test_xml_load() {
    let mut fixture = TestFixture::new();
    fixture.write("site.xml", SITE_XML);

    fixture.manager.load("site.xml").unwrap();

    let config = &fixture.manager;
    assert_eq!(config.get_or("site.title", ""), "Example");
    assert_eq!(config.get_or("site.mail.@smtp", ""), "mail.example.com");
    assert_eq!(config.get_or("site.mail.port", 0), 587);
    assert_eq!(config.get_or("site.mirror.0", ""), "a.example.com");
    assert_eq!(config.get_or("site.mirror.1", ""), "b.example.com");
    // root attributes survive even though the root element name does not
    assert_eq!(config.get_or("site.@lang", ""), "en");
}

#[test]
fn test_ini_load() {
    let mut fixture = TestFixture::new();
    fixture.write("php.ini", PHP_INI);

    fixture.manager.load("php.ini").unwrap();

    let config = &fixture.manager;
    assert_eq!(config.get_or("php.timezone", ""), "UTC");
    assert_eq!(config.get_or("php.session.lifetime", 0), 120);
    assert_eq!(config.get_or("php.session.secure", false), true);
    assert_eq!(config.get_or("php.session.name", ""), "SESSID");
}

#[test]
fn test_malformed_files() {
    let mut fixture = TestFixture::new();
    fixture.write("bad.yaml", "key: [unclosed\n");
    fixture.write("bad.xml", "<root><open></root>");
    fixture.write("bad.ini", "[section\n");

    for name in ["bad.yaml", "bad.xml", "bad.ini"] {
        let err = fixture.manager.load(name).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure, "{name}: {err}");
    }
    assert!(fixture.manager.all().is_empty());
}

#[test]
fn test_mixed_formats_share_one_cache() {
    let mut fixture = TestFixture::new();
    fixture.write("services.yaml", SERVICES_YAML);
    fixture.write("site.xml", SITE_XML);
    fixture.write("php.ini", PHP_INI);
    for name in ["services.yaml", "site.xml", "php.ini", "config.json"] {
        fixture.manager.load(name).unwrap();
    }
    let cache = fixture.path("all.cache.json");
    assert!(fixture.manager.save_cache(&cache, EXPIRE_NEVER).unwrap());

    let mut restored = ConfigManager::default();
    assert!(restored.load_cache(&cache).unwrap());
    assert_eq!(restored.all(), fixture.manager.all());

    restored.delete("site");
    assert!(!restored.has("site.title"));
    assert_eq!(restored.get("php.session.lifetime"), Some(&json!(120)));
}
