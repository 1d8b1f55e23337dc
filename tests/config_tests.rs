//! Integration tests for configuration management

use skyebridge::config::{Config, ConfigOverrides};
use skyebridge::Settings;
use std::time::Duration;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.render.cdn_url.is_empty(),
        "Default cdn_url should not be empty"
    );
    assert!(
        !config.render.library_path.is_empty(),
        "Default library_path should not be empty"
    );
    assert!(!config.logging.verbose);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[render]
title = "Orders"
cdn_url = "https://cdn.example.test/vis.js"
library_path = "/opt/vis.js"

[network]
timeout_secs = 12

[minify]
timeout_secs = 7
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.render.title, "Orders");
    assert_eq!(config.render.cdn_url, "https://cdn.example.test/vis.js");
    assert_eq!(config.render.library_path, "/opt/vis.js");
    assert_eq!(config.network.timeout_secs, 12);
    assert_eq!(config.minify.timeout_secs, 7);
}

#[test]
fn test_config_from_toml_partial() {
    let config = Config::from_toml("[render]\ntitle = \"Only title\"\n")
        .expect("Failed to parse partial TOML");

    assert_eq!(config.render.title, "Only title");
    assert!(config.render.cdn_url.is_empty());
    assert_eq!(config.network.timeout_secs, 0);
}

#[test]
fn test_config_from_toml_invalid() {
    assert!(Config::from_toml("[render\ntitle = ").is_err());
    assert!(Config::from_toml("[network]\ntimeout_secs = \"soon\"\n").is_err());
}

#[test]
fn test_merge_defaults_fills_missing() {
    let defaults = Config::from_defaults();
    let mut config = Config::from_toml("[render]\ntitle = \"Kept\"\n").unwrap();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.render.title, "Kept");
    assert_eq!(config.render.cdn_url, defaults.render.cdn_url);
    assert_eq!(config.render.library_path, defaults.render.library_path);
    assert_eq!(config.network.timeout_secs, defaults.network.timeout_secs);
    assert_eq!(config.minify.timeout_secs, defaults.minify.timeout_secs);
}

#[test]
fn test_merge_defaults_no_changes() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_apply_overrides() {
    let mut config = Config::from_defaults();
    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        title: Some("Override".to_string()),
        timeout_secs: Some(3),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.render.title, "Override");
    assert_eq!(config.network.timeout_secs, 3);
    assert_eq!(config.minify.timeout_secs, 60);
}

#[test]
fn test_apply_empty_overrides_keeps_config() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();
    config.apply_overrides(&ConfigOverrides::default());
    assert_eq!(config.to_string(), defaults.to_string());
}

#[test]
fn test_get_set_unset() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();

    config.set("cdn-url", "https://cdn.example.test/vis.js").unwrap();
    assert_eq!(
        config.get("cdn_url").as_deref(),
        Some("https://cdn.example.test/vis.js")
    );

    config.set("minify_timeout", "90").unwrap();
    assert_eq!(config.get("minify-timeout").as_deref(), Some("90"));

    config.set("verbose", "true").unwrap();
    assert!(config.logging.verbose);

    config.unset("cdn_url", &defaults).unwrap();
    config.unset("minify_timeout", &defaults).unwrap();
    assert_eq!(config.render.cdn_url, defaults.render.cdn_url);
    assert_eq!(config.minify.timeout_secs, defaults.minify.timeout_secs);
}

#[test]
fn test_invalid_values_and_keys() {
    let mut config = Config::from_defaults();

    let err = config.set("verbose", "maybe").unwrap_err();
    assert!(err.contains("Invalid boolean value"));
    assert!(config.set("timeout", "-1").is_err());

    assert_eq!(
        config.set("unknown", "x").unwrap_err(),
        "Unknown config key: 'unknown'"
    );
    assert!(config.get("unknown").is_none());
    assert!(config.unset("unknown", &Config::from_defaults()).is_err());
}

#[test]
fn test_display_lists_sections() {
    let shown = Config::from_defaults().to_string();
    for section in ["[logging]", "[render]", "[network]", "[minify]"] {
        assert!(shown.contains(section), "missing {section}");
    }
    assert!(shown.contains("title = \"Flow Diagram\""));
}

#[test]
fn test_settings_from_config() {
    let mut config = Config::from_defaults();
    config.set("timeout", "4").unwrap();
    config.set("minify_timeout", "8").unwrap();
    config.set("library_path", "/opt/vis.js").unwrap();

    let settings = Settings::from(&config);
    assert_eq!(settings.fetch_timeout, Duration::from_secs(4));
    assert_eq!(settings.minify_timeout, Duration::from_secs(8));
    assert_eq!(settings.library_path.to_str(), Some("/opt/vis.js"));
    assert_eq!(settings.cdn_url, config.render.cdn_url);
}
