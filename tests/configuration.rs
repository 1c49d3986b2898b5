//! Tests for configuration system

use mealweek::{Config, config::LogFormat};

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.logging.file, "meal_planner.log");
    assert_eq!(config.logging.max_bytes, 10_000);
    assert_eq!(config.logging.backup_count, 1);
    assert_eq!(config.export.filename_prefix, "shopping_list");
    assert_eq!(config.session.idle_ttl_secs, 86_400);
    assert_eq!(config.session.max_sessions, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.child("mealweek.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 8080

[generation]
model = "mistral"

[logging]
format = "json"

[export]
filename_prefix = "groceries"
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.display().to_string())).expect("Failed to load config");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.generation.model, "mistral");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.export.filename_prefix, "groceries");
    assert_eq!(
        config.export.timestamp_format,
        "[year][month][day]_[hour][minute][second]"
    );
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.child("mealweek.toml");
    std::fs::write(&path, "[generation]\ntimeout_secs = 0\n").unwrap();

    let config = Config::load(Some(path.display().to_string())).expect("Failed to load config");

    assert!(config.validate().is_err());
}
