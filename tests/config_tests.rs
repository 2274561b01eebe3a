use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tradedesk::error::{ConfigError, Error};
use tradedesk::infrastructure::config::auth::SECRET_KEY_ENV;
use tradedesk::infrastructure::config::settings::Config;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[server]
bind = "0.0.0.0:8080"

[database]
path = "data/trading.sqlite"
pool_size = 2

[tables]
allow = ["Traders", "Stocks"]

[[tables.hashed_fields]]
table = "Traders"
column = "Password"

[logging]
format = "json"
"#,
    );

    let config = Config::load(&path).expect("load config");
    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.database.pool_size, 2);
    assert_eq!(config.database.connection_options().max_size, 2);

    let allow = config.tables.allow_list();
    assert_eq!(allow.len(), 2);
    let traders = allow.resolve("Traders").unwrap();
    assert!(config.tables.field_hooks().is_hashed(traders, "Password"));
    assert!(allow.resolve("Portfolio").is_none());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config.server.bind, "127.0.0.1:5000");
    assert_eq!(config.tables.allow_list().len(), 5);
}

#[test]
fn config_rejects_hook_outside_allow_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[tables]
allow = ["Stocks"]

[[tables.hashed_fields]]
table = "Traders"
column = "Password"
"#,
    );

    let err = Config::load(&path).expect_err("hook on unlisted table");
    assert!(err.to_string().contains("tables.hashed_fields"), "{err}");
}

#[test]
fn config_rejects_zero_workers() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[server]\nworkers = 0\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "server.workers",
            ..
        }))
    ));
}

#[test]
fn secret_key_env_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[auth]\nsecret_key = \"from-file\"\n");

    std::env::set_var(SECRET_KEY_ENV, "from-env");
    let config = Config::load(&path);
    std::env::remove_var(SECRET_KEY_ENV);

    assert_eq!(config.expect("load config").auth.secret_key, "from-env");
}
