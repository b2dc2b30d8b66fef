//! Tests for the `mobilab-config` loader: defaults, file discovery, and
//! environment overrides.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use mobilab_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "MOBILAB_CONFIG",
    "MOBILAB__HTTP__ADDRESS",
    "MOBILAB__HTTP__PORT",
    "MOBILAB__DATABASE__URL",
    "MOBILAB__DATABASE__MAX_CONNECTIONS",
    "MOBILAB__ADMIN__HOST",
    "MOBILAB__ADMIN__USER_CREATION_API_KEY",
    "MOBILAB__ADMIN__SIGNUP_EDITOR_ROLE_ID",
    "MOBILAB__ADMIN__SIGNUP_AUTO_ACTIVATE",
];

struct EnvGuard {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl EnvGuard {
    fn new() -> Self {
        let mut guard = Self {
            vars: Vec::new(),
            original_dir: None,
        };
        for key in ENV_VARS_TO_RESET {
            guard.remove_var(key);
        }
        guard
    }

    fn set_var(&mut self, key: &str, value: &str) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value);
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn change_dir(&mut self, dir: &std::path::Path) {
        self.original_dir = std::env::current_dir().ok();
        std::env::set_current_dir(dir).expect("should change directory");
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        if let Some(dir) = self.original_dir.take() {
            let _ = std::env::set_current_dir(dir);
        }
        for (key, previous) in self.vars.drain(..).rev() {
            match previous {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn defaults_apply_without_file_or_env() {
    let _guard = EnvGuard::new();

    let config = load().expect("defaults should load");
    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 4321);
    assert_eq!(config.database.url, "sqlite://mobilab.db");
    assert_eq!(config.database.max_connections, 10);
    assert!(config.admin.host.is_none());
    assert_eq!(config.admin.signup_editor_role_id, 2);
}

#[test]
#[serial]
fn environment_overrides_take_precedence() {
    let mut guard = EnvGuard::new();
    guard.set_var("MOBILAB__HTTP__PORT", "9999");
    guard.set_var("MOBILAB__DATABASE__URL", "sqlite://override.db");
    guard.set_var("MOBILAB__ADMIN__HOST", "https://admin.example.org");

    let config = load().expect("overridden config should load");
    assert_eq!(config.http.port, 9999);
    assert_eq!(config.database.url, "sqlite://override.db");
    assert_eq!(config.admin.host.as_deref(), Some("https://admin.example.org"));
}

#[test]
#[serial]
fn config_file_is_discovered_in_working_directory() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("mobilab.toml"),
        r#"
[http]
address = "0.0.0.0"
port = 8088

[admin]
signup_auto_activate = true
"#,
    )
    .expect("should write config file");

    let mut guard = EnvGuard::new();
    guard.change_dir(temp.path());

    let config = load().expect("file-backed config should load");
    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 8088);
    assert!(config.admin.signup_auto_activate);
    // untouched sections keep their defaults
    assert_eq!(config.database.max_connections, 10);
}

#[test]
#[serial]
fn explicit_config_path_wins_over_discovery() {
    let temp = TempDir::new().expect("tempdir");
    let explicit = temp.path().join("explicit.toml");
    fs::write(&explicit, "[http]\nport = 7001\n").expect("should write config file");

    let mut guard = EnvGuard::new();
    guard.set_var("MOBILAB_CONFIG", explicit.to_str().unwrap());

    let config = load().expect("explicit config should load");
    assert_eq!(config.http.port, 7001);
}
