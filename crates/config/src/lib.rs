use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "mobilab.toml",
    "config/mobilab.toml",
    "crates/config/mobilab.toml",
    "../mobilab.toml",
    "../config/mobilab.toml",
    "../crates/config/mobilab.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admin: AdminApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 4321,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://mobilab.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for the external admin application that owns user creation.
///
/// ```
/// use mobilab_config::AdminApiConfig;
///
/// let admin = AdminApiConfig::default();
/// assert_eq!(admin.signup_editor_role_id, 2);
/// assert!(!admin.signup_auto_activate);
/// assert!(admin.host.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminApiConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user_creation_api_key: Option<String>,
    #[serde(default = "AdminApiConfig::default_signup_role_id")]
    pub signup_editor_role_id: i64,
    #[serde(default)]
    pub signup_auto_activate: bool,
    #[serde(default = "AdminApiConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl AdminApiConfig {
    const fn default_signup_role_id() -> i64 {
        2
    }

    const fn default_request_timeout() -> u64 {
        30
    }
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            host: None,
            user_creation_api_key: None,
            signup_editor_role_id: Self::default_signup_role_id(),
            signup_auto_activate: false,
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use mobilab_config::load;
///
/// std::env::remove_var("MOBILAB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default(
            "admin.signup_editor_role_id",
            defaults.admin.signup_editor_role_id,
        )
        .unwrap()
        .set_default("admin.signup_auto_activate", false)
        .unwrap()
        .set_default(
            "admin.request_timeout_seconds",
            i64::try_from(defaults.admin.request_timeout_seconds).unwrap_or(i64::MAX),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("MOBILAB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("MOBILAB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via MOBILAB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
