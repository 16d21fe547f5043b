//! Server configuration loading from file and environment variables.

use sakila_db::DbRuntimeSettings;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rental policy.
    #[serde(default)]
    pub rentals: RentalsConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "sakila_store=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Rental policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RentalsConfig {
    /// Staff member recorded on rentals created through the API.
    #[serde(default = "default_staff_id")]
    pub staff_id: i64,

    /// Whether `customer_id = 0` may return every active rental at once.
    #[serde(default = "default_allow_bulk_return")]
    pub allow_bulk_return: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "sakila.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DbRuntimeSettings::default().busy_timeout_ms
}

fn default_pool_max_size() -> u32 {
    DbRuntimeSettings::default().pool_max_size
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_staff_id() -> i64 {
    1
}

fn default_allow_bulk_return() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl DatabaseConfig {
    /// Connection tunables handed to [`sakila_db::create_pool`].
    pub fn runtime_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for RentalsConfig {
    fn default() -> Self {
        Self {
            staff_id: default_staff_id(),
            allow_bulk_return: default_allow_bulk_return(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `SAKILA_HOST` overrides `server.host`
/// - `SAKILA_PORT` overrides `server.port`
/// - `SAKILA_DB_PATH` overrides `database.path`
/// - `SAKILA_DB_POOL_MAX_SIZE` overrides `database.pool_max_size`
/// - `SAKILA_LOG_LEVEL` overrides `logging.level`
/// - `SAKILA_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `SAKILA_STAFF_ID` overrides `rentals.staff_id`
/// - `SAKILA_ALLOW_BULK_RETURN` overrides `rentals.allow_bulk_return`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides looked up through `var`, ignoring unparseable values.
pub fn apply_env_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    override_parsed(&var, "SAKILA_HOST", &mut config.server.host);
    override_parsed(&var, "SAKILA_PORT", &mut config.server.port);
    if let Some(db_path) = var("SAKILA_DB_PATH") {
        config.database.path = db_path;
    }
    override_parsed(
        &var,
        "SAKILA_DB_POOL_MAX_SIZE",
        &mut config.database.pool_max_size,
    );
    if let Some(level) = var("SAKILA_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("SAKILA_LOG_JSON") {
        config.logging.json = is_truthy(&json);
    }
    override_parsed(&var, "SAKILA_STAFF_ID", &mut config.rentals.staff_id);
    if let Some(allow) = var("SAKILA_ALLOW_BULK_RETURN") {
        config.rentals.allow_bulk_return = is_truthy(&allow);
    }
}

fn override_parsed<F, T>(var: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = var(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparseable override"),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}
