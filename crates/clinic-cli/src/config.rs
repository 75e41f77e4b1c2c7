//! Configuration loading from file and environment variables.

use clinic_db::DbRuntimeSettings;
use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQLite busy timeout, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clinic_appointments=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_db_path() -> String {
    "clinic.db".to_string()
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

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
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

impl DatabaseConfig {
    /// Pool tunables derived from this configuration.
    pub fn runtime_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
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

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist, then applies environment overrides.
///
/// Environment variable overrides:
/// - `CLINIC_DB_PATH` overrides `database.path`
/// - `CLINIC_DB_BUSY_TIMEOUT_MS` overrides `database.busy_timeout_ms`
/// - `CLINIC_DB_POOL_MAX_SIZE` overrides `database.pool_max_size`
/// - `CLINIC_LOG_LEVEL` overrides `logging.level`
/// - `CLINIC_LOG_JSON` overrides `logging.json` (set to "true" or "1" to enable)
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

/// Applies overrides looked up through `lookup`. Values that fail to parse
/// are ignored.
fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(db_path) = lookup("CLINIC_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(timeout) = lookup("CLINIC_DB_BUSY_TIMEOUT_MS") {
        if let Ok(parsed) = timeout.parse() {
            config.database.busy_timeout_ms = parsed;
        }
    }
    if let Some(size) = lookup("CLINIC_DB_POOL_MAX_SIZE") {
        if let Ok(parsed) = size.parse() {
            config.database.pool_max_size = parsed;
        }
    }
    if let Some(level) = lookup("CLINIC_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("CLINIC_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_no_path() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, no_env);
        assert_eq!(config.database.path, "clinic.db");
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.database.pool_max_size, 8);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn partial_file_keeps_field_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "/var/lib/clinic/clinic.db"

            [logging]
            json = true
            "#,
        )
        .expect("should parse");

        assert_eq!(config.database.path, "/var/lib/clinic/clinic.db");
        assert_eq!(config.database.pool_max_size, 8);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.json);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("absent.toml");
        let config = load_config(path.to_str()).expect("missing file is not an error");
        assert_eq!(config.database.busy_timeout_ms, 5_000);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(file, "[database\npath = ").expect("should write");

        let err = load_config(file.path().to_str()).expect_err("should fail to parse");
        assert!(matches!(err, ConfigError::Parse(_)), "unexpected: {err:?}");
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CLINIC_DB_PATH", "override.db"),
            ("CLINIC_DB_BUSY_TIMEOUT_MS", "250"),
            ("CLINIC_DB_POOL_MAX_SIZE", "not-a-number"),
            ("CLINIC_LOG_LEVEL", "clinic_appointments=debug"),
            ("CLINIC_LOG_JSON", "1"),
        ]);

        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, "override.db");
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.database.pool_max_size, 8, "bad numbers are ignored");
        assert_eq!(config.logging.level, "clinic_appointments=debug");
        assert!(config.logging.json);
        assert_eq!(
            config.database.runtime_settings(),
            DbRuntimeSettings {
                busy_timeout_ms: 250,
                pool_max_size: 8,
            }
        );
    }
}
