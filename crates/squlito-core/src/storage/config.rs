//! Configuration management
//!
//! Settings live in `~/.config/squlito/config.toml`; every key is optional.
//! Database path priority: CLI argument > SQULITO_DATABASE environment
//! variable > `default_database` > the bundled seed path.

use super::Result;
use crate::db::DEFAULT_DATABASE_PATH;
use crate::error::{ConfigError, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the database to open.
pub const DATABASE_ENV_VAR: &str = "SQULITO_DATABASE";

const APP_DIR_NAME: &str = "squlito";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database opened when none is given on the command line
    pub default_database: Option<String>,
    /// Rows kept in the scroll buffer
    pub buffer_size: usize,
    /// Maximum rows loaded by an ad-hoc query
    pub query_row_cap: usize,
    /// Query history entries kept in memory
    pub history_limit: usize,
    pub history_enabled: bool,
    /// Log file; logging is off when unset
    pub log_file: Option<PathBuf>,
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_database: None,
            buffer_size: 200,
            query_row_cap: 10_000,
            history_limit: 200,
            history_enabled: true,
            log_file: None,
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    /// Load configuration from file. A missing file yields defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Directory holding `config.toml` and `history.db`.
    pub fn config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(home_dir.join(".config").join(APP_DIR_NAME))
    }

    /// `config.toml` inside `dir`.
    pub fn file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    fn config_file_path() -> Result<PathBuf> {
        Ok(Self::file_in(&Self::config_dir()?))
    }

    /// Reject values the application cannot run with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(1..=500).contains(&self.buffer_size) {
            return Err(invalid(
                "buffer_size",
                self.buffer_size,
                "must be between 1 and 500",
            ));
        }
        if self.query_row_cap == 0 {
            return Err(invalid(
                "query_row_cap",
                self.query_row_cap,
                "must be greater than 0",
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(invalid(
                "tick_rate_ms",
                self.tick_rate_ms,
                "must be greater than 0",
            ));
        }
        if matches!(&self.default_database, Some(p) if p.trim().is_empty()) {
            return Err(invalid("default_database", "\"\"", "must not be empty"));
        }
        Ok(())
    }

    /// Database path to open, honouring CLI > env > config > seed path.
    pub fn database_path(&self, cli_arg: Option<&str>) -> String {
        let env_value = std::env::var(DATABASE_ENV_VAR).ok();
        pick_database_path(cli_arg, env_value.as_deref(), self.default_database.as_deref())
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn pick_database_path(cli: Option<&str>, env: Option<&str>, configured: Option<&str>) -> String {
    [cli, env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or(DEFAULT_DATABASE_PATH)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.default_database.is_none());
        assert_eq!(config.buffer_size, 200);
        assert_eq!(config.query_row_cap, 10_000);
        assert_eq!(config.history_limit, 200);
        assert!(config.history_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            default_database: Some("/tmp/app.db".to_string()),
            buffer_size: 120,
            history_enabled: false,
            log_file: Some(PathBuf::from("/tmp/squlito.log")),
            ..Config::default()
        };

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "buffer_size = 50\n").expect("write config");

        let config = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(config.buffer_size, 50);
        assert_eq!(config.query_row_cap, 10_000);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let nonexistent_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load(Some(nonexistent_path)).expect("Failed to load default config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "buffer_size = \"lots\"\n").expect("write config");

        let err = Config::load(Some(config_path)).expect_err("parse must fail");
        assert!(matches!(err, StorageError::ConfigParseError { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = Config {
            buffer_size: 0,
            ..Config::default()
        };
        let ConfigError::InvalidValue { field, value, .. } =
            config.validate().expect_err("buffer_size 0");
        assert_eq!(field, "buffer_size");
        assert_eq!(value, "0");

        let config = Config {
            buffer_size: 501,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            query_row_cap: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            default_database: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pick_database_path_priority() {
        assert_eq!(
            pick_database_path(Some("cli.db"), Some("env.db"), Some("cfg.db")),
            "cli.db"
        );
        assert_eq!(
            pick_database_path(None, Some("env.db"), Some("cfg.db")),
            "env.db"
        );
        assert_eq!(pick_database_path(None, Some(""), Some("cfg.db")), "cfg.db");
        assert_eq!(pick_database_path(None, None, None), DEFAULT_DATABASE_PATH);
    }

    #[test]
    fn test_file_in() {
        let dir = PathBuf::from("/tmp/squlito");
        assert_eq!(Config::file_in(&dir), dir.join("config.toml"));
    }
}
