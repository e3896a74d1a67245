use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("DatabaseError: {0}")]
    Database(#[from] DatabaseError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("unable to open {path}: {source}")]
    Open {
        path: String,
        source: rusqlite::Error,
    },
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Query is empty")]
    EmptyQuery,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
    #[error("History store error: {0}")]
    History(#[from] rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "critical",
            ErrorSeverity::High => "error",
            ErrorSeverity::Medium => "warning",
            ErrorSeverity::Low => "info",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Database(db_error) => match db_error {
                DatabaseError::Open { .. } => ErrorSeverity::Critical,
                DatabaseError::Sqlite(_) => ErrorSeverity::High,
                DatabaseError::EmptyQuery => ErrorSeverity::Low,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    /// Message shown in place of the grid. Engine errors are shown verbatim.
    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Database(db_error) => db_error.to_string(),
            AppError::Config(ConfigError::InvalidValue { field, reason, .. }) => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Database(DatabaseError::Open { .. }) => Some(
                "Check that the path exists and points to a SQLite database file".to_string(),
            ),
            AppError::Config(ConfigError::InvalidValue { .. }) => {
                Some("Edit config.toml or remove the offending key to use the default".to_string())
            }
            AppError::Storage(StorageError::ConfigDirNotFound) => {
                Some("Pass --config-dir to choose a configuration directory".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::EmptyQuery;
        assert_eq!(format!("{}", err), "Query is empty");

        let err = DatabaseError::Sqlite(rusqlite::Error::InvalidQuery);
        assert_eq!(
            format!("{}", err),
            format!("{}", rusqlite::Error::InvalidQuery)
        );
    }

    #[test]
    fn test_config_error_display() {
        let config_err = ConfigError::InvalidValue {
            field: "buffer_size".to_string(),
            value: "0".to_string(),
            reason: "must be between 1 and 500".to_string(),
        };
        assert_eq!(
            format!("{}", config_err),
            "Invalid configuration value for 'buffer_size': 0"
        );

        let app_err = AppError::from(config_err);
        assert_eq!(
            app_err.display_friendly(),
            "Invalid value for 'buffer_size': must be between 1 and 500"
        );
        assert!(app_err.troubleshooting_hint().is_some());
    }

    #[test]
    fn test_error_severity() {
        let open_err = AppError::Database(DatabaseError::Open {
            path: "missing.db".to_string(),
            source: rusqlite::Error::InvalidQuery,
        });
        assert_eq!(open_err.severity(), ErrorSeverity::Critical);
        assert!(open_err.troubleshooting_hint().is_some());

        let empty = AppError::Database(DatabaseError::EmptyQuery);
        assert_eq!(empty.severity(), ErrorSeverity::Low);
        assert_eq!(empty.display_friendly(), "Query is empty");
        assert_eq!(empty.troubleshooting_hint(), None);

        let storage = AppError::Storage(StorageError::ConfigDirNotFound);
        assert_eq!(storage.severity(), ErrorSeverity::Medium);
        assert_eq!(storage.severity().label(), "warning");
    }
}
