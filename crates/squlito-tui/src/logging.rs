//! Log setup.
//!
//! Library code logs through the `log` facade. When a log file is configured
//! a `tracing-subscriber` fmt layer captures those records and writes them to
//! the file; the terminal itself is never written to.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{TuiError, TuiResult};

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the file logger. Returns `false` when no file is configured.
pub fn init(log_file: Option<&Path>, verbose: bool) -> TuiResult<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TuiError::Logging(format!("{}: {}", path.display(), e)))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))?;

    log::info!("logging to {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        assert!(!init(None, true).expect("init"));
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "debug");
        assert_eq!(default_filter(false), "info");
    }

    #[test]
    fn test_unwritable_log_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("squlito.log");
        let err = init(Some(&path), false).expect_err("parent dir is missing");
        assert!(matches!(err, TuiError::Logging(_)));
    }
}
