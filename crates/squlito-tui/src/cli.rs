//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Read-only terminal browser for SQLite databases.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "squlito", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (or file: URI) to open
    #[arg(value_name = "DATABASE")]
    pub database: Option<String>,

    /// Directory holding config.toml and history.db
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not read or record query history
    #[arg(long)]
    pub no_history: bool,
}
