//! squlito - read-only terminal browser for SQLite databases
//!
//! A sidebar of tables, a scrolling grid of rows and an editor for ad-hoc
//! queries, in the spirit of lazygit or k9s.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use squlito_core::AppError;
use squlito_core::db::Database;
use squlito_core::storage::config::Config;
use squlito_core::storage::history::{HISTORY_FILE_NAME, HistoryStore, QueryHistory};

mod action;
mod app;
mod cli;
mod components;
mod error;
mod event;
mod layout;
mod logging;

use app::App;
use cli::Cli;
use error::TuiResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", err.severity().label(), err);
            if let Some(hint) = err.hint() {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> TuiResult<()> {
    let config = Config::load(cli.config_dir.as_deref().map(Config::file_in))
        .map_err(AppError::from)?;
    config.validate().map_err(AppError::from)?;

    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    logging::init(log_file.as_deref(), cli.verbose)?;

    let history = open_history(&cli, &config);
    let db = Database::new(config.database_path(cli.database.as_deref()));
    log::info!("starting with database {}", db.path().display());

    let mut app = App::new(db, &config, history);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    // Set panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = app.run(&mut terminal);

    // Cleanup terminal
    restore_terminal()?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

/// Query history for this session. A history file that cannot be opened
/// degrades to history kept in memory.
fn open_history(cli: &Cli, config: &Config) -> QueryHistory {
    if cli.no_history || !config.history_enabled {
        return QueryHistory::disabled();
    }

    let dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => match Config::config_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::warn!("query history kept in memory: {}", e);
                return QueryHistory::in_memory(config.history_limit);
            }
        },
    };

    let path: PathBuf = dir.join(HISTORY_FILE_NAME);
    match HistoryStore::open(&path).and_then(|store| QueryHistory::with_store(store, config.history_limit)) {
        Ok(history) => history,
        Err(e) => {
            log::warn!("query history kept in memory: {}", e);
            QueryHistory::in_memory(config.history_limit)
        }
    }
}

/// Restore terminal to normal state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
