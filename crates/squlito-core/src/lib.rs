//! # squlito-core
//!
//! Core library for the `squlito` read-only SQLite browser.
//!
//! Everything here is terminal-agnostic: the TUI crate feeds user intents in
//! and draws the strings that come back out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use squlito_core::prelude::*;
//!
//! fn main() -> squlito_core::Result<()> {
//!     let db = Database::new("data/seed.db");
//!     db.check()?;
//!
//!     let tables = db.list_tables()?;
//!     if let Some(table) = tables.first() {
//!         let columns = db.column_names(&table.name)?;
//!         let page = db.page(&table.name, 20, 0)?;
//!         let grid = compute_table(&columns, &page.rows, None);
//!         println!("{}\n{}", grid.header, grid.body);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           DB Layer                  │  read-only connections, pages, ad-hoc queries
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  scroll buffer reducer
//! ├─────────────────────────────────────┤
//! │        Display Layer                │  fixed-width grid rendering
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  config.toml, query history
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  text truncation and layout helpers
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use squlito_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::AppError;

    pub use crate::db::{Database, QueryRowsResult, Row, SqlValue, TablePage};

    pub use crate::core::scroll_buffer::{PageRequest, ScrollBuffer, ScrollEvent, reduce};

    pub use crate::display::{GridRender, compute_table, format_cell};

    pub use crate::storage::config::Config;
    pub use crate::storage::history::QueryHistory;
}

/// Database layer - read-only access to the browsed file.
///
/// - [`db::queries`]: page provider, schema listing, ad-hoc execution
/// - [`db::models`]: rows, values, pages
pub mod db;

/// Core layer - navigation state.
pub mod core;

/// Display layer - text grid layout.
pub mod display;

/// Storage layer - configuration and query history persistence.
pub mod storage;

/// Utilities layer - text helpers shared by the TUI.
pub mod utils;

/// Error handling - hierarchical error system with severity and hints.
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
