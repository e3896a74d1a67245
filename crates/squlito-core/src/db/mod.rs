//! Read-only SQLite access.
//!
//! [`Database`] remembers where the file lives and opens a fresh read-only
//! connection for every operation, releasing it before returning. Nothing
//! holds a connection across user interactions.

pub mod models;
pub mod queries;

use std::path::{Path, PathBuf};
use std::time::Instant;

use rusqlite::{Connection, OpenFlags};

use crate::error::DatabaseError;
pub use models::{ColumnInfo, QueryRowsResult, Row, SqlValue, TableInfo, TablePage, row_from};
pub use queries::{
    MAX_PAGE_LIMIT, MIN_PAGE_LIMIT, get_table_page, list_user_tables, query_rows,
    quote_identifier, table_columns,
};

type Result<T> = std::result::Result<T, DatabaseError>;

/// Path used when no database is given on the command line.
pub const DEFAULT_DATABASE_PATH: &str = "data/seed.db";

/// Handle to a database file opened read-only on demand.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection. `file:` paths are treated as URIs.
    pub fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        Connection::open_with_flags(&self.path, flags).map_err(|source| DatabaseError::Open {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Verify the file opens and its schema is readable.
    pub fn check(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|source| DatabaseError::Open {
            path: self.path.display().to_string(),
            source,
        })?;
        log::info!("opened {} read-only", self.path.display());
        Ok(())
    }

    pub fn list_tables(&self) -> Result<Vec<TableInfo>> {
        let conn = self.connect()?;
        list_user_tables(&conn)
    }

    pub fn table_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>> {
        let conn = self.connect()?;
        table_columns(&conn, table_name)
    }

    /// Column names of a table in declaration order.
    pub fn column_names(&self, table_name: &str) -> Result<Vec<String>> {
        Ok(self
            .table_columns(table_name)?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    pub fn page(&self, table_name: &str, limit: i64, offset: i64) -> Result<TablePage> {
        let started = Instant::now();
        let conn = self.connect()?;
        let page = get_table_page(&conn, table_name, limit, offset)?;
        log::debug!(
            "fetched page of {} in {:?}",
            table_name,
            started.elapsed()
        );
        Ok(page)
    }

    pub fn query(&self, sql: &str, row_cap: usize) -> Result<QueryRowsResult> {
        let started = Instant::now();
        let conn = self.connect()?;
        let result = query_rows(&conn, sql, row_cap);
        match &result {
            Ok(r) => log::info!(
                "query returned {} rows (truncated: {}) in {:?}",
                r.rows.len(),
                r.truncated,
                started.elapsed()
            ),
            Err(e) => log::warn!("query failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded_file(dir: &Path) -> PathBuf {
        let path = dir.join("seed.db");
        let conn = Connection::open(&path).expect("create db");
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, active INTEGER, note TEXT);
             INSERT INTO users VALUES (1, 'Ava', 1, NULL), (2, 'Mateo', 0, 'hello');
             CREATE TABLE posts (id INTEGER PRIMARY KEY, title TEXT);",
        )
        .expect("seed");
        path
    }

    #[test]
    fn test_database_operations() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db = Database::new(seeded_file(dir.path()));

        db.check().expect("check");

        let tables: Vec<String> = db
            .list_tables()
            .expect("tables")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(tables, vec!["posts", "users"]);

        assert_eq!(
            db.column_names("users").expect("columns"),
            vec!["id", "name", "active", "note"]
        );

        let page = db.page("users", 10, 0).expect("page");
        assert_eq!(page.total_rows, 2);
        assert_eq!(page.rows[1]["name"], SqlValue::Text("Mateo".to_string()));

        let result = db.query("SELECT name FROM users ORDER BY id DESC", 0).expect("query");
        assert_eq!(result.columns, vec!["name"]);
        assert_eq!(result.rows[0]["name"], SqlValue::Text("Mateo".to_string()));
    }

    #[test]
    fn test_database_is_read_only() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db = Database::new(seeded_file(dir.path()));

        let err = db
            .query("INSERT INTO posts (title) VALUES ('x')", 0)
            .expect_err("write must fail");
        assert!(err.to_string().contains("readonly"));

        let page = db.page("posts", 10, 0).expect("page");
        assert_eq!(page.total_rows, 0);
    }

    #[test]
    fn test_database_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db = Database::new(dir.path().join("does-not-exist.db"));

        let err = db.check().expect_err("missing file");
        assert!(matches!(err, DatabaseError::Open { .. }));
        assert!(!dir.path().join("does-not-exist.db").exists());
    }

    #[test]
    fn test_database_not_a_database() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, vec![b'x'; 4096]).expect("write");

        let err = Database::new(&path).check().expect_err("invalid file");
        assert!(matches!(err, DatabaseError::Open { .. }));
    }

    #[test]
    fn test_database_uri_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = seeded_file(dir.path());
        let db = Database::new(format!("file:{}", path.display()));

        assert_eq!(db.list_tables().expect("tables").len(), 2);
    }
}
