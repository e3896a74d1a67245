//! Query history
//!
//! Submitted queries are kept newest-first in a small SQLite file next to
//! the configuration, never in the database being browsed. [`QueryHistory`]
//! adds the editor's Up/Down cursor on top of the stored list.

use super::Result;
use crate::error::StorageError;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, params};
use std::fs;
use std::path::Path;

/// File name of the history store inside the config directory.
pub const HISTORY_FILE_NAME: &str = "history.db";

/// One recorded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: i64,
    pub sql: String,
    /// RFC 3339 timestamp, UTC
    pub created_at: String,
}

/// Persistent history table.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Open or create the store at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS query_history (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 sql TEXT NOT NULL,
                 created_at TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS query_history_created_at
                 ON query_history (created_at DESC);",
        )?;
        Ok(Self { conn })
    }

    /// Most recent `limit` entries, newest first.
    pub fn load(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, sql, created_at FROM query_history
             ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let entries = stmt
            .query_map(params![limit as i64], |row| {
                Ok(HistoryEntry {
                    id: row.get(0)?,
                    sql: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn insert(&self, sql: &str) -> Result<HistoryEntry> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
        self.conn.execute(
            "INSERT INTO query_history (sql, created_at) VALUES (?1, ?2)",
            params![sql, created_at],
        )?;
        Ok(HistoryEntry {
            id: self.conn.last_insert_rowid(),
            sql: sql.to_string(),
            created_at,
        })
    }
}

/// In-memory history list with an editor cursor.
///
/// The cursor is `None` while the user edits a fresh draft. Walking to older
/// entries saves the draft; walking forward past the newest entry restores it.
pub struct QueryHistory {
    store: Option<HistoryStore>,
    entries: Vec<HistoryEntry>,
    limit: usize,
    cursor: Option<usize>,
    draft: String,
}

impl QueryHistory {
    /// History backed by `store`, preloaded with its newest `limit` entries.
    pub fn with_store(store: HistoryStore, limit: usize) -> Result<Self> {
        let entries = store.load(limit)?;
        log::debug!("loaded {} history entries", entries.len());
        Ok(Self {
            store: Some(store),
            ..Self::in_memory(limit)
        }
        .with_entries(entries))
    }

    /// History kept only for this session.
    pub fn in_memory(limit: usize) -> Self {
        Self {
            store: None,
            entries: Vec::new(),
            limit,
            cursor: None,
            draft: String::new(),
        }
    }

    /// History that records nothing.
    pub fn disabled() -> Self {
        Self::in_memory(0)
    }

    fn with_entries(mut self, entries: Vec<HistoryEntry>) -> Self {
        self.entries = entries;
        self.entries.truncate(self.limit);
        self
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Record a submitted query. Blank text is ignored; store failures are
    /// logged and the entry is dropped.
    pub fn record(&mut self, sql: &str) {
        let sql = sql.trim();
        if sql.is_empty() || !self.is_enabled() {
            return;
        }

        let entry = match &self.store {
            Some(store) => match store.insert(sql) {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("failed to record query history: {}", e);
                    return;
                }
            },
            None => HistoryEntry {
                id: self.entries.first().map_or(1, |e| e.id + 1),
                sql: sql.to_string(),
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            },
        };

        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
        self.reset_cursor();
    }

    /// Forget the cursor and the saved draft, as after any edit.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
        self.draft.clear();
    }

    /// Step to the next older entry. `current` is saved as the draft when
    /// leaving it. Returns the text to show, or `None` when nothing changes.
    pub fn older(&mut self, current: &str) -> Option<String> {
        let last = self.entries.len().checked_sub(1)?;
        let next = match self.cursor {
            None => {
                self.draft = current.to_string();
                0
            }
            Some(idx) if idx >= last => return None,
            Some(idx) => idx + 1,
        };
        self.cursor = Some(next);
        Some(self.entries[next].sql.clone())
    }

    /// Step to the next newer entry, restoring the draft past the newest one.
    pub fn newer(&mut self) -> Option<String> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some(std::mem::take(&mut self.draft))
            }
            idx => {
                self.cursor = Some(idx - 1);
                Some(self.entries[idx - 1].sql.clone())
            }
        }
    }
}
