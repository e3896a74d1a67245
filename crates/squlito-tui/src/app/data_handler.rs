//! Database access for the App.
//!
//! Every call opens its own read-only connection through [`Database`]; the
//! results are copied into App state before the next frame is drawn.

use squlito_core::core::scroll_buffer::{PageRequest, ScrollEvent, clamp_offset, reduce};
use squlito_core::db::TablePage;
use squlito_core::AppError;
use squlito_core::error::{DatabaseError, ErrorSeverity};

use super::{App, ViewMode};

impl App {
    /// Load the table list and select the first table. Failures are kept as
    /// the startup error and shown in place of the grid.
    pub(crate) fn load_tables(&mut self) {
        let tables = self.db.check().and_then(|()| self.db.list_tables());
        match tables {
            Ok(tables) => {
                self.startup_error = None;
                let names: Vec<String> = tables.into_iter().map(|t| t.name).collect();
                log::info!("found {} tables", names.len());
                self.sidebar.set_tables(names);
                if self.sidebar.tables().is_empty() {
                    self.sidebar.set_message("No tables");
                } else {
                    self.select_table(0);
                }
            }
            Err(e) => {
                let what = format!("failed to read {}", self.db.path().display());
                self.startup_error = Some(report_failure(&what, e));
                self.sidebar.set_tables(Vec::new());
                self.sidebar.set_message("No tables");
            }
        }
        self.invalidate_grid();
    }

    /// Switch the rows pane to the table at sidebar `index` and load its
    /// first page.
    pub(crate) fn select_table(&mut self, index: usize) {
        let Some(name) = self.sidebar.tables().get(index).cloned() else {
            return;
        };
        self.sidebar.select(index);
        log::debug!("selecting table {}", name);

        self.mode = ViewMode::Table;
        self.scroll_x = 0;
        self.table.rows.clear();
        self.table.error = None;
        self.table.columns = match self.db.column_names(&name) {
            Ok(columns) => columns,
            Err(e) => {
                self.table.error = Some(report_failure("column lookup failed", e));
                Vec::new()
            }
        };
        self.table.name = Some(name);

        self.dispatch_scroll(ScrollEvent::Reset);
    }

    pub(crate) fn resize_viewport(&mut self, viewport_rows: usize) {
        if self.table.name.is_some() {
            self.dispatch_scroll(ScrollEvent::Resize { viewport_rows });
        } else {
            self.table.scroll.viewport_rows = viewport_rows.max(1);
        }
        self.clamp_query_offset();
    }

    /// Run one scroll event through the reducer and perform the fetch it
    /// asks for. A failed fetch keeps the previous rows and scroll state,
    /// except after a reset, which always lands on an empty table.
    pub(crate) fn dispatch_scroll(&mut self, event: ScrollEvent) {
        let transition = reduce(self.table.scroll, event);
        let Some(request) = transition.fetch else {
            self.table.scroll = transition.state;
            return;
        };

        match self.fetch_page(request) {
            Ok(page) => {
                self.table.rows = page.rows;
                self.table.error = None;
                self.table.scroll = reduce(
                    transition.state,
                    ScrollEvent::Loaded {
                        total_rows: page.total_rows,
                        buffer_start: page.offset,
                    },
                )
                .state;
            }
            Err(e) => {
                if matches!(event, ScrollEvent::Reset) {
                    self.table.scroll = transition.state;
                }
                self.table.error = Some(report_failure("page fetch failed", e));
            }
        }
        self.invalidate_grid();
    }

    fn fetch_page(&self, request: PageRequest) -> Result<TablePage, DatabaseError> {
        let Some(name) = &self.table.name else {
            return Ok(TablePage {
                total_rows: 0,
                offset: 0,
                limit: request.limit,
                rows: Vec::new(),
            });
        };
        self.db.page(name, request.limit as i64, request.offset as i64)
    }

    /// Run the editor text as an ad-hoc query and show its result.
    pub(crate) fn run_query(&mut self) {
        let sql = self.editor.text();
        self.history.record(&sql);

        self.mode = ViewMode::Query;
        self.scroll_x = 0;
        self.query.offset = 0;
        self.query.sql = sql;

        match self.db.query(&self.query.sql, self.row_cap) {
            Ok(result) => {
                self.query.result = result;
                self.query.error = None;
            }
            Err(e) => {
                self.query.result = Default::default();
                self.query.error = Some(report_failure("query failed", e));
            }
        }
        self.invalidate_grid();
    }

    /// Scroll the query result, which is held in memory in full.
    pub(crate) fn scroll_query(&mut self, offset: usize) {
        self.query.offset = offset;
        self.clamp_query_offset();
    }

    fn clamp_query_offset(&mut self) {
        self.query.offset = clamp_offset(
            self.query.offset,
            self.query.result.rows.len(),
            self.viewport_rows(),
        );
    }
}

/// Log a failed database call at its severity and return the text shown
/// in place of the grid.
fn report_failure(what: &str, e: DatabaseError) -> String {
    let err = AppError::from(e);
    match err.severity() {
        ErrorSeverity::Critical => log::error!("{}: {}", what, err),
        ErrorSeverity::High | ErrorSeverity::Medium => log::warn!("{}: {}", what, err),
        ErrorSeverity::Low => log::info!("{}: {}", what, err),
    }
    err.display_friendly()
}

#[cfg(test)]
mod tests {
    use super::report_failure;
    use crate::app::test_support::*;
    use crate::app::ViewMode;
    use squlito_core::core::scroll_buffer::ScrollEvent;
    use squlito_core::db::SqlValue;
    use squlito_core::error::DatabaseError;
    use tempfile::tempdir;

    #[test]
    fn test_report_failure_message() {
        assert_eq!(
            report_failure("query failed", DatabaseError::EmptyQuery),
            "Query is empty"
        );
        let message = report_failure(
            "failed to read x.db",
            DatabaseError::Open {
                path: "x.db".to_string(),
                source: rusqlite::Error::InvalidQuery,
            },
        );
        assert!(message.starts_with("unable to open x.db"));
    }

    #[test]
    fn test_failed_reset_clears_scroll_state() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = seeded_db(dir.path(), 120);
        let mut app = app_for(&path);
        app.select_table(2);
        app.dispatch_scroll(ScrollEvent::ScrollTo(60));
        assert_eq!(app.table.scroll.offset, 60);

        std::fs::remove_file(&path).expect("remove db");
        app.select_table(1);

        let scroll = app.table.scroll;
        assert_eq!(scroll.total_rows, 0);
        assert_eq!(scroll.offset, 0);
        assert_eq!(scroll.buffer_start, 0);
        assert!(app.table.rows.is_empty());
        assert!(app.table.error.is_some());
        assert!(app.status_message().1);
    }

    #[test]
    fn test_select_table_loads_first_buffer() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 120));

        app.select_table(2);

        assert_eq!(app.table.name.as_deref(), Some("users"));
        assert_eq!(app.table.scroll.total_rows, 120);
        assert_eq!(app.table.scroll.offset, 0);
        assert_eq!(app.table.rows.len(), 50);
        assert_eq!(app.table.rows[0].get("id"), Some(&SqlValue::Integer(1)));
    }

    #[test]
    fn test_scroll_past_buffer_refetches() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 120));
        app.select_table(2);

        app.dispatch_scroll(ScrollEvent::ScrollTo(60));

        let scroll = app.table.scroll;
        assert_eq!(scroll.offset, 60);
        assert_eq!(scroll.buffer_start, 11);
        assert_eq!(app.table.rows[0].get("id"), Some(&SqlValue::Integer(12)));
        let top = &app.table.rows[scroll.buffer_row_delta()];
        assert_eq!(top.get("id"), Some(&SqlValue::Integer(61)));
    }

    #[test]
    fn test_scroll_to_end_clamps() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 120));
        app.select_table(2);

        app.dispatch_scroll(ScrollEvent::ScrollToEnd);

        // 120 rows in a 27-row viewport
        assert_eq!(app.table.scroll.offset, 93);
        assert_eq!(app.status_message().0, "Rows 120  Showing 94-120");
    }

    #[test]
    fn test_run_query() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 120));
        app.editor.set_text("SELECT id FROM users WHERE id <= 3");

        app.run_query();

        assert_eq!(app.mode, ViewMode::Query);
        assert_eq!(app.query.result.rows.len(), 3);
        assert_eq!(app.status_message(), ("Query rows 3".to_string(), false));
        assert_eq!(app.history.entries().len(), 1);
    }

    #[test]
    fn test_run_query_truncates_at_row_cap() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 120));
        app.editor.set_text("SELECT * FROM users");

        app.run_query();

        assert!(app.query.result.truncated);
        assert_eq!(app.query.result.rows.len(), 100);
        assert_eq!(
            app.status_message().0,
            "Query rows 100 (truncated at 100)"
        );
    }

    #[test]
    fn test_run_query_errors_are_reported() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 5));

        app.editor.set_text("   ");
        app.run_query();
        assert_eq!(
            app.status_message(),
            ("Error: Query is empty".to_string(), true)
        );
        assert!(app.history.entries().is_empty());

        app.editor.set_text("SELECT * FROM nope");
        app.run_query();
        let (message, is_error) = app.status_message();
        assert!(is_error);
        assert!(message.contains("no such table"));

        // Selecting a table leaves query mode
        app.select_table(2);
        assert_eq!(app.mode, ViewMode::Table);
        assert!(!app.status_message().1);
    }

    #[test]
    fn test_query_cannot_write() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 5));
        app.editor.set_text("DELETE FROM users");

        app.run_query();

        assert!(app.status_message().1);
        app.select_table(2);
        assert_eq!(app.table.scroll.total_rows, 5);
    }

    #[test]
    fn test_query_offset_clamped() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 40));
        app.editor.set_text("SELECT * FROM users");
        app.run_query();

        app.scroll_query(1000);
        assert_eq!(app.query.offset, 13);
    }
}
