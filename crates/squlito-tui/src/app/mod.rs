//! Application state and logic for the TUI.
//!
//! This module contains the core application state and the main run loop.
//! Everything runs on one thread: each event is turned into an
//! [`AppAction`](crate::action::AppAction), applied (database calls
//! included) and the screen is redrawn.
//!
//! ## Module Structure
//! - `mod.rs`: App struct definition, initialization, and rendering
//! - `action_handler.rs`: AppAction processing
//! - `data_handler.rs`: database access and the scroll buffer
//! - `input_handler.rs`: keyboard and mouse event mapping

mod action_handler;
mod data_handler;
mod input_handler;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use squlito_core::core::scroll_buffer::{ScrollBuffer, row_range};
use squlito_core::db::{Database, QueryRowsResult, Row};
use squlito_core::display::compute_table;
use squlito_core::storage::config::Config;
use squlito_core::storage::history::QueryHistory;
use squlito_core::utils::text::truncate_title;

use crate::components::styles::TEXT_ERROR;
use crate::components::{
    Component, DetailOverlay, Focus, HelpOverlay, QueryEditor, RowsContent, RowsView, Sidebar,
    StatusBar,
};
use crate::event::{Event, EventHandler};
use crate::layout::{AppLayout, calculate_layout};

/// Which result the rows pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Table,
    Query,
}

/// Modal drawn over the panes; it captures keyboard input while open.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Help,
    Detail(DetailOverlay),
}

/// The table being browsed and its buffered window of rows.
#[derive(Debug, Clone)]
pub(crate) struct TableView {
    pub name: Option<String>,
    pub columns: Vec<String>,
    /// Rows starting at `scroll.buffer_start`
    pub rows: Vec<Row>,
    pub error: Option<String>,
    pub scroll: ScrollBuffer,
}

/// The last ad-hoc query and its fully loaded result.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryView {
    pub sql: String,
    pub result: QueryRowsResult,
    pub error: Option<String>,
    pub offset: usize,
}

/// The main application state.
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    pub(crate) db: Database,
    pub(crate) row_cap: usize,
    tick_rate_ms: u64,
    pub(crate) focus: Focus,
    pub(crate) mode: ViewMode,
    pub(crate) table: TableView,
    pub(crate) query: QueryView,
    /// Horizontal scroll of the rows pane, in columns
    pub(crate) scroll_x: usize,
    /// Open/read failure of the database itself
    pub(crate) startup_error: Option<String>,
    pub(crate) overlay: Option<Overlay>,
    pub(crate) layout: Option<AppLayout>,
    pub(crate) viewport_width: usize,
    pub(crate) sidebar: Sidebar,
    pub(crate) rows_view: RowsView,
    pub(crate) editor: QueryEditor,
    status_bar: StatusBar,
    pub(crate) history: QueryHistory,
    /// Rows pane content must be recomputed
    grid_dirty: bool,
}

impl App {
    /// Create the application and load the table list. An unreadable
    /// database is reported on screen rather than returned.
    pub fn new(db: Database, config: &Config, history: QueryHistory) -> Self {
        let mut app = Self {
            should_quit: false,
            db,
            row_cap: config.query_row_cap,
            tick_rate_ms: config.tick_rate_ms,
            focus: Focus::Sidebar,
            mode: ViewMode::Table,
            table: TableView {
                name: None,
                columns: Vec::new(),
                rows: Vec::new(),
                error: None,
                scroll: ScrollBuffer::new(config.buffer_size),
            },
            query: QueryView::default(),
            scroll_x: 0,
            startup_error: None,
            overlay: None,
            layout: None,
            viewport_width: 1,
            sidebar: Sidebar::new(),
            rows_view: RowsView::new(),
            editor: QueryEditor::new(),
            status_bar: StatusBar::new(),
            history,
            grid_dirty: true,
        };
        app.load_tables();
        app
    }

    /// Run the main application loop.
    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> std::io::Result<()> {
        let event_handler = EventHandler::new(self.tick_rate_ms);

        while !self.should_quit {
            let size = terminal.size()?;
            self.resize(Rect::new(0, 0, size.width, size.height));
            self.refresh_views();

            terminal.draw(|frame| self.draw(frame))?;

            match event_handler.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(_, _) => {} // Picked up by resize() on the next pass
                Event::Tick => {}
            }
        }

        log::info!("quitting");
        Ok(())
    }

    /// Recompute the layout for a terminal of `area` and propagate the new
    /// viewport size to the scroll state.
    pub(crate) fn resize(&mut self, area: Rect) {
        self.layout = calculate_layout(area);
        let Some(layout) = self.layout else {
            return;
        };

        let body = RowsView::body_inner(layout.rows_body);
        self.viewport_width = usize::from(body.width).max(1);
        let viewport_rows = usize::from(body.height).max(1);

        if viewport_rows != self.table.scroll.viewport_rows {
            self.resize_viewport(viewport_rows);
        }
    }

    pub(crate) fn viewport_rows(&self) -> usize {
        self.table.scroll.viewport_rows
    }

    pub(crate) fn invalidate_grid(&mut self) {
        self.grid_dirty = true;
    }

    /// Bring the components up to date with the application state.
    pub(crate) fn refresh_views(&mut self) {
        if self.grid_dirty {
            let (title, content) = self.rows_content();
            self.rows_view.set_content(title, content);
            self.grid_dirty = false;
        }

        let max_scroll_x = self
            .rows_view
            .content_width()
            .saturating_sub(self.viewport_width);
        if self.rows_view.grid().is_none() {
            self.scroll_x = 0;
        }
        self.scroll_x = self.scroll_x.min(max_scroll_x);

        let row_delta = match self.mode {
            ViewMode::Table => self.table.scroll.buffer_row_delta(),
            ViewMode::Query => self.query.offset,
        };
        self.rows_view.set_scroll(row_delta, self.scroll_x);

        let (message, is_error) = self.status_message();
        self.status_bar.set_message(message, is_error);
        self.status_bar.set_hints(self.focus.hints());
    }

    fn rows_content(&self) -> (String, RowsContent) {
        if let Some(err) = &self.startup_error {
            return ("Rows".to_string(), RowsContent::Error(err.clone()));
        }

        let (title, columns, rows, error) = match self.mode {
            ViewMode::Query => (
                truncate_title(&self.query.sql),
                &self.query.result.columns,
                &self.query.result.rows,
                &self.query.error,
            ),
            ViewMode::Table => {
                let Some(name) = &self.table.name else {
                    return (
                        "Rows".to_string(),
                        RowsContent::Message("No table selected".to_string()),
                    );
                };
                (
                    name.clone(),
                    &self.table.columns,
                    &self.table.rows,
                    &self.table.error,
                )
            }
        };

        let content = if let Some(err) = error {
            RowsContent::Error(err.clone())
        } else if columns.is_empty() {
            RowsContent::Message("(empty)".to_string())
        } else {
            RowsContent::Grid(compute_table(columns, rows, None))
        };
        (title, content)
    }

    /// Left side of the status line and whether it reports an error.
    pub(crate) fn status_message(&self) -> (String, bool) {
        if let Some(err) = &self.startup_error {
            return (format!("Error: {}", err), true);
        }

        match self.mode {
            ViewMode::Query => {
                if let Some(err) = &self.query.error {
                    return (format!("Error: {}", err), true);
                }
                let count = self.query.result.rows.len();
                if self.query.result.truncated {
                    (
                        format!("Query rows {} (truncated at {})", count, self.row_cap),
                        false,
                    )
                } else {
                    (format!("Query rows {}", count), false)
                }
            }
            ViewMode::Table => {
                if let Some(err) = &self.table.error {
                    return (format!("Error: {}", err), true);
                }
                if self.table.name.is_none() {
                    return ("No table selected".to_string(), false);
                }
                let scroll = &self.table.scroll;
                let (start, end) = row_range(scroll.total_rows, scroll.offset, scroll.viewport_rows);
                (
                    format!("Rows {}  Showing {}-{}", scroll.total_rows, start, end),
                    false,
                )
            }
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let Some(layout) = self.layout else {
            let message = Paragraph::new(Line::from(Span::styled("terminal too small", TEXT_ERROR)))
                .alignment(Alignment::Center);
            frame.render_widget(message, area);
            return;
        };

        let captured = self.overlay.is_some();
        self.sidebar
            .draw(frame, layout.sidebar, !captured && self.focus == Focus::Sidebar);
        self.rows_view.draw(
            frame,
            layout.rows_header.union(layout.rows_body),
            !captured && self.focus == Focus::Rows,
        );
        self.editor
            .draw(frame, layout.query, !captured && self.focus == Focus::Query);
        self.status_bar.draw(frame, layout.status, false);

        match &self.overlay {
            Some(Overlay::Help) => HelpOverlay::render(frame, area),
            Some(Overlay::Detail(detail)) => detail.render(frame, area),
            None => {}
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_startup_selects_first_table() {
        let dir = tempdir().expect("Failed to create temp dir");
        let app = app_for(&seeded_db(dir.path(), 120));

        assert_eq!(app.sidebar.tables(), &["notes", "posts", "users"]);
        assert_eq!(app.table.name.as_deref(), Some("notes"));
        assert_eq!(app.table.columns, vec!["id", "body"]);
        assert_eq!(app.table.scroll.total_rows, 2);
        assert_eq!(app.status_message(), ("Rows 2  Showing 1-2".to_string(), false));
    }

    #[test]
    fn test_startup_error_is_shown() {
        let dir = tempdir().expect("Failed to create temp dir");
        let app = app_for(&dir.path().join("missing.db"));

        assert!(app.sidebar.tables().is_empty());
        let (message, is_error) = app.status_message();
        assert!(is_error);
        assert!(message.starts_with("Error: unable to open"));
        assert!(matches!(app.rows_view.content(), RowsContent::Error(_)));
    }

    #[test]
    fn test_viewport_follows_layout() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 120));

        // 120x40: rows body is 28 rows tall, minus its bottom border
        assert_eq!(app.viewport_rows(), 27);
        assert_eq!(app.viewport_width, 84);

        app.resize(Rect::new(0, 0, 30, 8));
        assert!(app.layout.is_none());
    }

    #[test]
    fn test_empty_table_shows_header_only() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut app = app_for(&seeded_db(dir.path(), 0));
        app.select_table(1);
        app.refresh_views();

        let grid = app.rows_view.grid().expect("grid");
        assert_eq!(grid.header, "id   | title");
        assert_eq!(grid.body, "");
        assert_eq!(app.status_message().0, "Rows 0  Showing 0-0");
    }
}
