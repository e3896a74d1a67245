//! Action handling for the App.
//!
//! Applies an [`AppAction`] to the application state. Database work is
//! delegated to `data_handler.rs`.

use squlito_core::core::scroll_buffer::ScrollEvent;
use squlito_core::db::Row;
use squlito_core::display::hit_test_column;

use super::{App, Overlay, ViewMode};
use crate::action::{AppAction, RowScroll};
use crate::components::{Component, DetailOverlay, Focus};

impl App {
    pub(crate) fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::CycleFocus => self.focus = self.focus.next(),
            AppAction::Focus(focus) => self.focus = focus,
            AppAction::ToggleHelp => {
                self.overlay = match self.overlay {
                    Some(Overlay::Help) => None,
                    _ => Some(Overlay::Help),
                };
            }
            AppAction::CloseOverlay => self.overlay = None,
            AppAction::ScrollOverlay(delta) => {
                if let Some(Overlay::Detail(detail)) = &mut self.overlay {
                    detail.scroll_by(delta);
                }
            }
            AppAction::MoveTableSelection(delta) => {
                if let Some(index) = self.sidebar.move_selection(delta) {
                    self.select_table(index);
                }
            }
            AppAction::SelectTable(index) => {
                if self.sidebar.select(index) || self.mode == ViewMode::Query {
                    self.select_table(index);
                }
            }
            AppAction::OpenTable => {
                if let Some(index) = self.sidebar.selected() {
                    if self.table.name.as_deref() != self.sidebar.selected_name()
                        || self.mode == ViewMode::Query
                    {
                        self.select_table(index);
                    }
                    self.focus = Focus::Rows;
                }
            }
            AppAction::ScrollRows(scroll) => self.scroll_rows(scroll),
            AppAction::Pan(direction) => self.pan(direction),
            AppAction::OpenRowDetail => self.open_row_detail(),
            AppAction::OpenCellDetail { body_row, body_x } => {
                self.open_cell_detail(body_row, body_x)
            }
            AppAction::RunQuery => self.run_query(),
            AppAction::HistoryOlder => {
                let current = self.editor.text();
                if let Some(text) = self.history.older(&current) {
                    self.editor.set_text(&text);
                }
            }
            AppAction::HistoryNewer => {
                if let Some(text) = self.history.newer() {
                    self.editor.set_text(&text);
                }
            }
            AppAction::EditQuery(key) => {
                let revision = self.editor.revision();
                self.editor.handle_key(key);
                if self.editor.revision() != revision {
                    self.history.reset_cursor();
                }
            }
        }
    }

    fn scroll_rows(&mut self, scroll: RowScroll) {
        let page = self.viewport_rows() as i64;
        match self.mode {
            ViewMode::Table => {
                let event = match scroll {
                    RowScroll::By(delta) => ScrollEvent::ScrollBy(delta),
                    RowScroll::Pages(pages) => ScrollEvent::ScrollBy(pages * page),
                    RowScroll::Top => ScrollEvent::ScrollTo(0),
                    RowScroll::Bottom => ScrollEvent::ScrollToEnd,
                };
                self.dispatch_scroll(event);
            }
            ViewMode::Query => {
                let offset = self.query.offset as i64;
                let target = match scroll {
                    RowScroll::By(delta) => offset + delta,
                    RowScroll::Pages(pages) => offset + pages * page,
                    RowScroll::Top => 0,
                    RowScroll::Bottom => i64::MAX,
                };
                self.scroll_query(target.max(0) as usize);
            }
        }
    }

    /// Move the horizontal scroll by a fifth of the viewport.
    fn pan(&mut self, direction: i64) {
        let step = (self.viewport_width / 5).max(1);
        let max_scroll_x = self
            .rows_view
            .content_width()
            .saturating_sub(self.viewport_width);
        self.scroll_x = if direction < 0 {
            self.scroll_x.saturating_sub(step)
        } else {
            (self.scroll_x + step).min(max_scroll_x)
        };
    }

    /// Columns and rows on screen, with the table row number of `rows[0]`.
    fn visible_rows(&self) -> (&[String], &[Row], usize) {
        match self.mode {
            ViewMode::Table => {
                let scroll = &self.table.scroll;
                let delta = scroll.buffer_row_delta().min(self.table.rows.len());
                (&self.table.columns, &self.table.rows[delta..], scroll.offset)
            }
            ViewMode::Query => {
                let rows = &self.query.result.rows;
                let offset = self.query.offset.min(rows.len());
                (&self.query.result.columns, &rows[offset..], offset)
            }
        }
    }

    fn open_row_detail(&mut self) {
        let (columns, rows, first_row) = self.visible_rows();
        let Some(row) = rows.first() else {
            return;
        };
        let detail = DetailOverlay::for_row(first_row + 1, columns, row);
        self.overlay = Some(Overlay::Detail(detail));
    }

    fn open_cell_detail(&mut self, body_row: usize, body_x: usize) {
        let Some(column) = self
            .rows_view
            .grid()
            .and_then(|grid| hit_test_column(grid, body_x + self.scroll_x))
        else {
            return;
        };
        let (columns, rows, first_row) = self.visible_rows();
        let (Some(name), Some(row)) = (columns.get(column), rows.get(body_row)) else {
            return;
        };
        let detail = DetailOverlay::for_cell(first_row + body_row + 1, name, row);
        self.overlay = Some(Overlay::Detail(detail));
    }
}
