//! Keyboard and mouse input.
//!
//! Keys map to actions through [`map_key`], which only looks at the focused
//! pane and the open overlay. Mouse events need the current layout and are
//! resolved on the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::{App, Overlay};
use crate::action::{AppAction, RowScroll};
use crate::components::{Focus, RowsView};

/// Rows moved by one mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Lines moved by PageUp/PageDown in the detail overlay.
const OVERLAY_PAGE: i64 = 10;

/// Overlay state relevant to key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverlayKind {
    Help,
    Detail,
}

/// Translate a key press into an action. `None` means the key is ignored.
pub(crate) fn map_key(focus: Focus, overlay: Option<OverlayKind>, key: KeyEvent) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppAction::Quit);
    }

    // Open overlays capture every other key
    if let Some(kind) = overlay {
        return map_overlay_key(kind, key);
    }

    if ctrl {
        match key.code {
            KeyCode::Char('h') => return Some(AppAction::Focus(Focus::Sidebar)),
            KeyCode::Char('l') | KeyCode::Char('k') => return Some(AppAction::Focus(Focus::Rows)),
            KeyCode::Char('j') if focus != Focus::Query => {
                return Some(AppAction::Focus(Focus::Query));
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => return Some(AppAction::CycleFocus),
        KeyCode::Esc => return Some(AppAction::Quit),
        _ => {}
    }

    match focus {
        Focus::Query => Some(map_query_key(key)),
        Focus::Sidebar | Focus::Rows if ctrl => None,
        Focus::Sidebar => map_sidebar_key(key),
        Focus::Rows => map_rows_key(key),
    }
}

fn map_overlay_key(kind: OverlayKind, key: KeyEvent) -> Option<AppAction> {
    match (kind, key.code) {
        (_, KeyCode::Esc | KeyCode::Char('q')) => Some(AppAction::CloseOverlay),
        (OverlayKind::Help, KeyCode::Char('?')) => Some(AppAction::CloseOverlay),
        (OverlayKind::Detail, KeyCode::Enter) => Some(AppAction::CloseOverlay),
        (OverlayKind::Detail, KeyCode::Char('j') | KeyCode::Down) => Some(AppAction::ScrollOverlay(1)),
        (OverlayKind::Detail, KeyCode::Char('k') | KeyCode::Up) => Some(AppAction::ScrollOverlay(-1)),
        (OverlayKind::Detail, KeyCode::PageDown) => Some(AppAction::ScrollOverlay(OVERLAY_PAGE)),
        (OverlayKind::Detail, KeyCode::PageUp) => Some(AppAction::ScrollOverlay(-OVERLAY_PAGE)),
        _ => None,
    }
}

fn map_query_key(key: KeyEvent) -> AppAction {
    match key.code {
        KeyCode::Enter if key.modifiers.is_empty() => AppAction::RunQuery,
        KeyCode::Up => AppAction::HistoryOlder,
        KeyCode::Down => AppAction::HistoryNewer,
        _ => AppAction::EditQuery(key),
    }
}

fn map_sidebar_key(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Char('q') => Some(AppAction::Quit),
        KeyCode::Char('?') => Some(AppAction::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down => Some(AppAction::MoveTableSelection(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(AppAction::MoveTableSelection(-1)),
        KeyCode::Enter => Some(AppAction::OpenTable),
        _ => None,
    }
}

fn map_rows_key(key: KeyEvent) -> Option<AppAction> {
    let action = match key.code {
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Char('?') => AppAction::ToggleHelp,
        KeyCode::Char('j') | KeyCode::Down => AppAction::ScrollRows(RowScroll::By(1)),
        KeyCode::Char('k') | KeyCode::Up => AppAction::ScrollRows(RowScroll::By(-1)),
        KeyCode::PageDown => AppAction::ScrollRows(RowScroll::Pages(1)),
        KeyCode::PageUp => AppAction::ScrollRows(RowScroll::Pages(-1)),
        KeyCode::Char('g') | KeyCode::Home => AppAction::ScrollRows(RowScroll::Top),
        KeyCode::Char('G') | KeyCode::End => AppAction::ScrollRows(RowScroll::Bottom),
        KeyCode::Char('h') | KeyCode::Left => AppAction::Pan(-1),
        KeyCode::Char('l') | KeyCode::Right => AppAction::Pan(1),
        KeyCode::Enter => AppAction::OpenRowDetail,
        _ => return None,
    };
    Some(action)
}

impl App {
    fn overlay_kind(&self) -> Option<OverlayKind> {
        self.overlay.as_ref().map(|overlay| match overlay {
            Overlay::Help => OverlayKind::Help,
            Overlay::Detail(_) => OverlayKind::Detail,
        })
    }

    /// Handle keyboard input.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = map_key(self.focus, self.overlay_kind(), key) {
            log::trace!("key {:?} -> {:?}", key.code, action);
            self.handle_action(action);
        }
    }

    /// Handle mouse input: wheel scrolling and clicks on the panes.
    pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = self.layout else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);
        let rows_area = layout.rows_header.union(layout.rows_body);

        let wheel = match mouse.kind {
            MouseEventKind::ScrollDown => Some(1),
            MouseEventKind::ScrollUp => Some(-1),
            _ => None,
        };

        if let Some(direction) = wheel {
            let action = if self.overlay.is_some() {
                Some(AppAction::ScrollOverlay(direction * WHEEL_ROWS))
            } else if rows_area.contains(position) {
                Some(AppAction::ScrollRows(RowScroll::By(direction * WHEEL_ROWS)))
            } else if layout.sidebar.contains(position) {
                Some(AppAction::MoveTableSelection(direction))
            } else {
                None
            };
            if let Some(action) = action {
                self.handle_action(action);
            }
            return;
        }

        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.overlay.is_some() {
            return;
        }

        if layout.sidebar.contains(position) {
            self.handle_action(AppAction::Focus(Focus::Sidebar));
            if let Some(index) = self.sidebar.index_at(layout.sidebar, mouse.row) {
                self.handle_action(AppAction::SelectTable(index));
            }
        } else if rows_area.contains(position) {
            self.handle_action(AppAction::Focus(Focus::Rows));
            let inner = RowsView::body_inner(layout.rows_body);
            if inner.contains(position) {
                self.handle_action(AppAction::OpenCellDetail {
                    body_row: usize::from(mouse.row - inner.y),
                    body_x: usize::from(mouse.column - inner.x),
                });
            }
        } else if layout.query.contains(position) {
            self.handle_action(AppAction::Focus(Focus::Query));
        }
    }
}
