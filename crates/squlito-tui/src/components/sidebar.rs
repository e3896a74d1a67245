//! Table list shown on the left.

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::Component;
use super::styles::{TEXT_DIM, border_style, selected_style, title_style};

/// Sidebar listing the user tables of the open database.
#[derive(Default)]
pub struct Sidebar {
    tables: Vec<String>,
    list_state: ListState,
    /// Shown instead of the list when there are no tables
    message: Option<String>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table list, selecting the first entry.
    pub fn set_tables(&mut self, tables: Vec<String>) {
        self.list_state = ListState::default();
        if !tables.is_empty() {
            self.list_state.select(Some(0));
        }
        self.tables = tables;
        self.message = None;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected()
            .and_then(|i| self.tables.get(i))
            .map(String::as_str)
    }

    /// Select `index`. Returns true when the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tables.len() || self.selected() == Some(index) {
            return false;
        }
        self.list_state.select(Some(index));
        true
    }

    /// Move the selection by `delta`, stopping at either end. Returns the new
    /// index when it changed.
    pub fn move_selection(&mut self, delta: i64) -> Option<usize> {
        let last = self.tables.len().checked_sub(1)?;
        let current = self.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, last as i64) as usize;
        self.select(next).then_some(next)
    }

    /// Table index drawn at terminal row `y` when the sidebar occupies `area`.
    pub fn index_at(&self, area: Rect, y: u16) -> Option<usize> {
        let top = area.y + 1;
        let bottom = area.bottom().saturating_sub(1);
        if y < top || y >= bottom {
            return None;
        }
        let index = self.list_state.offset() + usize::from(y - top);
        (index < self.tables.len()).then_some(index)
    }
}

impl Component for Sidebar {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(Span::styled(" Tables ", title_style()))
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        if self.tables.is_empty() {
            let text = self.message.as_deref().unwrap_or("No tables");
            let paragraph = Paragraph::new(Line::from(Span::styled(text, TEXT_DIM))).block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .tables
            .iter()
            .map(|name| ListItem::new(Line::from(name.as_str())))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_style())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> bool {
        // Selection changes go through AppAction so the table gets loaded
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar(names: &[&str]) -> Sidebar {
        let mut sidebar = Sidebar::new();
        sidebar.set_tables(names.iter().map(|s| s.to_string()).collect());
        sidebar
    }

    #[test]
    fn test_set_tables_selects_first() {
        let sidebar = sidebar(&["posts", "users"]);
        assert_eq!(sidebar.selected(), Some(0));
        assert_eq!(sidebar.selected_name(), Some("posts"));

        let empty = Sidebar::new();
        assert_eq!(empty.selected(), None);
        assert_eq!(empty.selected_name(), None);
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut sidebar = sidebar(&["a", "b", "c"]);
        assert_eq!(sidebar.move_selection(-1), None);
        assert_eq!(sidebar.move_selection(1), Some(1));
        assert_eq!(sidebar.move_selection(10), Some(2));
        assert_eq!(sidebar.move_selection(1), None);
        assert_eq!(sidebar.selected_name(), Some("c"));

        let mut empty = Sidebar::new();
        assert_eq!(empty.move_selection(1), None);
    }

    #[test]
    fn test_select() {
        let mut sidebar = sidebar(&["a", "b"]);
        assert!(sidebar.select(1));
        assert!(!sidebar.select(1));
        assert!(!sidebar.select(5));
    }

    #[test]
    fn test_index_at() {
        let sidebar = sidebar(&["a", "b", "c"]);
        let area = Rect::new(0, 0, 22, 10);
        assert_eq!(sidebar.index_at(area, 0), None);
        assert_eq!(sidebar.index_at(area, 1), Some(0));
        assert_eq!(sidebar.index_at(area, 3), Some(2));
        assert_eq!(sidebar.index_at(area, 4), None);
        assert_eq!(sidebar.index_at(area, 9), None);
    }
}
