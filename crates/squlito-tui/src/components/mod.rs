//! UI Components for squlito.
//!
//! Each pane is a component with a common drawing interface; overlays are
//! drawn on top of the panes by the App.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

mod detail_overlay;
mod help_overlay;
mod query_editor;
mod rows_view;
mod sidebar;
mod status_bar;
pub mod styles;

pub use detail_overlay::DetailOverlay;
pub use help_overlay::HelpOverlay;
pub use query_editor::QueryEditor;
pub use rows_view::{RowsContent, RowsView};
pub use sidebar::Sidebar;
pub use status_bar::StatusBar;

/// Pane that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Rows,
    Query,
}

impl Focus {
    /// Next pane in Tab order.
    pub fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Rows,
            Focus::Rows => Focus::Query,
            Focus::Query => Focus::Sidebar,
        }
    }

    /// Key hints shown on the right of the status line.
    pub fn hints(self) -> &'static str {
        match self {
            Focus::Sidebar => "Tab rows  Enter open  ? help  q quit",
            Focus::Rows => "Tab query  j/k scroll  h/l pan  Enter detail  q quit",
            Focus::Query => "Enter run  Shift+Enter newline  Tab tables  Ctrl+C quit",
        }
    }
}

/// Common trait for all UI components.
pub trait Component {
    /// Draw the component within the given area.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Handle keyboard input. Returns true if the event was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool;
}

/// Calculate a centered rect with percentage-based dimensions.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    use ratatui::layout::{Constraint, Flex, Layout};

    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Sidebar.next(), Focus::Rows);
        assert_eq!(Focus::Rows.next(), Focus::Query);
        assert_eq!(Focus::Query.next(), Focus::Sidebar);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 70, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 35);
        assert_eq!(popup.x, 20);
    }
}
