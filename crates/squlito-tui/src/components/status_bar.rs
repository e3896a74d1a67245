//! Status bar component.
//!
//! Shows the row/query summary on the left and focus-specific key hints
//! right-aligned on the same line.

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use squlito_core::utils::text::render_status_line;

use super::Component;
use super::styles::{BORDER_UNFOCUSED, TEXT_DIM, TEXT_ERROR};

/// Status line at the bottom of the screen.
#[derive(Default)]
pub struct StatusBar {
    message: String,
    hints: String,
    is_error: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the left-hand summary.
    pub fn set_message(&mut self, message: impl Into<String>, is_error: bool) {
        self.message = message.into();
        self.is_error = is_error;
    }

    /// Set the right-hand key hints.
    pub fn set_hints(&mut self, hints: impl Into<String>) {
        self.hints = hints.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status text laid out in `width` columns, split into left and right parts.
    fn layout_line(&self, width: usize) -> (String, String) {
        let line = render_status_line(width, &self.message, &self.hints);
        match line.strip_suffix(self.hints.as_str()) {
            Some(left) if !self.hints.is_empty() => (left.to_string(), self.hints.clone()),
            _ => (line, String::new()),
        }
    }
}

impl Component for StatusBar {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(BORDER_UNFOCUSED);
        let width = usize::from(block.inner(area).width);
        let (left, right) = self.layout_line(width);

        let left_style = if self.is_error {
            TEXT_ERROR
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(right, TEXT_DIM),
        ]))
        .block(block);

        frame.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> bool {
        // Status bar doesn't handle keys
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_line_splits_hints() {
        let mut bar = StatusBar::new();
        bar.set_message("Rows 10  Showing 1-5", false);
        bar.set_hints("q quit");

        let (left, right) = bar.layout_line(30);
        assert_eq!(left, "Rows 10  Showing 1-5    ");
        assert_eq!(right, "q quit");
    }

    #[test]
    fn test_layout_line_without_room_for_message() {
        let mut bar = StatusBar::new();
        bar.set_message("Error: no such table", true);
        bar.set_hints("Tab query  j/k scroll");

        let (left, right) = bar.layout_line(10);
        assert_eq!(left, "Tab que...");
        assert_eq!(right, "");
    }
}
