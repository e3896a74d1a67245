//! Multi-line SQL editor.
//!
//! Enter is handled by the App (it runs the query); the editor itself takes
//! Shift+Enter, Alt+Enter and Ctrl+J as newline and handles plain editing
//! keys. Up/Down are left to the App for history.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::Component;
use super::styles::{TEXT_DIM, border_style, title_style};

/// Editor state: lines of text and a cursor in (line, char) coordinates.
pub struct QueryEditor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    /// Bumped on every text change
    revision: u64,
}

impl Default for QueryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEditor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            revision: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// (line, char) position of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Replace the text, leaving the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.row = self.lines.len() - 1;
        self.col = self.lines[self.row].chars().count();
        self.revision += 1;
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(&self, row: usize, col: usize) -> usize {
        self.lines[row]
            .char_indices()
            .nth(col)
            .map_or(self.lines[row].len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.row, self.col);
        self.lines[self.row].insert(idx, c);
        self.col += 1;
        self.revision += 1;
    }

    fn insert_newline(&mut self) {
        let idx = self.byte_index(self.row, self.col);
        let rest = self.lines[self.row].split_off(idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
        self.revision += 1;
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            let idx = self.byte_index(self.row, self.col - 1);
            self.lines[self.row].remove(idx);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        } else {
            return;
        }
        self.revision += 1;
    }

    fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let idx = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(idx);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        } else {
            return;
        }
        self.revision += 1;
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    /// Display column of the cursor within its line.
    fn cursor_x(&self) -> usize {
        let idx = self.byte_index(self.row, self.col);
        self.lines[self.row][..idx].width()
    }
}

impl Component for QueryEditor {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(Span::styled(" Query ", title_style()))
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let inner = block.inner(area);

        if !focused && self.text().trim().is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Type SQL and press Enter to run",
                TEXT_DIM,
            )))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let height = usize::from(inner.height.max(1));
        let width = usize::from(inner.width.max(1));
        let scroll_y = (self.row + 1).saturating_sub(height);
        let cursor_x = self.cursor_x();
        let scroll_x = (cursor_x + 1).saturating_sub(width);

        let lines: Vec<Line> = self.lines.iter().map(|l| Line::from(l.as_str())).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((scroll_y as u16, scroll_x as u16));
        frame.render_widget(paragraph, area);

        if focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (cursor_x - scroll_x) as u16;
            let y = inner.y + (self.row - scroll_y) as u16;
            frame.set_cursor_position((x, y));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                self.insert_newline()
            }
            KeyCode::Char('j') if ctrl => self.insert_newline(),
            KeyCode::Char('a') if ctrl => self.col = 0,
            KeyCode::Char('e') if ctrl => self.col = self.line_len(self.row),
            KeyCode::Char(c) if !ctrl && !alt => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = self.line_len(self.row),
            _ => return false,
        }
        true
    }
}
