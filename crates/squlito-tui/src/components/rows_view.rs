//! Rows header and grid body.
//!
//! The App hands over a rendered grid (or a message) together with the
//! vertical and horizontal scroll; this component only slices and draws.

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use squlito_core::display::GridRender;

use super::Component;
use super::styles::{TEXT_DIM, TEXT_ERROR, border_style, header_style, title_style};
use crate::layout::main::ROWS_HEADER_HEIGHT;

/// What the rows pane is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum RowsContent {
    Grid(GridRender),
    /// Placeholder text such as "No table selected"
    Message(String),
    /// Error text shown in place of the grid
    Error(String),
}

/// Rows pane: a one-line header block over the scrolled body.
pub struct RowsView {
    title: String,
    content: RowsContent,
    /// Index in the grid body of the first visible line
    row_delta: usize,
    scroll_x: usize,
}

impl Default for RowsView {
    fn default() -> Self {
        Self::new()
    }
}

impl RowsView {
    pub fn new() -> Self {
        Self {
            title: "Rows".to_string(),
            content: RowsContent::Message("No table selected".to_string()),
            row_delta: 0,
            scroll_x: 0,
        }
    }

    pub fn set_content(&mut self, title: impl Into<String>, content: RowsContent) {
        self.title = title.into();
        self.content = content;
    }

    pub fn set_scroll(&mut self, row_delta: usize, scroll_x: usize) {
        self.row_delta = row_delta;
        self.scroll_x = scroll_x;
    }

    pub fn content(&self) -> &RowsContent {
        &self.content
    }

    pub fn grid(&self) -> Option<&GridRender> {
        match &self.content {
            RowsContent::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Display width of the content, for horizontal scroll limits.
    pub fn content_width(&self) -> usize {
        match &self.content {
            RowsContent::Grid(grid) => grid.width,
            RowsContent::Message(text) | RowsContent::Error(text) => {
                squlito_core::utils::text::measure_message_width(text)
            }
        }
    }

    fn body_block(focused: bool) -> Block<'static> {
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(border_style(focused))
    }

    /// Text area of the body when the rows pane occupies `body`.
    pub fn body_inner(body: Rect) -> Rect {
        Self::body_block(false).inner(body)
    }
}

impl Component for RowsView {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let header_area = Rect {
            height: ROWS_HEADER_HEIGHT.min(area.height),
            ..area
        };
        let body_area = Rect {
            y: header_area.bottom(),
            height: area.height - header_area.height,
            ..area
        };
        let scroll = (0, self.scroll_x.min(u16::MAX as usize) as u16);

        let header_line = match &self.content {
            RowsContent::Grid(grid) => Line::from(Span::styled(grid.header.clone(), header_style())),
            _ => Line::from(""),
        };
        let header = Paragraph::new(header_line)
            .block(
                Block::default()
                    .title(Span::styled(format!(" {} ", self.title), title_style()))
                    .borders(Borders::ALL)
                    .border_style(border_style(focused)),
            )
            .scroll(scroll);
        frame.render_widget(header, header_area);

        let visible = usize::from(Self::body_inner(body_area).height);
        let (text, style) = match &self.content {
            RowsContent::Grid(grid) => (grid.body.as_str(), Style::default()),
            RowsContent::Message(text) => (text.as_str(), TEXT_DIM),
            RowsContent::Error(text) => (text.as_str(), TEXT_ERROR),
        };
        let skip = if matches!(self.content, RowsContent::Grid(_)) {
            self.row_delta
        } else {
            0
        };
        let lines: Vec<Line> = text
            .lines()
            .skip(skip)
            .take(visible)
            .map(|l| Line::from(Span::styled(l, style)))
            .collect();

        let body = Paragraph::new(lines)
            .block(Self::body_block(focused))
            .scroll(scroll);
        frame.render_widget(body, body_area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> bool {
        // Scrolling goes through the scroll buffer in the App
        false
    }
}
