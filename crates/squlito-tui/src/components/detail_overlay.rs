//! Detail overlay for a row or a single cell.
//!
//! A row shows every `column : value` pair; a cell shows the full value,
//! pretty-printed when it holds a JSON object or array.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use squlito_core::db::Row;
use squlito_core::display::format_cell;
use squlito_core::utils::text::{maybe_indent_json, pad_to_width, truncate_to_width};
use unicode_width::UnicodeWidthStr;

use super::centered_rect;
use super::styles::{BORDER_FOCUSED, TEXT_DIM, key_style};

/// Widest column name shown in the row detail.
const MAX_NAME_WIDTH: usize = 24;

/// Scrollable overlay text.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailOverlay {
    title: String,
    lines: Vec<String>,
    scroll: usize,
}

impl DetailOverlay {
    /// Every field of `row`, in column order.
    pub fn for_row(row_number: usize, columns: &[String], row: &Row) -> Self {
        let name_width = columns
            .iter()
            .map(|c| c.width())
            .max()
            .unwrap_or(0)
            .min(MAX_NAME_WIDTH);

        let lines = columns
            .iter()
            .map(|col| {
                let value = row.get(col).map(format_cell).unwrap_or_else(|| "NULL".to_string());
                let value = value.replace(['\r', '\n'], " ");
                format!(
                    "{} : {}",
                    pad_to_width(&truncate_to_width(col, name_width), name_width),
                    value
                )
            })
            .collect();

        Self {
            title: format!("Row {}", row_number),
            lines,
            scroll: 0,
        }
    }

    /// One cell's full value.
    pub fn for_cell(row_number: usize, column: &str, row: &Row) -> Self {
        let value = row.get(column).map(format_cell).unwrap_or_else(|| "NULL".to_string());
        Self {
            title: format!("{} (row {})", column, row_number),
            lines: maybe_indent_json(&value).lines().map(str::to_string).collect(),
            scroll: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let max = self.lines.len().saturating_sub(1);
        let next = (self.scroll as i64 + delta).clamp(0, max as i64);
        self.scroll = next as usize;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let visible = usize::from(popup_area.height.saturating_sub(4)).max(1);
        let mut lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(visible)
            .map(|l| Line::from(l.as_str()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[", TEXT_DIM),
            Span::styled("↑↓/jk", key_style()),
            Span::styled(" Scroll] [", TEXT_DIM),
            Span::styled("Esc/Enter", key_style()),
            Span::styled(" Close]", TEXT_DIM),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(format!(" {} ", self.title))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(BORDER_FOCUSED),
        );
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squlito_core::db::{SqlValue, row_from};

    fn sample_row() -> Row {
        row_from([
            ("id", SqlValue::Integer(7)),
            ("payload", SqlValue::from(r#"{"a":1,"b":[2]}"#)),
            ("note", SqlValue::from("line one\nline two")),
        ])
    }

    fn columns() -> Vec<String> {
        ["id", "payload", "note"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_row_detail_lists_fields() {
        let detail = DetailOverlay::for_row(7, &columns(), &sample_row());
        assert_eq!(detail.title(), "Row 7");
        assert_eq!(detail.lines()[0], "id      : 7");
        assert_eq!(detail.lines()[2], "note    : line one line two");
    }

    #[test]
    fn test_cell_detail_indents_json() {
        let detail = DetailOverlay::for_cell(7, "payload", &sample_row());
        assert_eq!(detail.title(), "payload (row 7)");
        assert_eq!(detail.lines()[0], "{");
        assert_eq!(detail.lines()[1], "    \"a\": 1,");
    }

    #[test]
    fn test_cell_detail_keeps_text_verbatim() {
        let detail = DetailOverlay::for_cell(1, "note", &sample_row());
        assert_eq!(detail.lines(), &["line one", "line two"]);

        let detail = DetailOverlay::for_cell(1, "missing", &sample_row());
        assert_eq!(detail.lines(), &["NULL"]);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut detail = DetailOverlay::for_cell(1, "payload", &sample_row());
        detail.scroll_by(-3);
        assert_eq!(detail.scroll, 0);
        detail.scroll_by(100);
        assert_eq!(detail.scroll, detail.lines().len() - 1);
    }
}
