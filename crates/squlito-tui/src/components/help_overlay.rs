//! Help overlay component.
//!
//! Displays a modal overlay showing all available keybindings.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use super::styles::{BORDER_FOCUSED, TEXT_DIM, key_style, title_style};

/// Help overlay showing keybindings.
pub struct HelpOverlay;

impl HelpOverlay {
    const GLOBAL_KEYS: &'static [(&'static str, &'static str)] = &[
        ("Tab", "Cycle sidebar / rows / query"),
        ("Ctrl+H/J/K/L", "Move to the pane in that direction"),
        ("?", "Toggle help"),
        ("q / Esc", "Quit (outside the query editor)"),
        ("Ctrl+C", "Quit"),
    ];

    const TABLE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("↑ / k", "Previous table"),
        ("↓ / j", "Next table"),
        ("Enter", "Browse rows"),
    ];

    const ROW_KEYS: &'static [(&'static str, &'static str)] = &[
        ("↑↓ / j k", "Scroll one row"),
        ("PgUp / PgDn", "Scroll one screen"),
        ("g / G", "First / last rows"),
        ("←→ / h l", "Pan horizontally"),
        ("Enter / click", "Show row or cell detail"),
        ("Wheel", "Scroll three rows"),
    ];

    const QUERY_KEYS: &'static [(&'static str, &'static str)] = &[
        ("Enter", "Run query"),
        ("Shift+Enter", "Insert newline (also Ctrl+J)"),
        ("↑ / ↓", "Older / newer history entry"),
    ];

    /// All help lines, in display order.
    fn lines() -> Vec<Line<'static>> {
        let sections = [
            ("Global", Self::GLOBAL_KEYS),
            ("Tables", Self::TABLE_KEYS),
            ("Rows", Self::ROW_KEYS),
            ("Query", Self::QUERY_KEYS),
        ];

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (title, keys) in sections {
            lines.push(Line::from(Span::styled(format!("  {}", title), title_style())));
            lines.push(Line::from("  ──────────────────────────────────"));
            for (key, action) in keys {
                lines.push(Self::format_keybinding(key, action));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "  Press ? or Esc to close",
            TEXT_DIM,
        )));
        lines
    }

    /// Render the help overlay centered on screen.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup_area);

        let help_text = Paragraph::new(Self::lines())
            .block(
                Block::default()
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(BORDER_FOCUSED),
            )
            .alignment(Alignment::Left);

        frame.render_widget(help_text, popup_area);
    }

    fn format_keybinding(key: &str, action: &str) -> Line<'static> {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<16}", key), key_style()),
            Span::raw(action.to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_section() {
        let text: Vec<String> = HelpOverlay::lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        for section in ["Global", "Tables", "Rows", "Query"] {
            assert!(text.iter().any(|l| l.trim() == section), "missing {}", section);
        }
        assert!(text.iter().any(|l| l.contains("Shift+Enter")));
    }
}
