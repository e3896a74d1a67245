//! Colours shared by the panes and overlays.

use ratatui::style::{Color, Modifier, Style};

/// Accent used for focus, titles and the grid header.
const ACCENT: Color = Color::Cyan;

pub const BORDER_FOCUSED: Style = Style::new().fg(ACCENT);
pub const BORDER_UNFOCUSED: Style = Style::new().fg(Color::DarkGray);

/// Placeholders, hints and the right side of the status line.
pub const TEXT_DIM: Style = Style::new().fg(Color::DarkGray);
pub const TEXT_ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

#[inline]
pub fn border_style(focused: bool) -> Style {
    if focused { BORDER_FOCUSED } else { BORDER_UNFOCUSED }
}

/// Column names above the grid.
pub fn header_style() -> Style {
    Style::new()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Highlighted table in the sidebar.
pub fn selected_style() -> Style {
    Style::new().add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

pub fn title_style() -> Style {
    Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Key names in the help and detail overlays.
pub fn key_style() -> Style {
    Style::new().fg(Color::Yellow)
}
