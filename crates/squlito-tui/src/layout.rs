//! Layout constants and screen partitioning for squlito.
//!
//! Centralizes the layout magic numbers and splits the terminal into the
//! sidebar, the rows header and body, the query editor and the status line.

use ratatui::layout::Rect;

/// Main layout constants.
pub mod main {
    /// Smallest usable terminal width.
    pub const MIN_WIDTH: u16 = 40;
    /// Smallest usable terminal height.
    pub const MIN_HEIGHT: u16 = 10;
    /// Rows header block height (borders plus the column header line).
    pub const ROWS_HEADER_HEIGHT: u16 = 3;
    /// Smallest rows body height.
    pub const MIN_ROWS_HEIGHT: u16 = 3;
    /// Query editor height including borders.
    pub const QUERY_HEIGHT: u16 = 7;
    /// Smallest query editor height.
    pub const MIN_QUERY_HEIGHT: u16 = 3;
    /// Status line height.
    pub const STATUS_HEIGHT: u16 = 2;
}

/// Sidebar sizing.
pub mod sidebar {
    /// Share of the terminal width given to the sidebar, in percent.
    pub const WIDTH_PERCENT: u32 = 28;
    pub const MIN_WIDTH: u16 = 22;
    pub const MAX_WIDTH: u16 = 40;
    /// Columns always left for the main area.
    pub const MIN_MAIN_WIDTH: u16 = 20;
}

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub sidebar: Rect,
    pub rows_header: Rect,
    pub rows_body: Rect,
    pub query: Rect,
    pub status: Rect,
}

/// Split `area` into the application regions, or `None` when the terminal
/// is below the minimum size.
pub fn calculate_layout(area: Rect) -> Option<AppLayout> {
    use main::*;

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return None;
    }

    let available = area.height - STATUS_HEIGHT;
    let mut query_height = QUERY_HEIGHT;
    if available < ROWS_HEADER_HEIGHT + MIN_ROWS_HEIGHT + QUERY_HEIGHT {
        query_height = available
            .saturating_sub(ROWS_HEADER_HEIGHT + MIN_ROWS_HEIGHT)
            .max(MIN_QUERY_HEIGHT);
    }
    let mut rows_height = available.saturating_sub(ROWS_HEADER_HEIGHT + query_height);
    if rows_height < MIN_ROWS_HEIGHT {
        rows_height = MIN_ROWS_HEIGHT;
        query_height = available.saturating_sub(ROWS_HEADER_HEIGHT + rows_height);
    }

    let sidebar_width = sidebar_width(area.width);
    let main_width = area.width - sidebar_width;
    let main_x = area.x + sidebar_width;

    let rows_header = Rect::new(main_x, area.y, main_width, ROWS_HEADER_HEIGHT);
    let rows_body = Rect::new(main_x, rows_header.bottom(), main_width, rows_height);
    let query = Rect::new(main_x, rows_body.bottom(), main_width, query_height);

    Some(AppLayout {
        sidebar: Rect::new(area.x, area.y, sidebar_width, available),
        rows_header,
        rows_body,
        query,
        status: Rect::new(area.x, area.y + available, area.width, STATUS_HEIGHT),
    })
}

fn sidebar_width(total: u16) -> u16 {
    use sidebar::*;

    let proportional = (u32::from(total) * WIDTH_PERCENT + 50) / 100;
    let width = (proportional as u16).clamp(MIN_WIDTH, MAX_WIDTH);
    let max_width = total.saturating_sub(MIN_MAIN_WIDTH).max(MIN_WIDTH);
    width.min(max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_regular_terminal() {
        let layout = calculate_layout(Rect::new(0, 0, 120, 40)).expect("layout");

        assert_eq!(layout.sidebar, Rect::new(0, 0, 34, 38));
        assert_eq!(layout.rows_header, Rect::new(34, 0, 86, 3));
        assert_eq!(layout.rows_body, Rect::new(34, 3, 86, 28));
        assert_eq!(layout.query, Rect::new(34, 31, 86, 7));
        assert_eq!(layout.status, Rect::new(0, 38, 120, 2));
    }

    #[test]
    fn test_layout_sidebar_clamps() {
        let wide = calculate_layout(Rect::new(0, 0, 300, 40)).expect("layout");
        assert_eq!(wide.sidebar.width, 40);

        let narrow = calculate_layout(Rect::new(0, 0, 50, 40)).expect("layout");
        assert_eq!(narrow.sidebar.width, 22);
        assert_eq!(narrow.rows_body.width, 28);
    }

    #[test]
    fn test_layout_short_terminal_shrinks_query() {
        let layout = calculate_layout(Rect::new(0, 0, 80, 12)).expect("layout");
        assert_eq!(layout.rows_header.height, 3);
        assert_eq!(layout.rows_body.height, 3);
        assert_eq!(layout.query.height, 4);
        assert_eq!(layout.query.bottom(), layout.status.y);
    }

    #[test]
    fn test_layout_minimum_terminal() {
        let layout = calculate_layout(Rect::new(0, 0, 40, 10)).expect("layout");
        assert_eq!(layout.rows_body.height, 3);
        assert_eq!(layout.query.height, 2);
        assert_eq!(layout.sidebar.width + layout.rows_body.width, 40);
    }

    #[test]
    fn test_layout_too_small() {
        assert!(calculate_layout(Rect::new(0, 0, 39, 40)).is_none());
        assert!(calculate_layout(Rect::new(0, 0, 120, 9)).is_none());
    }
}
