//! Application actions for event-driven architecture.
//!
//! Key and mouse input is translated into [`AppAction`] intents; the App
//! applies them and the components redraw from the new state.

use crossterm::event::KeyEvent;

use crate::components::Focus;

/// Vertical movement requested for the rows view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScroll {
    /// Move by a signed number of rows
    By(i64),
    /// Move by a signed number of viewports
    Pages(i64),
    Top,
    Bottom,
}

/// Application-level actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Quit the application
    Quit,

    /// Move focus sidebar → rows → query → sidebar
    CycleFocus,

    /// Move focus to a specific pane
    Focus(Focus),

    /// Show or hide the key reference
    ToggleHelp,

    /// Close the open overlay
    CloseOverlay,

    /// Scroll the open overlay by a signed number of lines
    ScrollOverlay(i64),

    /// Move the sidebar selection and load the table
    MoveTableSelection(i64),

    /// Select the table at a sidebar index and load it
    SelectTable(usize),

    /// Load the highlighted table and move focus to the rows
    OpenTable,

    /// Scroll the rows view
    ScrollRows(RowScroll),

    /// Pan the rows view left (negative) or right (positive) by one step
    Pan(i64),

    /// Open the detail overlay for the top visible row
    OpenRowDetail,

    /// Open the detail overlay for the cell under a click in the rows body
    OpenCellDetail { body_row: usize, body_x: usize },

    /// Run the query editor's text
    RunQuery,

    /// Replace the editor text with an older history entry
    HistoryOlder,

    /// Replace the editor text with a newer history entry or the draft
    HistoryNewer,

    /// Forward a key to the query editor
    EditQuery(KeyEvent),
}
