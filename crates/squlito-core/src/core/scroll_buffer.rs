//! Scroll buffer for table browsing.
//!
//! The rows view keeps a window of `buffer_size` rows starting at
//! `buffer_start` and only goes back to the database when the viewport
//! offset leaves that window. [`reduce`] is the single update function:
//! it takes the current state and an event and returns the next state plus
//! the page to fetch, if any.

/// Rows kept in memory when nothing else is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 200;

/// Scroll position of a table and the buffered window around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBuffer {
    /// Row count reported by the last fetch
    pub total_rows: usize,
    /// First row shown in the viewport
    pub offset: usize,
    /// Table row held at index 0 of the buffer
    pub buffer_start: usize,
    pub buffer_size: usize,
    /// Rows that fit in the viewport
    pub viewport_rows: usize,
}

impl Default for ScrollBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// Navigation input for [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The viewport now holds this many rows
    Resize { viewport_rows: usize },
    /// Move the viewport by a signed number of rows
    ScrollBy(i64),
    /// Move the viewport to an absolute row
    ScrollTo(usize),
    /// Move the viewport to the last full screen
    ScrollToEnd,
    /// A fetch finished; values come from the returned page
    Loaded { total_rows: usize, buffer_start: usize },
    /// A different table was selected
    Reset,
}

/// Arguments for the next page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

/// Result of one [`reduce`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: ScrollBuffer,
    pub fetch: Option<PageRequest>,
}

impl ScrollBuffer {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            total_rows: 0,
            offset: 0,
            buffer_start: 0,
            buffer_size: buffer_size.max(1),
            viewport_rows: 1,
        }
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.viewport_rows)
    }

    /// Whether there are more rows than fit in the viewport.
    pub fn overflows(&self) -> bool {
        self.total_rows > self.viewport_rows
    }

    /// Index into the loaded rows of the first visible row.
    pub fn buffer_row_delta(&self) -> usize {
        self.offset.saturating_sub(self.buffer_start)
    }

    /// 1-based inclusive range of rows on screen, `(0, 0)` when empty.
    pub fn shown_range(&self) -> (usize, usize) {
        row_range(self.total_rows, self.offset, self.viewport_rows)
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            limit: self.buffer_size,
            offset: self.buffer_start,
        }
    }

    /// Clamp the offset and re-anchor the buffer around it.
    ///
    /// Scrolling above the buffer anchors it at the new offset; scrolling
    /// below it anchors it so the offset is its last row.
    fn sync(self, desired: usize) -> Transition {
        let offset = desired.min(self.max_offset());
        let mut buffer_start = self.buffer_start;

        if !self.overflows() {
            buffer_start = 0;
        }
        if offset < buffer_start {
            buffer_start = offset;
        }
        if offset >= buffer_start + self.buffer_size {
            buffer_start = (offset + 1).saturating_sub(self.buffer_size);
        }

        let state = ScrollBuffer {
            offset,
            buffer_start,
            ..self
        };
        let fetch = (buffer_start != self.buffer_start).then(|| state.request());
        if let Some(req) = fetch {
            log::debug!(
                "re-anchoring buffer at {} (offset {}, limit {})",
                req.offset,
                offset,
                req.limit
            );
        }
        Transition { state, fetch }
    }
}

/// Advance `state` by one event.
pub fn reduce(state: ScrollBuffer, event: ScrollEvent) -> Transition {
    match event {
        ScrollEvent::Resize { viewport_rows } => ScrollBuffer {
            viewport_rows: viewport_rows.max(1),
            ..state
        }
        .sync(state.offset),
        ScrollEvent::ScrollBy(delta) => {
            let desired = if delta < 0 {
                state.offset.saturating_sub(delta.unsigned_abs() as usize)
            } else {
                state.offset.saturating_add(delta as usize)
            };
            state.sync(desired)
        }
        ScrollEvent::ScrollTo(row) => state.sync(row),
        ScrollEvent::ScrollToEnd => state.sync(state.max_offset()),
        ScrollEvent::Loaded {
            total_rows,
            buffer_start,
        } => {
            let loaded = ScrollBuffer {
                total_rows,
                buffer_start,
                ..state
            };
            Transition {
                state: ScrollBuffer {
                    offset: state.offset.min(loaded.max_offset()),
                    ..loaded
                },
                fetch: None,
            }
        }
        ScrollEvent::Reset => {
            let state = ScrollBuffer {
                total_rows: 0,
                offset: 0,
                buffer_start: 0,
                ..state
            };
            Transition {
                state,
                fetch: Some(state.request()),
            }
        }
    }
}

/// Clamp an offset into `[0, max(0, total_rows - viewport_rows)]`.
pub fn clamp_offset(offset: usize, total_rows: usize, viewport_rows: usize) -> usize {
    offset.min(total_rows.saturating_sub(viewport_rows))
}

/// 1-based inclusive range of rows visible at `offset`, `(0, 0)` when there
/// are no rows.
pub fn row_range(total_rows: usize, offset: usize, viewport_rows: usize) -> (usize, usize) {
    if total_rows == 0 {
        return (0, 0);
    }
    (offset + 1, (offset + viewport_rows).min(total_rows))
}
