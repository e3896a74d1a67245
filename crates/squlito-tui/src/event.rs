//! Terminal input.
//!
//! crossterm is polled with the configured tick rate. Only the input the App
//! reacts to is surfaced; everything else (focus changes, pastes, key
//! releases) is swallowed and polling continues.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// No input within one tick
    Tick,
    /// New terminal size in columns and rows
    Resize(u16, u16),
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
        }
    }

    /// Block until relevant input arrives or the tick elapses.
    pub fn next(&self) -> std::io::Result<Event> {
        let deadline = Instant::now() + self.tick_rate;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Event::Tick);
            }
            if let Some(ev) = translate(event::read()?) {
                return Ok(ev);
            }
        }
    }
}

fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key(key)),
        // Mouse motion would redraw on every pixel of movement
        CrosstermEvent::Mouse(mouse) if mouse.kind != MouseEventKind::Moved => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_translate_drops_releases_and_motion() {
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(translate(CrosstermEvent::Key(press)), Some(Event::Key(_))));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(translate(CrosstermEvent::Key(release)).is_none());

        let motion = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert!(translate(CrosstermEvent::Mouse(motion)).is_none());
        assert!(translate(CrosstermEvent::FocusGained).is_none());
        assert!(matches!(translate(CrosstermEvent::Resize(80, 24)), Some(Event::Resize(80, 24))));
    }
}
