//! Event handling functions for user input.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Source of quit requests.
///
/// The driver only ever asks one question of its input: did the user ask to quit within the given
/// time. Keeping it behind a trait lets the driver run against scripted input in tests.
pub(crate) trait InputSource {
    /// Waits up to `timeout` for a quit request, returning `true` as soon as one arrives.
    ///
    /// # Errors
    ///
    /// This function may return errors from the underlying event source.
    fn wait_for_quit(&mut self, timeout: Duration) -> Result<bool>;
}

/// Keyboard input read through crossterm.
pub(crate) struct Keyboard;

impl InputSource for Keyboard {
    fn wait_for_quit(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(false);
            }
            if let Event::Key(key) = event::read()? {
                if is_quit(key) {
                    return Ok(true);
                }
            }
            if remaining.is_zero() {
                return Ok(false);
            }
        }
    }
}

/// Returns whether a key event asks the application to quit.
///
/// Quitting is bound to `q`, `Esc` and `Ctrl-C`. Only presses count, so terminals reporting
/// releases do not quit twice.
pub(crate) fn is_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
