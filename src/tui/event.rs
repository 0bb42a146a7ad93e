//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::FocusFlowError;
use crate::features::focus::Phase;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the active mode.
    Toggle,
    /// Rewind the active mode.
    Reset,
    /// Stop and rewind the active mode.
    Stop,
    /// Switch between timer and stopwatch.
    SwitchMode,
    /// Jump to a phase.
    Phase(Phase),
    /// Show the key help.
    Help,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if the wait timed out or the key is
/// not bound.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(timeout: Duration) -> Result<Option<Action>, FocusFlowError> {
    if !event::poll(timeout)
        .map_err(|e| FocusFlowError::Config(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| FocusFlowError::Config(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    Ok(map_key(key.code, key.modifiers))
}

/// Map a key to its action.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    // Handle Ctrl+C
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('t') | KeyCode::Tab => Some(Action::SwitchMode),
        KeyCode::Char('1') => Some(Action::Phase(Phase::Focus)),
        KeyCode::Char('2') => Some(Action::Phase(Phase::ShortBreak)),
        KeyCode::Char('3') => Some(Action::Phase(Phase::LongBreak)),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_bindings() {
        let none = KeyModifiers::NONE;
        assert_eq!(map_key(KeyCode::Char(' '), none), Some(Action::Toggle));
        assert_eq!(map_key(KeyCode::Char('r'), none), Some(Action::Reset));
        assert_eq!(map_key(KeyCode::Char('s'), none), Some(Action::Stop));
        assert_eq!(map_key(KeyCode::Char('t'), none), Some(Action::SwitchMode));
        assert_eq!(
            map_key(KeyCode::Char('2'), none),
            Some(Action::Phase(Phase::ShortBreak))
        );
        assert_eq!(map_key(KeyCode::Char('q'), none), Some(Action::Quit));
        assert_eq!(map_key(KeyCode::Char('x'), none), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }
}
