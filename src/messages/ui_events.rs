//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Ticker editing
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    ClearInput,

    // Valuation
    Fetch,

    // History
    HistoryPrev,
    HistoryNext,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
///
/// The ticker field is always focused, so printable characters are input
/// and commands live on non-printable keys.
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            KeyCode::Char('u') => Some(UiEvent::ClearInput),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::F(1) => Some(UiEvent::ToggleHelp),
        KeyCode::Enter => Some(UiEvent::Fetch),
        KeyCode::Up => Some(UiEvent::HistoryPrev),
        KeyCode::Down => Some(UiEvent::HistoryNext),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
