//! Key resolution for the chat screen.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE_LINES: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    CycleLanguage,
    ScrollUp(u16),
    ScrollDown(u16),
    Quit,
    /// Forward the key to the input box.
    Edit(KeyEvent),
}

pub fn resolve_key(key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('l') if ctrl => KeyAction::CycleLanguage,
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab => KeyAction::CycleLanguage,
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
        {
            KeyAction::InsertNewline
        }
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Up => KeyAction::ScrollUp(1),
        KeyCode::Down => KeyAction::ScrollDown(1),
        KeyCode::PageUp => KeyAction::ScrollUp(PAGE_LINES),
        KeyCode::PageDown => KeyAction::ScrollDown(PAGE_LINES),
        _ => KeyAction::Edit(key),
    }
}
