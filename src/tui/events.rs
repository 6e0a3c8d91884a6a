use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events. Context-free: the app interprets them
/// according to the active focus (form entry vs. results browsing).
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Escape,
    Confirm,
    NextField,
    PrevField,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    ToggleFuzzy,
    ToggleLanguage,
    CopyReport,
    SaveReport,
    CopyRecordCard,
    NewSearch,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Escape,
        (KeyCode::Enter, _) => Action::Confirm,

        (KeyCode::Tab, _) => Action::NextField,
        (KeyCode::BackTab, _) => Action::PrevField,

        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        (KeyCode::F(2), _) => Action::ToggleFuzzy,
        (KeyCode::F(3), _) => Action::ToggleLanguage,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyReport,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::SaveReport,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::CopyRecordCard,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::NewSearch,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
