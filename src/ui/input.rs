use crate::ui::traits::Action;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Global bindings, consulted when the active view leaves a key unhandled.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(Action::Reconnect),
            (KeyCode::Tab, _) => Some(Action::NextTab),
            (KeyCode::BackTab, _) => Some(Action::PreviousTab),
            (KeyCode::Esc, _) => Some(Action::Back),
            _ => None,
        }
    }
}
