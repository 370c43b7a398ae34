use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::SummaryController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Paste(String),
    Backspace,
    ClearInput,
    Submit,
    Copy,
    Reset,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Char('y') if ctrl => Some(Action::Copy),
        KeyCode::Char('r') if ctrl => Some(Action::Reset),
        KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::Insert(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Enter => Some(Action::Submit),
        _ => None,
    }
}

pub fn action_for_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => action_for_key(key),
        Event::Paste(text) => Some(Action::Paste(text)),
        _ => None,
    }
}

/// Applies one action. Returns `false` when the app should exit.
pub fn apply_action(action: Action, controller: &mut SummaryController) -> bool {
    match action {
        Action::Insert(c) => controller.insert_char(c),
        Action::Paste(text) => controller.insert_str(&text),
        Action::Backspace => controller.delete_char(),
        Action::ClearInput => controller.clear_url(),
        Action::Submit => {
            controller.submit();
        }
        Action::Copy => {
            controller.copy_result();
        }
        Action::Reset => {
            controller.reset();
        }
        Action::Quit => return false,
    }
    true
}
