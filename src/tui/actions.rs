use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};

/// Actions available while the expense list has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiAction {
    MoveUp,
    MoveDown,
    PressRowControl,
    Delete,
    ToggleTheme,
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    FocusNext,
    FocusPrev,
    Exit,
}

/// Actions available while one of the text inputs has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingAction {
    InsertChar(char),
    MoveLeft,
    MoveRight,
    DeleteLeft,
    DeleteRight,
    Submit,
    Leave,
    FocusNext,
    FocusPrev,
}

pub fn key_pressed() -> Option<KeyCode> {
    if poll(Duration::from_millis(50)).ok()? {
        if let Event::Key(key) = read().ok()? {
            if key.kind == KeyEventKind::Press {
                return Some(key.code);
            }
        }
    }
    None
}

pub fn widget_action(code: KeyCode) -> Option<TuiAction> {
    match code {
        KeyCode::Char(c) => match c {
            'k' => Some(TuiAction::MoveUp),
            'j' => Some(TuiAction::MoveDown),
            'e' => Some(TuiAction::PressRowControl),
            'd' => Some(TuiAction::Delete),
            't' => Some(TuiAction::ToggleTheme),
            '[' => Some(TuiAction::PrevMonth),
            ']' => Some(TuiAction::NextMonth),
            '{' => Some(TuiAction::PrevYear),
            '}' => Some(TuiAction::NextYear),
            'q' => Some(TuiAction::Exit),
            _ => None,
        },
        KeyCode::Up => Some(TuiAction::MoveUp),
        KeyCode::Down => Some(TuiAction::MoveDown),
        KeyCode::Enter => Some(TuiAction::PressRowControl),
        KeyCode::Delete => Some(TuiAction::Delete),
        KeyCode::Tab => Some(TuiAction::FocusNext),
        KeyCode::BackTab => Some(TuiAction::FocusPrev),
        KeyCode::Esc => Some(TuiAction::Exit),
        _ => None,
    }
}

pub fn widget_editing_action(code: KeyCode) -> Option<EditingAction> {
    match code {
        KeyCode::Char(c) => {
            if c.is_alphanumeric() || c == ' ' || ".,-+'!?&()/".contains(c) {
                Some(EditingAction::InsertChar(c))
            } else {
                None
            }
        }
        KeyCode::Left => Some(EditingAction::MoveLeft),
        KeyCode::Right => Some(EditingAction::MoveRight),
        KeyCode::Enter => Some(EditingAction::Submit),
        KeyCode::Esc => Some(EditingAction::Leave),
        KeyCode::Backspace => Some(EditingAction::DeleteLeft),
        KeyCode::Delete => Some(EditingAction::DeleteRight),
        KeyCode::Tab => Some(EditingAction::FocusNext),
        KeyCode::BackTab => Some(EditingAction::FocusPrev),
        _ => None,
    }
}
