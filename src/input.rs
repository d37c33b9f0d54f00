use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::direction::Heading::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Steer(Heading),
    Quit,
    Ignored,
}

/// Arrow keys, WASD or the numpad digits 8/4/2/6 steer. Ctrl+C and Esc quit.
pub fn translate(ev: &KeyEvent) -> InputEvent {
    if is_ctrl_c(ev) {
        return InputEvent::Quit;
    }

    match ev.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('8') => InputEvent::Steer(Up),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('4') => InputEvent::Steer(Left),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('2') => InputEvent::Steer(Down),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('6') => InputEvent::Steer(Right),
        KeyCode::Esc => InputEvent::Quit,
        _ => InputEvent::Ignored,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL))
}
