use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys the grid understands, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKey {
    Up,
    Down,
    Left,
    Right,
    Tab,
    BackTab,
    Enter,
    F2,
    Delete,
    Backspace,
    Escape,
    Char(char),
}

pub fn grid_key(ev: &KeyEvent) -> Option<GridKey> {
    let k = match ev.code {
        KeyCode::Up => GridKey::Up,
        KeyCode::Down => GridKey::Down,
        KeyCode::Left => GridKey::Left,
        KeyCode::Right => GridKey::Right,
        KeyCode::BackTab => GridKey::BackTab,
        KeyCode::Tab if ev.modifiers.contains(KeyModifiers::SHIFT) => GridKey::BackTab,
        KeyCode::Tab => GridKey::Tab,
        KeyCode::Enter => GridKey::Enter,
        KeyCode::F(2) => GridKey::F2,
        KeyCode::Delete => GridKey::Delete,
        KeyCode::Backspace => GridKey::Backspace,
        KeyCode::Esc => GridKey::Escape,
        KeyCode::Char(c)
            if !ev
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            GridKey::Char(c)
        }
        _ => return None,
    };
    Some(k)
}
