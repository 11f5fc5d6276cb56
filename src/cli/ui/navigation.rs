use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Esc,
    Close,
    Retry,
    Quit,
    Click { column: u16, row: u16 },
    Unknown,
}

pub fn nav_key_from_event(event: &Event) -> NavKey {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Up | KeyCode::Char('k') => NavKey::Up,
            KeyCode::Down | KeyCode::Char('j') => NavKey::Down,
            KeyCode::Enter => NavKey::Enter,
            KeyCode::Esc => NavKey::Esc,
            KeyCode::Char('x') | KeyCode::Char('X') => NavKey::Close,
            KeyCode::Char('r') | KeyCode::Char('R') => NavKey::Retry,
            KeyCode::Char('q') | KeyCode::Char('Q') => NavKey::Quit,
            _ => NavKey::Unknown,
        },
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
            NavKey::Click {
                column: mouse.column,
                row: mouse.row,
            }
        }
        _ => NavKey::Unknown,
    }
}

/// Blocks until a key or click the browser understands arrives.
pub fn read_nav_key() -> io::Result<NavKey> {
    loop {
        match nav_key_from_event(&event::read()?) {
            NavKey::Unknown => continue,
            key => return Ok(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    #[test]
    fn maps_keys_and_left_clicks() {
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(nav_key_from_event(&key(KeyCode::Esc)), NavKey::Esc);
        assert_eq!(nav_key_from_event(&key(KeyCode::Char('x'))), NavKey::Close);
        assert_eq!(nav_key_from_event(&key(KeyCode::Tab)), NavKey::Unknown);

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 9,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            nav_key_from_event(&click),
            NavKey::Click { column: 4, row: 9 }
        );
    }
}
