/// Keyboard input: one key per tick, with a bounded wait.
///
/// The read never blocks past the configured ceiling; a timeout is a
/// normal outcome meaning "no movement this tick", so minions keep
/// wandering while the player thinks.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::Direction;

/// What the player asked for this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayerAction {
    Move(Direction),
    /// Toggle the inventory info screen.
    Info,
    Quit,
}

/// Wait up to `timeout` for a key and translate it.
/// `Ok(None)` covers both a timeout and an unmapped key.
pub fn read_action(timeout: Duration) -> io::Result<Option<PlayerAction>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(translate(key)),
        _ => Ok(None),
    }
}

fn translate(key: KeyEvent) -> Option<PlayerAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(PlayerAction::Quit);
    }
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            Some(PlayerAction::Move(Direction::Left))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            Some(PlayerAction::Move(Direction::Right))
        }
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            Some(PlayerAction::Move(Direction::Up))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            Some(PlayerAction::Move(Direction::Down))
        }
        KeyCode::Char('i') | KeyCode::Char('I') => Some(PlayerAction::Info),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(PlayerAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_keys_map_to_directions() {
        assert_eq!(translate(key(KeyCode::Char('w'))), Some(PlayerAction::Move(Direction::Up)));
        assert_eq!(translate(key(KeyCode::Left)), Some(PlayerAction::Move(Direction::Left)));
        assert_eq!(translate(key(KeyCode::Char('S'))), Some(PlayerAction::Move(Direction::Down)));
    }

    #[test]
    fn reserved_keys() {
        assert_eq!(translate(key(KeyCode::Char('i'))), Some(PlayerAction::Info));
        assert_eq!(translate(key(KeyCode::Esc)), Some(PlayerAction::Quit));
        assert_eq!(
            translate(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(PlayerAction::Quit)
        );
    }

    #[test]
    fn unmapped_keys_are_noops() {
        assert_eq!(translate(key(KeyCode::Char('z'))), None);
        assert_eq!(translate(key(KeyCode::Tab)), None);
    }
}
