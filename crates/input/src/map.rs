//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => GameAction::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => GameAction::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => GameAction::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => {
            GameAction::Move(Direction::Right)
        }

        KeyCode::Char('r' | 'R') => GameAction::Restart,
        KeyCode::Char('t' | 'T') => GameAction::NextSkin,
        KeyCode::Char('+' | '=') => GameAction::SpeedUp,
        KeyCode::Char('-' | '_') => GameAction::SpeedDown,
        KeyCode::Char('m' | 'M') => GameAction::ToggleTheme,

        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), Some(GameAction::Move(Direction::Up)));
        assert_eq!(press(KeyCode::Down), Some(GameAction::Move(Direction::Down)));
        assert_eq!(press(KeyCode::Left), Some(GameAction::Move(Direction::Left)));
        assert_eq!(press(KeyCode::Right), Some(GameAction::Move(Direction::Right)));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(press(KeyCode::Char('W')), Some(GameAction::Move(Direction::Up)));
        assert_eq!(press(KeyCode::Char('j')), Some(GameAction::Move(Direction::Down)));
        assert_eq!(press(KeyCode::Char('a')), Some(GameAction::Move(Direction::Left)));
        assert_eq!(press(KeyCode::Char('L')), Some(GameAction::Move(Direction::Right)));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char('t')), Some(GameAction::NextSkin));
        assert_eq!(press(KeyCode::Char('+')), Some(GameAction::SpeedUp));
        assert_eq!(press(KeyCode::Char('-')), Some(GameAction::SpeedDown));
        assert_eq!(press(KeyCode::Char('m')), Some(GameAction::ToggleTheme));
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_ctrl_chords_are_not_moves() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
