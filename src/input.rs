//! Keyboard mapping for the terminal front end.

use crate::game::{GameInput, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of reading one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(GameInput),
    /// Ctrl+C: leave immediately, whatever the game state.
    ForceQuit,
    None,
}

/// Translate a key press into a logical input for the current state.
pub fn map_key(key: KeyEvent, phase: Phase, shop_open: bool) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::ForceQuit;
    }

    let input = if shop_open {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(GameInput::ShopUp),
            KeyCode::Down | KeyCode::Char('j') => Some(GameInput::ShopDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::ShopSelect),
            KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('q') => {
                Some(GameInput::ToggleShop)
            }
            _ => None,
        }
    } else {
        match (phase, key.code) {
            (Phase::GameOver, KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up) => {
                Some(GameInput::Restart)
            }
            (_, KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up) => Some(GameInput::Flap),
            (_, KeyCode::Char('r') | KeyCode::Char('R')) => Some(GameInput::Restart),
            (_, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) => Some(GameInput::Quit),
            (_, KeyCode::Char('s') | KeyCode::Char('S')) => Some(GameInput::ToggleShop),
            _ => None,
        }
    };

    input.map_or(KeyAction::None, KeyAction::Game)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_space_flaps_while_flying() {
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), Phase::Ready, false),
            KeyAction::Game(GameInput::Flap)
        );
        assert_eq!(
            map_key(press(KeyCode::Up), Phase::Playing, false),
            KeyAction::Game(GameInput::Flap)
        );
    }

    #[test]
    fn test_space_restarts_after_crash() {
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), Phase::GameOver, false),
            KeyAction::Game(GameInput::Restart)
        );
    }

    #[test]
    fn test_shop_keys() {
        assert_eq!(
            map_key(press(KeyCode::Down), Phase::Ready, true),
            KeyAction::Game(GameInput::ShopDown)
        );
        assert_eq!(
            map_key(press(KeyCode::Esc), Phase::Ready, true),
            KeyAction::Game(GameInput::ToggleShop)
        );
        assert_eq!(
            map_key(press(KeyCode::Enter), Phase::Ready, true),
            KeyAction::Game(GameInput::ShopSelect)
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, Phase::Playing, false), KeyAction::ForceQuit);
        assert_eq!(map_key(key, Phase::Ready, true), KeyAction::ForceQuit);
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(
            map_key(press(KeyCode::Char('x')), Phase::Playing, false),
            KeyAction::None
        );
    }
}
