use blockfall_engine::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Intent(Intent),
    AcknowledgeGameOver,
    Quit,
}

pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::AcknowledgeGameOver,
        code => KeyAction::Intent(intent_for_key(code)?),
    };
    Some(action)
}

pub fn intent_for_key(code: KeyCode) -> Option<Intent> {
    let intent = match code {
        KeyCode::Left => Intent::MoveLeft,
        KeyCode::Right => Intent::MoveRight,
        KeyCode::Down => Intent::SoftDrop,
        KeyCode::Up => Intent::HardDrop,
        KeyCode::Char(' ') => Intent::Rotate,
        KeyCode::Char('a' | 'A') => Intent::ToggleAutoplay,
        _ => return None,
    };
    Some(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(intent_for_key(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(intent_for_key(KeyCode::Down), Some(Intent::SoftDrop));
        assert_eq!(intent_for_key(KeyCode::Up), Some(Intent::HardDrop));
    }

    #[test]
    fn test_autoplay_toggle_ignores_case() {
        assert_eq!(
            intent_for_key(KeyCode::Char('A')),
            Some(Intent::ToggleAutoplay)
        );
        assert_eq!(
            intent_for_key(KeyCode::Char('a')),
            Some(Intent::ToggleAutoplay)
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(key_action(&press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            key_action(&press(KeyCode::Enter)),
            Some(KeyAction::AcknowledgeGameOver)
        );
        assert_eq!(
            key_action(&press(KeyCode::Char(' '))),
            Some(KeyAction::Intent(Intent::Rotate))
        );
        assert_eq!(key_action(&press(KeyCode::Char('c'))), None);
        assert_eq!(key_action(&press(KeyCode::Tab)), None);
    }
}
