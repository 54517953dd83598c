//! Event handling utilities

use crossterm::event::KeyCode;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Quiz navigation
    CursorUp,
    CursorDown,
    Confirm,

    // Flashcard navigation
    Flip,
    NextCard,
    PrevCard,
    JumpCard(usize),

    // Results / deck controls
    Restart,
    ToggleReview,

    Quit,
}

/// Key mapping while answering quiz questions or viewing results
pub fn quiz_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorUp),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('v') => Some(Action::ToggleReview),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping while reviewing flashcards
pub fn flashcard_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Flip),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextCard),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevCard),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            Some(Action::JumpCard(c as usize - '1' as usize))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_keys_map_vim_style() {
        assert_eq!(quiz_key_to_action(KeyCode::Char('j')), Some(Action::CursorDown));
        assert_eq!(quiz_key_to_action(KeyCode::Up), Some(Action::CursorUp));
        assert_eq!(quiz_key_to_action(KeyCode::Enter), Some(Action::Confirm));
        assert_eq!(quiz_key_to_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn digit_keys_jump_to_cards() {
        assert_eq!(flashcard_key_to_action(KeyCode::Char('1')), Some(Action::JumpCard(0)));
        assert_eq!(flashcard_key_to_action(KeyCode::Char('9')), Some(Action::JumpCard(8)));
        assert_eq!(flashcard_key_to_action(KeyCode::Char('0')), None);
    }

    #[test]
    fn both_screens_share_quit_keys() {
        assert_eq!(quiz_key_to_action(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(flashcard_key_to_action(KeyCode::Char('q')), Some(Action::Quit));
    }
}
