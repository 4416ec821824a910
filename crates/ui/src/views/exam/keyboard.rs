use dioxus::prelude::Key;

use crate::vm::QuizIntent;

/// Map a key press on the exam page to an intent.
///
/// Arrows move between questions, `1`-`4` pick an option and `p` toggles the
/// pin on the current question.
#[must_use]
pub(crate) fn key_intent(key: &Key, current_index: usize) -> Option<QuizIntent> {
    match key {
        Key::ArrowRight => Some(QuizIntent::Next),
        Key::ArrowLeft => Some(QuizIntent::Previous),
        Key::Character(value) => match value.as_str() {
            "1" => Some(QuizIntent::Select(0)),
            "2" => Some(QuizIntent::Select(1)),
            "3" => Some(QuizIntent::Select(2)),
            "4" => Some(QuizIntent::Select(3)),
            "p" | "P" => Some(QuizIntent::TogglePin(current_index)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::key_intent;
    use crate::vm::QuizIntent;
    use dioxus::prelude::Key;

    #[test]
    fn arrows_navigate() {
        assert_eq!(key_intent(&Key::ArrowRight, 0), Some(QuizIntent::Next));
        assert_eq!(key_intent(&Key::ArrowLeft, 3), Some(QuizIntent::Previous));
    }

    #[test]
    fn digits_select_option_slots() {
        assert_eq!(
            key_intent(&Key::Character("1".into()), 0),
            Some(QuizIntent::Select(0))
        );
        assert_eq!(
            key_intent(&Key::Character("4".into()), 0),
            Some(QuizIntent::Select(3))
        );
        assert_eq!(key_intent(&Key::Character("5".into()), 0), None);
    }

    #[test]
    fn p_pins_current_question() {
        assert_eq!(
            key_intent(&Key::Character("p".into()), 7),
            Some(QuizIntent::TogglePin(7))
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_intent(&Key::Enter, 0), None);
        assert_eq!(key_intent(&Key::ArrowUp, 0), None);
    }
}
