use macroquad::input::{KeyCode, get_keys_pressed};

use crate::game::Heading;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Steer(Heading),
    TogglePause,
    Start,
    Restart,
}

const KEY_BINDINGS: &[(KeyCode, Action)] = &[
    (KeyCode::Up, Action::Steer(Heading::Up)),
    (KeyCode::W, Action::Steer(Heading::Up)),
    (KeyCode::Down, Action::Steer(Heading::Down)),
    (KeyCode::S, Action::Steer(Heading::Down)),
    (KeyCode::Left, Action::Steer(Heading::Left)),
    (KeyCode::A, Action::Steer(Heading::Left)),
    (KeyCode::Right, Action::Steer(Heading::Right)),
    (KeyCode::D, Action::Steer(Heading::Right)),
    (KeyCode::Escape, Action::TogglePause),
    (KeyCode::Enter, Action::Start),
    (KeyCode::KpEnter, Action::Start),
];

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| *action)
}

/// Actions for the bound keys pressed this frame.
pub fn pressed_actions() -> Vec<Action> {
    get_keys_pressed().into_iter().filter_map(action_for_key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(action_for_key(KeyCode::Up), Some(Action::Steer(Heading::Up)));
        assert_eq!(action_for_key(KeyCode::A), Some(Action::Steer(Heading::Left)));
        assert_eq!(action_for_key(KeyCode::Right), Some(Action::Steer(Heading::Right)));
        assert_eq!(action_for_key(KeyCode::S), Some(Action::Steer(Heading::Down)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(action_for_key(KeyCode::Escape), Some(Action::TogglePause));
        assert_eq!(action_for_key(KeyCode::Enter), Some(Action::Start));
        assert_eq!(action_for_key(KeyCode::Q), None);
    }
}
