use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// What is held down right now, plus the pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev`, recording new presses and releases in `frame`.
    ///
    /// Key repeats do not count as new presses.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = m,

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases that happen elsewhere never reach us.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers } => {
                self.modifiers = modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(key) {
                            frame.keys_pressed.insert(key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(&key);
                    }
                }
            }

            InputEvent::PointerButton { button, state } => match state {
                MouseButtonState::Pressed => {
                    self.buttons_down.insert(button);
                }
                MouseButtonState::Released => {
                    if self.buttons_down.remove(&button) {
                        frame.buttons_released.insert(button);
                    }
                }
            },
        }
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state }
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default() }
    }

    #[test]
    fn release_is_reported_only_after_a_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, left(MouseButtonState::Released));
        assert!(frame.buttons_released.is_empty());

        state.apply_event(&mut frame, left(MouseButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));

        state.apply_event(&mut frame, left(MouseButtonState::Released));
        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
    }

    #[test]
    fn repeats_are_not_new_presses() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        assert!(frame.keys_pressed.is_empty());

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Released));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        assert!(frame.keys_pressed.contains(&Key::Escape));
    }

    #[test]
    fn focus_loss_clears_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, left(MouseButtonState::Pressed));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Left));

        // A held key counts as a fresh press after refocus.
        frame.clear();
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        assert!(frame.keys_pressed.contains(&Key::Escape));

        // No phantom click once focus returns.
        state.apply_event(&mut frame, InputEvent::Focused(true));
        frame.clear();
        state.apply_event(&mut frame, left(MouseButtonState::Released));
        assert!(frame.buttons_released.is_empty());
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}
