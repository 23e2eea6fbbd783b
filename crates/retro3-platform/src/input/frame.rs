use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// Transitions since the previous frame.
///
/// [`InputState`](super::InputState) holds what is down right now.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_pressed: HashSet<Key>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.buttons_released.clear();
    }
}
