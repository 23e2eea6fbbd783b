use winit::event::{ElementState, MouseButton as WinitButton, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Converts a window event; `None` for events input does not track.
///
/// `scale` is the window scale factor, used to report logical pixels.
pub(crate) fn translate(event: &WindowEvent, scale: f64, modifiers: Modifiers) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(modifiers_from(m.state())),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::CursorMoved { position, .. } => {
            let p = position.to_logical::<f64>(scale);
            InputEvent::PointerMoved { x: p.x as f32, y: p.y as f32 }
        }
        WindowEvent::MouseInput { state, button, .. } => InputEvent::PointerButton {
            button: button_from(*button),
            state: match state {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            },
        },
        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: key_from(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            modifiers,
        },
        _ => return None,
    };
    Some(ev)
}

fn modifiers_from(m: ModifiersState) -> Modifiers {
    Modifiers { shift: m.shift_key(), ctrl: m.control_key(), alt: m.alt_key(), meta: m.super_key() }
}

fn button_from(b: WinitButton) -> MouseButton {
    match b {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(v) => MouseButton::Other(v),
    }
}

fn key_from(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Enter,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_outside_the_ui_set_keep_their_code() {
        assert_eq!(key_from(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(key_from(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert_eq!(
            key_from(PhysicalKey::Code(KeyCode::KeyA)),
            Key::Unknown(KeyCode::KeyA as u32)
        );
    }

    #[test]
    fn extra_buttons_map_to_other() {
        assert_eq!(button_from(WinitButton::Back), MouseButton::Other(3));
        assert_eq!(button_from(WinitButton::Other(9)), MouseButton::Other(9));
    }
}
