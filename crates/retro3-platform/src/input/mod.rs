//! Input subsystem.
//!
//! The public types carry no winit types; `platform` converts winit window events
//! at the runtime boundary.

mod frame;
mod state;
mod types;
pub(crate) mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};
