use retro3_platform::coords::Vec2;
use retro3_platform::input::Key;

pub use retro3_platform::input::Modifiers;

/// Input events routed through the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Start of a frame; `dt` seconds since the previous one.
    ///
    /// Delivered to every widget before layout so time-driven widgets can
    /// advance before they are painted. Never consumed.
    Tick { dt: f32 },
    /// Primary mouse button released at `pos`.
    Click { pos: Vec2 },
    /// Cursor position this frame (fired every frame).
    Hover { pos: Vec2 },
    /// Key pressed this frame.
    KeyPress { key: Key, modifiers: Modifiers },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled; stop routing to siblings and parents.
    Consumed,
    /// Not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
