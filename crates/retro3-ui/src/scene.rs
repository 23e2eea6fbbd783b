use retro3_platform::coords::{Rect, Vec2};
use retro3_platform::input::{Key, Modifiers};
use retro3_platform::scene::DrawList;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of input state for one UI frame.
///
/// Built from the platform `InputState` / `InputFrame` each frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Cursor position in logical pixels.
    pub mouse_pos: Vec2,
    /// `true` while the primary button is held down.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_clicked: bool,
    /// Keys pressed this frame.
    pub keys_pressed: Vec<Key>,
    pub modifiers: Modifiers,
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Owns the draw list that each frame is recorded into.
///
/// A frame is: `Tick`, measure, paint, then pointer and key events. Ticking
/// first lets time-driven widgets paint their state for the current frame;
/// routing events after paint means clicks act on what the user saw.
///
/// ```rust,ignore
/// let mut ui = UiScene::new();
///
/// // In your on_frame callback:
/// let draw_list = ui.frame_ref(&mut root, viewport, scale, &input);
/// quad_renderer.render(rctx, target, draw_list);
/// ```
#[derive(Debug, Default)]
pub struct UiScene {
    /// Draw list populated by the most recent [`frame_ref`](Self::frame_ref).
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame over a root widget that persists across frames.
    ///
    /// `viewport` is in logical pixels; `scale` is physical per logical.
    pub fn frame_ref(
        &mut self,
        root: &mut Element,
        viewport: Vec2,
        scale: f32,
        input: &UiInput,
    ) -> &mut DrawList {
        self.draw_list.clear();

        let ctx = LayoutCtx { scale };
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        // ── tick ──────────────────────────────────────────────────────────
        root.on_event(&UiEvent::Tick { dt: input.dt }, rect, &ctx);

        // ── measure ───────────────────────────────────────────────────────
        // The root always fills the viewport; this only warms child sizes.
        let _ = root.measure(Constraints::loose(viewport), &ctx);

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter =
                Painter::new(&mut self.draw_list, scale, input.mouse_pos, input.mouse_pressed);
            root.paint(&mut painter, rect);
        }

        // ── events ────────────────────────────────────────────────────────
        root.on_event(&UiEvent::Hover { pos: input.mouse_pos }, rect, &ctx);
        if input.mouse_clicked {
            root.on_event(&UiEvent::Click { pos: input.mouse_pos }, rect, &ctx);
        }
        for key in &input.keys_pressed {
            root.on_event(&UiEvent::KeyPress { key: *key, modifiers: input.modifiers }, rect, &ctx);
        }

        &mut self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::event::EventResult;
    use crate::widget::Widget;
    use retro3_platform::paint::Color;

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Widget for Recorder {
        fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            self.log.borrow_mut().push("measure".into());
            constraints.max
        }

        fn paint(&self, painter: &mut Painter, rect: Rect) {
            self.log.borrow_mut().push(format!("paint {}x{}", rect.size.x, rect.size.y));
            painter.fill_rect(rect, Color::WHITE);
        }

        fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
            let name = match event {
                UiEvent::Tick { .. } => "tick",
                UiEvent::Hover { .. } => "hover",
                UiEvent::Click { .. } => "click",
                UiEvent::KeyPress { .. } => "key",
            };
            self.log.borrow_mut().push(name.into());
            EventResult::Ignored
        }
    }

    fn recorder() -> (Element, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Recorder { log: log.clone() }.into(), log)
    }

    #[test]
    fn frame_order_is_tick_measure_paint_events() {
        let (mut root, log) = recorder();
        let mut scene = UiScene::new();
        let input = UiInput { mouse_clicked: true, keys_pressed: vec![Key::Enter], ..Default::default() };

        let list = scene.frame_ref(&mut root, Vec2::new(200.0, 100.0), 1.0, &input);
        assert_eq!(list.len(), 1);

        assert_eq!(
            log.borrow().as_slice(),
            &["tick", "measure", "paint 200x100", "hover", "click", "key"]
        );
    }

    #[test]
    fn click_only_when_released_this_frame() {
        let (mut root, log) = recorder();
        let mut scene = UiScene::new();
        let _ = scene.frame_ref(&mut root, Vec2::new(10.0, 10.0), 1.0, &UiInput::default());
        assert!(!log.borrow().iter().any(|e| e == "click"));
    }

    #[test]
    fn draw_list_is_cleared_between_frames() {
        let (mut root, _log) = recorder();
        let mut scene = UiScene::new();
        let _ = scene.frame_ref(&mut root, Vec2::new(10.0, 10.0), 1.0, &UiInput::default());
        let list = scene.frame_ref(&mut root, Vec2::new(10.0, 10.0), 1.0, &UiInput::default());
        assert_eq!(list.len(), 1);
    }
}
