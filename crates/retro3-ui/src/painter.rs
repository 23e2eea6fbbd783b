use retro3_platform::coords::{Rect, Vec2};
use retro3_platform::paint::Color;
use retro3_platform::scene::{DrawList, QuadCmd, ZIndex};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the platform `DrawList` and exposes per-frame pointer state so
/// widgets can express hover and pressed visuals directly while painting.
/// Every command is stacked above the previous one.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    z: i32,
    /// Physical pixels per logical pixel.
    pub scale: f32,
    /// Cursor position in logical pixels.
    pub mouse_pos: Vec2,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, scale: f32, mouse_pos: Vec2, mouse_pressed: bool) -> Self {
        Self { draw_list, z: 0, scale, mouse_pos, mouse_pressed }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    /// Primary button held with the cursor over `rect`.
    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && rect.contains(self.mouse_pos)
    }

    /// Layout context for re-measuring children while painting.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx {
        LayoutCtx { scale: self.scale }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_rect(z, rect, color);
    }

    /// Rectangle of `size` centered on `center`, rotated by `degrees`.
    pub fn fill_quad(&mut self, center: Vec2, size: Vec2, degrees: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_quad(z, QuadCmd::new(center, size, degrees, color));
    }

    /// Outline drawn inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rect_outline(z, rect, width, color);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
