use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Solid quad, optionally rotated around its center.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCmd {
    pub center: Vec2,
    pub size: Vec2,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
    pub color: Color,
}

impl QuadCmd {
    #[inline]
    pub fn new(center: Vec2, size: Vec2, rotation: f32, color: Color) -> Self {
        Self { center, size, rotation, color }
    }

    /// Axis-aligned quad covering `rect`.
    #[inline]
    pub fn from_rect(rect: Rect, color: Color) -> Self {
        let r = rect.normalized();
        Self::new(r.center(), r.size, 0.0, color)
    }

    /// Corners in screen space (top-left, top-right, bottom-right, bottom-left before rotation).
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.size * 0.5;
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
        .map(|c| self.center + c.rotated(self.rotation))
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.size.x > 0.0
            && self.size.y > 0.0
            && self.color.a > 0.0
            && self.color.is_finite()
            && self.center.is_finite()
            && self.rotation.is_finite()
    }
}

impl DrawList {
    /// Records a (possibly rotated) solid quad.
    #[inline]
    pub fn push_quad(&mut self, z: ZIndex, quad: QuadCmd) {
        self.push(z, DrawCmd::Quad(quad));
    }

    /// Records an axis-aligned solid rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_quad(z, QuadCmd::from_rect(rect, color));
    }

    /// Records a rectangle outline of `width` drawn inside `rect`.
    pub fn push_rect_outline(&mut self, z: ZIndex, rect: Rect, width: f32, color: Color) {
        let r = rect.normalized();
        let w = width.min(r.size.x * 0.5).min(r.size.y * 0.5).max(0.0);
        if w <= 0.0 {
            return;
        }
        let (x, y) = (r.origin.x, r.origin.y);
        let (rw, rh) = (r.size.x, r.size.y);

        self.push_solid_rect(z, Rect::new(x, y, rw, w), color);
        self.push_solid_rect(z, Rect::new(x, y + rh - w, rw, w), color);
        self.push_solid_rect(z, Rect::new(x, y + w, w, rh - 2.0 * w), color);
        self.push_solid_rect(z, Rect::new(x + rw - w, y + w, w, rh - 2.0 * w), color);
    }
}
