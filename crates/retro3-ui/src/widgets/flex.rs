use retro3_platform::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full cross-axis extent.
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, available: f32, child: f32) -> f32 {
        match self {
            Align::Stretch | Align::Start => 0.0,
            Align::Center => (available - child) * 0.5,
            Align::End => available - child,
        }
    }
}

fn is_spacer(size: Vec2) -> bool {
    size.x == 0.0 && size.y == 0.0
}

fn route_event(
    children: &mut [Element],
    rects: &[Rect],
    event: &UiEvent,
    ctx: &LayoutCtx,
) -> EventResult {
    // Tick reaches every child; other events stop at the first consumer.
    let broadcast = matches!(event, UiEvent::Tick { .. });
    for (child, rect) in children.iter_mut().zip(rects) {
        if child.on_event(event, *rect, ctx).is_consumed() && !broadcast {
            return EventResult::Consumed;
        }
    }
    EventResult::Ignored
}

// ── Column ────────────────────────────────────────────────────────────────

/// Vertical flex container. Children are stacked top to bottom.
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    fn child_constraints(&self, inner_w: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                // An unbounded width must not become a minimum of infinity.
                let min_x = if inner_w.is_finite() { inner_w } else { 0.0 };
                Constraints {
                    min: Vec2::new(min_x, 0.0),
                    max: Vec2::new(inner_w, f32::INFINITY),
                }
            }
            _ => Constraints::loose(Vec2::new(inner_w, f32::INFINITY)),
        }
    }

    fn child_rects(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.x);

        let mut y = inner.origin.y;
        self.children
            .iter()
            .map(|child| {
                let s = child.measure(child_c, ctx);
                let x = inner.origin.x + self.cross_align.offset(inner.size.x, s.x);
                let r = Rect::new(x, y, s.x, s.y);
                y += s.y + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = self.child_constraints(inner_w);

        let mut total_h = self.padding.v();
        let mut max_child_w: f32 = 0.0;

        for (i, child) in self.children.iter().enumerate() {
            let s = child.measure(child_c, ctx);
            total_h += s.y;
            if i + 1 < self.children.len() {
                total_h += self.spacing;
            }
            max_child_w = max_child_w.max(s.x);
        }

        let w = match self.cross_align {
            Align::Stretch if constraints.max.x.is_finite() => constraints.max.x,
            _ => max_child_w + self.padding.h(),
        };

        constraints.constrain(Vec2::new(w, total_h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.child_rects(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.child_rects(rect, ctx);
        route_event(&mut self.children, &rects, event, ctx)
    }

    fn unmount(&mut self) {
        self.children.iter_mut().for_each(Element::unmount);
    }
}

// ── Row ───────────────────────────────────────────────────────────────────

/// Horizontal flex container. Children are placed left to right.
///
/// Zero-sized children act as spacers and share the leftover width.
pub struct Row {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Row {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    fn child_constraints(&self, inner_h: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                let min_h = if inner_h.is_finite() { inner_h } else { 0.0 };
                Constraints {
                    min: Vec2::new(0.0, min_h),
                    max: Vec2::new(f32::INFINITY, inner_h),
                }
            }
            _ => Constraints::loose(Vec2::new(f32::INFINITY, inner_h)),
        }
    }

    fn spacing_total(&self) -> f32 {
        self.children.len().saturating_sub(1) as f32 * self.spacing
    }

    fn child_rects(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.y);

        let mut sizes: Vec<Vec2> = self.children.iter().map(|c| c.measure(child_c, ctx)).collect();

        let spacer_count = sizes.iter().filter(|s| is_spacer(**s)).count();
        if spacer_count > 0 {
            let fixed_w: f32 = sizes.iter().map(|s| s.x).sum();
            let remaining = (inner.size.x - fixed_w - self.spacing_total()).max(0.0);
            let spacer_w = remaining / spacer_count as f32;
            for s in sizes.iter_mut().filter(|s| is_spacer(**s)) {
                s.x = spacer_w;
            }
        }

        let mut x = inner.origin.x;
        sizes
            .into_iter()
            .map(|s| {
                let y = inner.origin.y + self.cross_align.offset(inner.size.y, s.y);
                let r = Rect::new(x, y, s.x, s.y);
                x += s.x + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Row {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_h = (constraints.max.y - self.padding.v()).max(0.0);
        let child_c = self.child_constraints(inner_h);

        let sizes: Vec<Vec2> = self.children.iter().map(|c| c.measure(child_c, ctx)).collect();
        let has_spacer = sizes.iter().any(|s| is_spacer(*s));

        let fixed_w: f32 = sizes.iter().map(|s| s.x).sum();
        let max_child_h = sizes.iter().map(|s| s.y).fold(0.0f32, f32::max);

        let total_w = if has_spacer && constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            fixed_w + self.spacing_total() + self.padding.h()
        };

        let h = match self.cross_align {
            Align::Stretch if constraints.max.y.is_finite() => constraints.max.y,
            _ => max_child_h + self.padding.v(),
        };

        constraints.constrain(Vec2::new(total_w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.child_rects(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.child_rects(rect, ctx);
        route_event(&mut self.children, &rects, event, ctx)
    }

    fn unmount(&mut self) {
        self.children.iter_mut().for_each(Element::unmount);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::widgets::button::Button;
    use crate::widgets::container::Container;

    fn boxed(w: f32, h: f32) -> Container {
        Container::new().min_size(w, h)
    }

    #[test]
    fn column_stacks_with_spacing() {
        let col = Column::new().spacing(4.0).cross_align(Align::Start).child(boxed(10.0, 20.0)).child(boxed(30.0, 5.0));
        let rects = col.child_rects(Rect::new(0.0, 0.0, 100.0, 100.0), &LayoutCtx::default());
        assert_eq!(rects, vec![Rect::new(0.0, 0.0, 10.0, 20.0), Rect::new(0.0, 24.0, 30.0, 5.0)]);

        let size = col.measure(Constraints::loose(Vec2::splat(100.0)), &LayoutCtx::default());
        assert_eq!(size, Vec2::new(30.0, 29.0));
    }

    #[test]
    fn column_stretch_fills_width() {
        let col = Column::new().padding_all(5.0).child(boxed(10.0, 10.0));
        let rects = col.child_rects(Rect::new(0.0, 0.0, 100.0, 100.0), &LayoutCtx::default());
        assert_eq!(rects[0], Rect::new(5.0, 5.0, 90.0, 10.0));
    }

    #[test]
    fn row_center_aligns_cross_axis() {
        let row = Row::new().cross_align(Align::Center).child(boxed(10.0, 10.0));
        let rects = row.child_rects(Rect::new(0.0, 0.0, 100.0, 50.0), &LayoutCtx::default());
        assert_eq!(rects[0], Rect::new(0.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn row_spacer_pushes_trailing_child_to_end() {
        let row = Row::new()
            .cross_align(Align::Start)
            .child(boxed(10.0, 10.0))
            .child(Container::new())
            .child(boxed(20.0, 10.0));
        let rects = row.child_rects(Rect::new(0.0, 0.0, 100.0, 10.0), &LayoutCtx::default());
        assert_eq!(rects[1].size.x, 70.0);
        assert_eq!(rects[2].origin.x, 80.0);
    }

    #[test]
    fn click_routes_to_child_under_cursor() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut row = Row::new()
            .cross_align(Align::Start)
            .child(boxed(10.0, 10.0))
            .child(Button::new(boxed(10.0, 10.0)).on_click(move || h.set(h.get() + 1)));
        let rect = Rect::new(0.0, 0.0, 100.0, 10.0);
        let ctx = LayoutCtx::default();

        assert!(!row.on_event(&UiEvent::Click { pos: Vec2::new(5.0, 5.0) }, rect, &ctx).is_consumed());
        assert!(row.on_event(&UiEvent::Click { pos: Vec2::new(15.0, 5.0) }, rect, &ctx).is_consumed());
        assert_eq!(hits.get(), 1);
    }
}
