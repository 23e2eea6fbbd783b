use retro3_platform::coords::{Rect, Vec2};
use retro3_platform::paint::Color;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A clickable widget that wraps any child content.
///
/// Hover and press visuals are read from `Painter` during `paint`, so no
/// retained visual state is needed.
///
/// ```rust,ignore
/// Button::new(Container::new().min_size(24.0, 24.0))
///     .background(Color::from_hex(0x2a2a33))
///     .hover_background(Color::from_hex(0x3a3a46))
///     .padding_all(6.0)
///     .on_click(|| log::info!("clicked"))
/// ```
pub struct Button {
    child: Element,
    on_click: Option<Box<dyn FnMut()>>,

    background: Color,
    hover_background: Color,
    press_background: Color,
    border: Option<(f32, Color)>,
    padding: Edges,
    min_width: f32,
    min_height: f32,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_click: None,
            background: Color::TRANSPARENT,
            hover_background: Color::TRANSPARENT,
            press_background: Color::TRANSPARENT,
            border: None,
            padding: Edges::default(),
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Background while the cursor is over the button.
    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    /// Background while the primary button is held over it.
    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = color;
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Some((width, color));
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

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);
        let child_size = self.child.measure(inner, ctx);
        let w = (child_size.x + self.padding.h()).max(self.min_width);
        let h = (child_size.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if painter.is_pressed(rect) {
            self.press_background
        } else if painter.is_hovered(rect) {
            self.hover_background
        } else {
            self.background
        };

        if bg.a > 0.0 {
            painter.fill_rect(rect, bg);
        }
        if let Some((width, color)) = self.border {
            painter.stroke_rect(rect, width, color);
        }
        self.child.paint(painter, inset_rect(rect, self.padding));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                if let Some(f) = &mut self.on_click {
                    f();
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }

    fn unmount(&mut self) {
        self.child.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::widgets::container::Container;
    use retro3_platform::scene::{DrawCmd, DrawList};

    fn counter_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let button = Button::new(Container::new().min_size(20.0, 10.0))
            .padding_all(5.0)
            .background(Color::BLACK)
            .hover_background(Color::WHITE)
            .on_click(move || c.set(c.get() + 1));
        (button, clicks)
    }

    #[test]
    fn measure_adds_padding_to_child() {
        let (button, _) = counter_button();
        let size = button.measure(Constraints::loose(Vec2::splat(500.0)), &LayoutCtx::default());
        assert_eq!(size, Vec2::new(30.0, 20.0));
    }

    #[test]
    fn click_inside_fires_and_consumes() {
        let (mut button, clicks) = counter_button();
        let rect = Rect::new(0.0, 0.0, 30.0, 20.0);
        let ctx = LayoutCtx::default();

        let r = button.on_event(&UiEvent::Click { pos: Vec2::new(10.0, 10.0) }, rect, &ctx);
        assert!(r.is_consumed());
        assert_eq!(clicks.get(), 1);

        let r = button.on_event(&UiEvent::Click { pos: Vec2::new(100.0, 10.0) }, rect, &ctx);
        assert!(!r.is_consumed());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn hover_changes_background() {
        let (button, _) = counter_button();
        let rect = Rect::new(0.0, 0.0, 30.0, 20.0);

        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, 1.0, Vec2::new(5.0, 5.0), false);
            button.paint(&mut p, rect);
        }
        let DrawCmd::Quad(q) = &list.items()[0].cmd;
        assert_eq!(q.color, Color::WHITE);

        list.clear();
        {
            let mut p = Painter::new(&mut list, 1.0, Vec2::new(500.0, 5.0), false);
            button.paint(&mut p, rect);
        }
        let DrawCmd::Quad(q) = &list.items()[0].cmd;
        assert_eq!(q.color, Color::BLACK);
    }
}
