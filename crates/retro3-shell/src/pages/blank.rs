use retro3_ui::prelude::*;

/// Empty full-bleed page.
pub struct BlankPage {
    background: Color,
}

impl BlankPage {
    pub fn new(background: Color) -> Self {
        Self { background }
    }
}

impl Widget for BlankPage {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.biggest_or(Vec2::zero())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_rect(rect, self.background);
    }
}
