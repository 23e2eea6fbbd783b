//! Rotating green square, shown on the home route when no engine is hosted.

use retro3_host::{Canvas, HostContainer, ViewportSize, ViewportSizer};
use retro3_platform::time::FixedStep;
use retro3_ui::prelude::*;

const SQUARE_SIDE: f32 = 256.0;
const STEPS_PER_SECOND: f32 = 60.0;
const DEGREES_PER_STEP: f32 = 2.0;
const MAX_CATCH_UP_STEPS: u32 = 4;

pub struct AnimationPage {
    container: HostContainer,
    canvas: Canvas,
    sizer: ViewportSizer,
    stepper: FixedStep,
    /// Degrees, always in `[0, 360)`.
    angle: f32,
}

impl AnimationPage {
    pub fn new(seed: Option<ViewportSize>) -> Self {
        let container = HostContainer::new();
        if let Some(size) = seed {
            container.set_box_size(size);
        }
        let canvas = Canvas::new();

        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));

        Self {
            container,
            canvas,
            sizer,
            stepper: FixedStep::new(STEPS_PER_SECOND, MAX_CATCH_UP_STEPS),
            angle: 0.0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn step(&mut self) {
        self.angle += DEGREES_PER_STEP;
        if self.angle >= 360.0 {
            self.angle = 0.0;
        }
    }

    pub fn advance(&mut self, dt: f32) {
        for _ in 0..self.stepper.advance(dt) {
            self.step();
        }
    }
}

impl Widget for AnimationPage {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.biggest_or(Vec2::zero())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.container
            .set_box_size(ViewportSize::from_logical(rect.size.x, rect.size.y, painter.scale));

        // Drawing follows the canvas, not the layout rect.
        let scale = painter.scale.max(f32::EPSILON);
        let size = Vec2::new(self.canvas.width() as f32 / scale, self.canvas.height() as f32 / scale);
        let canvas = Rect::from_origin_size(rect.origin, size);

        painter.push_clip(rect);
        painter.fill_rect(canvas, Color::BLACK);
        painter.fill_quad(
            canvas.center(),
            Vec2::splat(SQUARE_SIDE),
            self.angle,
            Color::from_hex(0x00ff00),
        );
        painter.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Tick { dt } = event {
            self.advance(*dt);
        }
        EventResult::Ignored
    }

    fn unmount(&mut self) {
        self.sizer.detach();
    }
}
