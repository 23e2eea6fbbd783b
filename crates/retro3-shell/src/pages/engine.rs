//! Page hosting the external RetroEngine.

use retro3_host::{
    Canvas, EngineAdapter, EngineState, HostContainer, ModuleConfig, ModuleFactory, ViewportSize,
    ViewportSizer,
};
use retro3_ui::prelude::*;

const INDICATOR_SIZE: f32 = 10.0;
const INDICATOR_INSET: f32 = 8.0;

fn indicator_color(state: EngineState) -> Color {
    match state {
        EngineState::Unloaded | EngineState::Disposed => Color::from_hex(0x5a5a66),
        EngineState::Loading => Color::from_hex(0xf0b030),
        EngineState::Ready => Color::from_hex(0x30d060),
        EngineState::InitFailed | EngineState::LoadFailed => Color::from_hex(0xe04040),
    }
}

/// Full-bleed canvas driven by an [`EngineAdapter`].
///
/// Mounts on construction; the adapter is polled on every frame tick.
pub struct EnginePage {
    container: HostContainer,
    canvas: Canvas,
    sizer: ViewportSizer,
    adapter: EngineAdapter,
}

impl EnginePage {
    /// `seed` is the last known page box, so the canvas has a size before
    /// the page is first laid out.
    pub fn new(
        factory: impl ModuleFactory + 'static,
        config: ModuleConfig,
        seed: Option<ViewportSize>,
    ) -> Self {
        let container = HostContainer::new();
        if let Some(size) = seed {
            container.set_box_size(size);
        }
        let canvas = Canvas::new();

        let mut sizer = ViewportSizer::new();
        sizer.attach(Some(&container), Some(&canvas));

        let mut adapter = EngineAdapter::new(factory, config);
        adapter.mount();

        Self { container, canvas, sizer, adapter }
    }

    pub fn state(&self) -> EngineState {
        self.adapter.state()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn container(&self) -> &HostContainer {
        &self.container
    }

    /// Disposes the engine, then stops following the container size.
    pub fn unmount(&mut self) {
        self.adapter.unmount();
        self.sizer.detach();
    }
}

impl Widget for EnginePage {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.biggest_or(Vec2::zero())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.container
            .set_box_size(ViewportSize::from_logical(rect.size.x, rect.size.y, painter.scale));

        let scale = painter.scale.max(f32::EPSILON);
        let canvas = Rect::from_origin_size(
            rect.origin,
            Vec2::new(self.canvas.width() as f32 / scale, self.canvas.height() as f32 / scale),
        );

        painter.push_clip(rect);
        painter.fill_rect(canvas, Color::BLACK);
        painter.fill_rect(
            Rect::new(
                rect.origin.x + INDICATOR_INSET,
                rect.origin.y + INDICATOR_INSET,
                INDICATOR_SIZE,
                INDICATOR_SIZE,
            ),
            indicator_color(self.adapter.state()),
        );
        painter.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Tick { .. } = event {
            self.adapter.poll();
        }
        EventResult::Ignored
    }

    fn unmount(&mut self) {
        EnginePage::unmount(self);
    }
}

impl Drop for EnginePage {
    fn drop(&mut self) {
        EnginePage::unmount(self);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::{anyhow, Result};
    use retro3_host::{Engine, EngineModule, PendingModule};
    use retro3_platform::scene::{DrawCmd, DrawList};

    use super::*;

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    struct FakeEngine {
        calls: Calls,
        init_ok: bool,
    }

    impl Engine for FakeEngine {
        fn initialize(&mut self) -> bool {
            self.calls.lock().unwrap().push("initialize");
            self.init_ok
        }

        fn deinitialize(&mut self) {
            self.calls.lock().unwrap().push("deinitialize");
        }

        fn delete(self: Box<Self>) {
            self.calls.lock().unwrap().push("delete");
        }
    }

    struct FakeModule {
        calls: Calls,
        init_ok: bool,
    }

    impl EngineModule for FakeModule {
        fn create_engine(&self) -> Result<Box<dyn Engine>> {
            Ok(Box::new(FakeEngine { calls: self.calls.clone(), init_ok: self.init_ok }))
        }
    }

    /// Resolves immediately.
    struct ReadyFactory {
        calls: Calls,
        init_ok: bool,
        fail: bool,
    }

    impl ModuleFactory for ReadyFactory {
        fn load(&self, _config: ModuleConfig) -> PendingModule {
            if self.fail {
                return PendingModule::ready(Err(anyhow!("no such library")));
            }
            PendingModule::ready(Ok(Box::new(FakeModule {
                calls: self.calls.clone(),
                init_ok: self.init_ok,
            })))
        }
    }

    fn page(init_ok: bool, fail: bool, seed: Option<ViewportSize>) -> (EnginePage, Calls) {
        let calls: Calls = Arc::default();
        let factory = ReadyFactory { calls: calls.clone(), init_ok, fail };
        (EnginePage::new(factory, ModuleConfig::new(), seed), calls)
    }

    fn tick(page: &mut EnginePage) {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        page.on_event(&UiEvent::Tick { dt: 1.0 / 60.0 }, rect, &LayoutCtx::default());
    }

    #[test]
    fn construction_mounts_and_tick_initializes() {
        let (mut page, calls) = page(true, false, None);
        assert_eq!(page.state(), EngineState::Loading);

        tick(&mut page);
        assert_eq!(page.state(), EngineState::Ready);
        assert_eq!(calls.lock().unwrap().as_slice(), &["initialize"]);
    }

    #[test]
    fn unmount_disposes_in_order_once() {
        let (mut page, calls) = page(true, false, None);
        tick(&mut page);
        page.unmount();
        page.unmount();
        drop(page);
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            &["initialize", "deinitialize", "delete"]
        );
    }

    #[test]
    fn unmount_detaches_sizer() {
        let (mut page, _calls) = page(true, false, None);
        assert_eq!(page.container().observer_count(), 1);
        page.unmount();
        assert_eq!(page.container().observer_count(), 0);
    }

    #[test]
    fn unmount_before_first_tick_never_constructs() {
        let (page, calls) = page(true, false, None);
        drop(page);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn failures_are_visible_in_state() {
        let (mut p, _) = page(false, false, None);
        tick(&mut p);
        assert_eq!(p.state(), EngineState::InitFailed);

        let (mut p, _) = page(true, true, None);
        tick(&mut p);
        assert_eq!(p.state(), EngineState::LoadFailed);
    }

    #[test]
    fn seed_sizes_canvas_before_first_paint() {
        let (page, _) = page(true, false, Some(ViewportSize::new(640, 480)));
        assert_eq!(page.canvas().size(), ViewportSize::new(640, 480));
    }

    #[test]
    fn paint_reports_physical_box_and_fills_canvas() {
        let (page, _) = page(true, false, None);
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, 2.0, Vec2::zero(), false);
            page.paint(&mut p, Rect::new(0.0, 48.0, 300.0, 200.0));
        }
        assert_eq!(page.canvas().size(), ViewportSize::new(600, 400));

        let DrawCmd::Quad(bg) = &list.items()[0].cmd;
        assert_eq!(bg.size, Vec2::new(300.0, 200.0));
        assert_eq!(bg.color, Color::BLACK);
        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(0.0, 48.0, 300.0, 200.0)));
    }
}
