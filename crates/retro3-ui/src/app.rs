use anyhow::Result;
use winit::dpi::LogicalSize;

use retro3_platform::coords::Vec2;
use retro3_platform::core::{App as PlatformApp, AppControl, FrameCtx};
use retro3_platform::device::GpuInit;
use retro3_platform::input::MouseButton;
use retro3_platform::paint::Color;
use retro3_platform::render::QuadRenderer;
use retro3_platform::window::{Runtime, RuntimeConfig};

use crate::scene::{UiInput, UiScene};
use crate::widget::Element;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level UI application builder.
///
/// Configure the window, then start the event loop with
/// [`run_widget`](Self::run_widget).
///
/// ```rust,ignore
/// Application::new()
///     .title("retro3")
///     .size(1280.0, 720.0)
///     .run_widget(|| Shell::new(config).into())?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    min_size: Option<(f64, f64)>,
    clear_color: Color,
}

impl Application {
    pub fn new() -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            title: defaults.title,
            width: defaults.initial_size.width,
            height: defaults.initial_size.height,
            min_size: defaults.min_size.map(|s| (s.width, s.height)),
            clear_color: Color::BLACK,
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_size = Some((width, height));
        self
    }

    /// Color the surface is cleared to before the widget tree is drawn.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: self.min_size.map(|(w, h)| LogicalSize::new(w, h)),
        }
    }

    /// Starts the event loop with a custom root widget.
    ///
    /// `build` is called once before the window opens; the returned
    /// [`Element`] persists across frames and is unmounted when the loop
    /// exits. Returns once the window is closed, or with the start-up error
    /// if the window or GPU could not be created.
    pub fn run_widget<F>(self, build: F) -> Result<()>
    where
        F: FnOnce() -> Element,
    {
        let config = self.runtime_config();
        let state = UiAppState {
            ui_scene: UiScene::new(),
            quad_renderer: QuadRenderer::new(),
            clear_color: self.clear_color,
            root: build(),
        };
        log::debug!("starting ui runtime: {:?}", config.title);
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Implements the platform `App`; user code never sees this type.
struct UiAppState {
    ui_scene: UiScene,
    quad_renderer: QuadRenderer,
    clear_color: Color,
    root: Element,
}

impl UiAppState {
    fn input(ctx: &FrameCtx<'_, '_>) -> UiInput {
        let (mx, my) = ctx.input.pointer_pos.unwrap_or((-1.0, -1.0));
        UiInput {
            dt: ctx.time.dt,
            mouse_pos: Vec2::new(mx, my),
            mouse_pressed: ctx.input.button_down(MouseButton::Left),
            mouse_clicked: ctx.input_frame.buttons_released.contains(&MouseButton::Left),
            keys_pressed: ctx.input_frame.keys_pressed.iter().copied().collect(),
            modifiers: ctx.input.modifiers,
        }
    }
}

impl PlatformApp for UiAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.logical_size();
        let scale = ctx.scale_factor();
        let input = Self::input(ctx);

        let draw_list = self.ui_scene.frame_ref(&mut self.root, Vec2::new(w, h), scale, &input);

        let renderer = &mut self.quad_renderer;
        ctx.render(self.clear_color, |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })
    }

    fn on_exit(&mut self) {
        self.root.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_maps_to_runtime_config() {
        let config = Application::new()
            .title("retro3 test")
            .size(800.0, 600.0)
            .min_size(100.0, 50.0)
            .runtime_config();
        assert_eq!(config.title, "retro3 test");
        assert_eq!(config.initial_size, LogicalSize::new(800.0, 600.0));
        assert_eq!(config.min_size, Some(LogicalSize::new(100.0, 50.0)));
    }

    #[test]
    fn defaults_follow_runtime_defaults() {
        let config = Application::default().runtime_config();
        let defaults = RuntimeConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.initial_size, defaults.initial_size);
    }
}
