//! retro3 UI: retained widget tree on top of `retro3-platform`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use retro3_ui::prelude::*;
//!
//! let mut scene = UiScene::new();
//! let mut root: Element = Column::new()
//!     .spacing(8.0)
//!     .child(Container::new().min_size(0.0, 48.0).background(Color::from_hex(0x202028)))
//!     .child(Button::new(Container::new().min_size(96.0, 32.0)).on_click(|| log::info!("clicked")))
//!     .into();
//!
//! // In your frame callback:
//! let draw_list = scene.frame_ref(&mut root, viewport, scale, &input);
//! // Pass draw_list to the quad renderer.
//! ```
//!
//! # Extending with custom widgets
//!
//! ```rust,ignore
//! use retro3_ui::prelude::*;
//!
//! pub struct Swatch { color: Color }
//!
//! impl Widget for Swatch {
//!     fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
//!         constraints.constrain(Vec2::new(24.0, 24.0))
//!     }
//!     fn paint(&self, painter: &mut Painter, rect: Rect) {
//!         painter.fill_rect(rect, self.color);
//!     }
//! }
//! ```

pub mod app;
pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button,
        container::Container,
        flex::{Align, Column, Row},
    };

    pub use retro3_platform::coords::{Rect, Vec2};
    pub use retro3_platform::paint::Color;
}
