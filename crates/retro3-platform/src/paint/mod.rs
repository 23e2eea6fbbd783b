//! Paint model shared between UI and renderers.
//!
//! Colors are linear premultiplied RGBA. Geometry stays in `coords`.

pub mod color;

pub use color::Color;
