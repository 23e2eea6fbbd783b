//! GPU rendering.
//!
//! Renderers consume a `scene::DrawList` and own their GPU resources.
//! CPU geometry is logical pixels (top-left origin, +Y down); the vertex
//! shader converts to NDC through a viewport uniform.

mod ctx;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
