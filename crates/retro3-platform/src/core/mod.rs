//! Contract between the runtime loop and higher layers.
//!
//! Keeps winit/wgpu plumbing out of user code and hands every frame a single
//! context value.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
