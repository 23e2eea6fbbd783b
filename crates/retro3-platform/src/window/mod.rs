//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the application window and wires them to
//! the GPU layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
