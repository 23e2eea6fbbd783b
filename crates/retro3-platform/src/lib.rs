//! retro3 platform crate.
//!
//! Owns the window loop, GPU device/surface, per-frame context, input and the
//! draw list + quad renderer used by the UI layer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
