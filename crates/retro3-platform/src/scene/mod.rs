//! Scene (draw stream) types.
//!
//! - renderer-agnostic draw commands
//! - deterministic ordering (z-index + insertion order)
//! - nested clip rects

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::QuadCmd;
pub use z_index::ZIndex;
