use crate::scene::shapes::QuadCmd;

/// Renderer-agnostic draw command stream.
///
/// Adding a shape: new module under `scene::shapes`, a variant here, and a
/// matching renderer under `render`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
}
