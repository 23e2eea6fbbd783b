mod quad;

pub use quad::QuadCmd;
