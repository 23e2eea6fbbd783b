pub mod button;
pub mod container;
pub mod flex;
