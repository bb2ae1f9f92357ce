pub mod canvas;
pub mod screen;
pub mod sequence;
pub mod transform;
