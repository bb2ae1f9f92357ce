//! Bitmap text: BDF parsing and a cursor-based line writer.

pub mod bdf;
pub mod writer;
