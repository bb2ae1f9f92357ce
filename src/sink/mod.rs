use crate::foundation::color::Color;
use crate::foundation::error::LedResult;

mod dimmer;
mod memory;
mod terminal;

pub use dimmer::Dimmer;
pub use memory::{FrameLog, MemorySink, RecordedFrame};
pub use terminal::TerminalSink;

/// Capability that turns a pixel buffer into visible output.
///
/// Positions are row-major: `position = x + y * width`. Implementations are driven by exactly one
/// [`Canvas`](crate::Canvas) and need no internal synchronization.
pub trait PixelSink: Send {
    /// Display size in pixels as `(width, height)`.
    fn geometry(&self) -> (u32, u32);
    /// Color currently staged at `position`.
    fn at(&self, position: usize) -> Color;
    /// Stage a single pixel.
    fn set(&mut self, position: usize, color: Color);
    /// Stage every pixel from `colors` (row-major) and present the result.
    fn apply(&mut self, colors: &[Color]) -> LedResult<()> {
        for (position, &color) in colors.iter().enumerate() {
            self.set(position, color);
        }
        self.render()
    }
    /// Present the staged pixels.
    fn render(&mut self) -> LedResult<()>;
    /// Release the display. No further calls are made afterwards.
    fn close(&mut self) -> LedResult<()>;
}

impl<S: PixelSink + ?Sized> PixelSink for Box<S> {
    fn geometry(&self) -> (u32, u32) {
        (**self).geometry()
    }

    fn at(&self, position: usize) -> Color {
        (**self).at(position)
    }

    fn set(&mut self, position: usize, color: Color) {
        (**self).set(position, color)
    }

    fn apply(&mut self, colors: &[Color]) -> LedResult<()> {
        (**self).apply(colors)
    }

    fn render(&mut self) -> LedResult<()> {
        (**self).render()
    }

    fn close(&mut self) -> LedResult<()> {
        (**self).close()
    }
}
