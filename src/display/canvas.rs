use crate::foundation::color::{BLACK, Color};
use crate::foundation::error::LedResult;
use crate::sink::PixelSink;

/// In-memory frame buffer bound to one [`PixelSink`].
///
/// Writes are buffered and only reach the sink on [`Canvas::render`], as a single `apply` call.
/// There is no locking: the engine guarantees a single writer by handing the owning
/// [`Screen`](crate::Screen) to one session at a time.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    sink: Box<dyn PixelSink>,
}

impl Canvas {
    /// Bind a canvas to `sink`, sized to the sink's geometry.
    pub fn new(sink: impl PixelSink + 'static) -> Self {
        let (width, height) = sink.geometry();
        Self {
            width,
            height,
            pixels: vec![BLACK; (width as usize) * (height as usize)],
            sink: Box::new(sink),
        }
    }

    /// Canvas size as `(width, height)`.
    pub fn bounds(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + x as usize)
    }

    /// Set pixel `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Read pixel `(x, y)`.
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Row-major view of the buffer.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Flush the buffer to the sink.
    pub fn render(&mut self) -> LedResult<()> {
        self.sink.apply(&self.pixels)
    }

    /// Reset every pixel to black and flush.
    pub fn clear(&mut self) -> LedResult<()> {
        self.pixels.fill(BLACK);
        self.render()
    }

    /// Close the underlying sink.
    pub fn close(&mut self) -> LedResult<()> {
        self.sink.close()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/canvas.rs"]
mod tests;
