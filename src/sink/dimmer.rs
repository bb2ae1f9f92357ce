use crate::foundation::color::Color;
use crate::foundation::error::LedResult;
use crate::foundation::math::mul_div255_u8;
use crate::sink::PixelSink;

/// Scales every staged color by a brightness percentage before it reaches `inner`.
///
/// For sinks without hardware brightness control. Alpha is passed through.
#[derive(Debug)]
pub struct Dimmer<S> {
    inner: S,
    level: u16,
}

impl<S: PixelSink> Dimmer<S> {
    /// Wrap `inner` at `percent` brightness, clamped to `0..=100`.
    pub fn new(inner: S, percent: u8) -> Self {
        let level = (u16::from(percent.min(100)) * 255 + 50) / 100;
        Self { inner, level }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn dim(&self, c: Color) -> Color {
        image::Rgba([
            mul_div255_u8(u16::from(c[0]), self.level),
            mul_div255_u8(u16::from(c[1]), self.level),
            mul_div255_u8(u16::from(c[2]), self.level),
            c[3],
        ])
    }
}

impl<S: PixelSink> PixelSink for Dimmer<S> {
    fn geometry(&self) -> (u32, u32) {
        self.inner.geometry()
    }

    fn at(&self, position: usize) -> Color {
        self.inner.at(position)
    }

    fn set(&mut self, position: usize, color: Color) {
        let c = self.dim(color);
        self.inner.set(position, c);
    }

    fn apply(&mut self, colors: &[Color]) -> LedResult<()> {
        let dimmed: Vec<Color> = colors.iter().map(|&c| self.dim(c)).collect();
        self.inner.apply(&dimmed)
    }

    fn render(&mut self) -> LedResult<()> {
        self.inner.render()
    }

    fn close(&mut self) -> LedResult<()> {
        self.inner.close()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/dimmer.rs"]
mod tests;
