use std::time::Duration;

use image::RgbaImage;
use tokio_util::sync::CancellationToken;

use crate::display::canvas::Canvas;
use crate::display::sequence::{FrameSequence, Playback};
use crate::display::transform::{FitCenter, Transform};
use crate::foundation::color::{Color, over};
use crate::foundation::error::LedResult;
use crate::sink::PixelSink;
use crate::text::bdf::BdfFont;

/// Compositor over a [`Canvas`].
///
/// Every image goes through the transform policy (fit-center by default) and is blended
/// source-over onto the full canvas before the canvas is flushed.
pub struct Screen {
    canvas: Canvas,
    transform: Box<dyn Transform>,
}

impl Screen {
    /// Bind a screen to `sink` with the fit-center policy.
    pub fn new(sink: impl PixelSink + 'static) -> Self {
        Self::from_canvas(Canvas::new(sink))
    }

    /// Wrap an existing canvas with the fit-center policy.
    pub fn from_canvas(canvas: Canvas) -> Self {
        let (w, h) = canvas.bounds();
        Self {
            canvas,
            transform: Box::new(FitCenter::new(w, h)),
        }
    }

    /// Replace the transform policy.
    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    /// Borrow the canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutably borrow the canvas for direct pixel work.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Screen size as `(width, height)`.
    pub fn bounds(&self) -> (u32, u32) {
        self.canvas.bounds()
    }

    /// Set every pixel to `color`, bypassing the transform. Not flushed.
    pub fn fill(&mut self, color: Color) {
        self.canvas.pixels_mut().fill(color);
    }

    fn composite(&mut self, img: &RgbaImage) {
        let img = self.transform.apply(img);
        let (cw, ch) = self.canvas.bounds();
        let w = cw.min(img.width());
        let h = ch.min(img.height());
        let stride = cw as usize;
        let pixels = self.canvas.pixels_mut();
        for y in 0..h {
            for x in 0..w {
                let idx = (y as usize) * stride + x as usize;
                pixels[idx] = over(pixels[idx], *img.get_pixel(x, y));
            }
        }
    }

    /// Composite `img` and flush.
    pub fn show_image(&mut self, img: &RgbaImage) -> LedResult<()> {
        self.composite(img);
        self.canvas.render()
    }

    /// Composite `img`, flush, then wait for `duration` or until `scope` is cancelled.
    pub async fn show_image_for(
        &mut self,
        img: &RgbaImage,
        duration: Duration,
        scope: &CancellationToken,
    ) -> LedResult<()> {
        self.show_image(img)?;
        tokio::select! {
            biased;
            _ = scope.cancelled() => {}
            _ = tokio::time::sleep(duration) => {}
        }
        Ok(())
    }

    /// Play `sequence` until it is exhausted or `scope` is cancelled. The canvas is cleared on
    /// exit either way.
    ///
    /// [`Playback::Completed`] is returned only when the last frame was shown for its full
    /// duration with the scope still live; a cancellation racing the last frame wins.
    pub async fn play_sequence(
        &mut self,
        sequence: &FrameSequence,
        scope: &CancellationToken,
    ) -> LedResult<Playback> {
        let outcome = self.run_sequence(sequence, scope).await;
        let cleared = self.canvas.clear();
        let outcome = outcome?;
        cleared?;
        Ok(outcome)
    }

    async fn run_sequence(
        &mut self,
        sequence: &FrameSequence,
        scope: &CancellationToken,
    ) -> LedResult<Playback> {
        if sequence.is_empty() {
            return Ok(Playback::Completed);
        }
        loop {
            for frame in &sequence.frames {
                if scope.is_cancelled() {
                    return Ok(Playback::Cancelled);
                }
                self.show_image_for(&frame.image, frame.duration, scope)
                    .await?;
            }
            if scope.is_cancelled() {
                return Ok(Playback::Cancelled);
            }
            if !sequence.looping {
                return Ok(Playback::Completed);
            }
        }
    }

    /// Draw `text` with `font` at `(x, y)`. Returns the cursor after the text. Not flushed.
    pub fn draw_text(&mut self, font: &BdfFont, text: &str, x: i64, y: i64, color: Color) -> i64 {
        font.draw(&mut self.canvas, text, x, y, color)
    }

    /// Flush the canvas.
    pub fn render(&mut self) -> LedResult<()> {
        self.canvas.render()
    }

    /// Clear the canvas to black and flush.
    pub fn clear(&mut self) -> LedResult<()> {
        self.canvas.clear()
    }

    /// Close the underlying sink.
    pub fn close(&mut self) -> LedResult<()> {
        self.canvas.close()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/screen.rs"]
mod tests;
