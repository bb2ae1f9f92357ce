use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use crate::foundation::color::{BLACK, Color};
use crate::foundation::error::{LedError, LedResult};
use crate::sink::PixelSink;

/// One presented frame captured by a [`MemorySink`].
#[derive(Clone, Debug)]
pub struct RecordedFrame {
    /// Row-major pixels as presented.
    pub pixels: Vec<Color>,
    /// Time of presentation on the tokio clock (honours paused test time).
    pub at: Instant,
}

#[derive(Debug, Default)]
struct LogState {
    frames: VecDeque<RecordedFrame>,
    presented: usize,
    closed: bool,
}

/// Shared, cloneable view of everything a [`MemorySink`] presented.
#[derive(Clone, Debug, Default)]
pub struct FrameLog {
    width: u32,
    height: u32,
    state: Arc<Mutex<LogState>>,
}

impl FrameLog {
    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of frames currently retained.
    pub fn len(&self) -> usize {
        self.lock().frames.len()
    }

    /// Return `true` when no frame is retained.
    pub fn is_empty(&self) -> bool {
        self.lock().frames.is_empty()
    }

    /// Number of frames presented so far, including any no longer retained.
    pub fn presented(&self) -> usize {
        self.lock().presented
    }

    /// Copy of every retained frame, oldest first.
    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.lock().frames.iter().cloned().collect()
    }

    /// Copy of the most recent frame.
    pub fn last(&self) -> Option<RecordedFrame> {
        self.lock().frames.back().cloned()
    }

    /// Pixel `(x, y)` of the most recent frame.
    pub fn last_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) as usize;
        self.lock().frames.back().map(|f| f.pixels[idx])
    }

    /// Presentation time of the most recent frame.
    pub fn last_at(&self) -> Option<Instant> {
        self.lock().frames.back().map(|f| f.at)
    }

    /// Whether the owning sink has been closed.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Emulated display that keeps presented frames in memory.
///
/// Used by tests and for headless runs; the paired [`FrameLog`] stays readable after the sink
/// has been moved into the engine. [`MemorySink::new`] keeps every frame,
/// [`MemorySink::bounded`] only the most recent ones.
#[derive(Debug)]
pub struct MemorySink {
    width: u32,
    height: u32,
    leds: Vec<Color>,
    keep: Option<usize>,
    log: FrameLog,
}

impl MemorySink {
    /// Create a `width`×`height` sink and the log that observes it. Every frame is kept.
    pub fn new(width: u32, height: u32) -> (Self, FrameLog) {
        Self::build(width, height, None)
    }

    /// Like [`new`](Self::new) but the log only retains the last `keep` frames (at least one).
    pub fn bounded(width: u32, height: u32, keep: usize) -> (Self, FrameLog) {
        Self::build(width, height, Some(keep.max(1)))
    }

    fn build(width: u32, height: u32, keep: Option<usize>) -> (Self, FrameLog) {
        let log = FrameLog {
            width,
            height,
            state: Arc::default(),
        };
        let sink = Self {
            width,
            height,
            leds: vec![BLACK; (width as usize) * (height as usize)],
            keep,
            log: log.clone(),
        };
        (sink, log)
    }
}

impl PixelSink for MemorySink {
    fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn at(&self, position: usize) -> Color {
        self.leds.get(position).copied().unwrap_or(BLACK)
    }

    fn set(&mut self, position: usize, color: Color) {
        if let Some(px) = self.leds.get_mut(position) {
            *px = color;
        }
    }

    fn apply(&mut self, colors: &[Color]) -> LedResult<()> {
        if colors.len() != self.leds.len() {
            return Err(LedError::sink(format!(
                "apply expects {} pixels, got {}",
                self.leds.len(),
                colors.len()
            )));
        }
        self.leds.copy_from_slice(colors);
        self.render()
    }

    fn render(&mut self) -> LedResult<()> {
        let mut state = self.log.lock();
        if state.closed {
            return Err(LedError::sink("render after close"));
        }
        if let Some(keep) = self.keep {
            while state.frames.len() >= keep {
                state.frames.pop_front();
            }
        }
        state.frames.push_back(RecordedFrame {
            pixels: self.leds.clone(),
            at: Instant::now(),
        });
        state.presented += 1;
        Ok(())
    }

    fn close(&mut self) -> LedResult<()> {
        self.log.lock().closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/memory.rs"]
mod tests;
