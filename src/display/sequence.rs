use std::time::Duration;

use image::RgbaImage;

use crate::foundation::error::{LedError, LedResult};

/// Length of one GIF delay unit.
pub const CENTISECOND: Duration = Duration::from_millis(10);

/// One image of a [`FrameSequence`] and how long it stays on screen.
#[derive(Clone, Debug)]
pub struct SequenceFrame {
    /// Frame pixels, any size.
    pub image: RgbaImage,
    /// Display duration.
    pub duration: Duration,
}

/// Ordered, timed list of images plus a loop flag.
#[derive(Clone, Debug, Default)]
pub struct FrameSequence {
    /// Frames in playback order.
    pub frames: Vec<SequenceFrame>,
    /// Restart from the first frame after the last one.
    pub looping: bool,
}

/// How a [`Screen::play_sequence`](crate::Screen::play_sequence) call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// Every frame was shown for its full duration.
    Completed,
    /// The session scope was cancelled first.
    Cancelled,
}

impl FrameSequence {
    /// Build a sequence from explicit frames.
    pub fn new(frames: Vec<SequenceFrame>, looping: bool) -> Self {
        Self { frames, looping }
    }

    /// Show every image for the same `duration`.
    pub fn slideshow(images: Vec<RgbaImage>, duration: Duration, looping: bool) -> Self {
        let frames = images
            .into_iter()
            .map(|image| SequenceFrame { image, duration })
            .collect();
        Self { frames, looping }
    }

    /// Pair images with delays in 10 ms units. A zero delay is played as one unit.
    pub fn from_centiseconds(
        images: Vec<RgbaImage>,
        delays: &[u32],
        looping: bool,
    ) -> LedResult<Self> {
        if images.len() != delays.len() {
            return Err(LedError::content(format!(
                "sequence has {} images but {} delays",
                images.len(),
                delays.len()
            )));
        }
        let frames = images
            .into_iter()
            .zip(delays)
            .map(|(image, &cs)| SequenceFrame {
                image,
                duration: centiseconds(cs),
            })
            .collect();
        Ok(Self { frames, looping })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when there is nothing to play.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sum of all frame durations (one pass).
    pub fn total_duration(&self) -> Duration {
        self.frames.iter().map(|f| f.duration).sum()
    }
}

/// Duration of `cs` GIF delay units, with zero promoted to one unit.
pub fn centiseconds(cs: u32) -> Duration {
    CENTISECOND * cs.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/display/sequence.rs"]
mod tests;
