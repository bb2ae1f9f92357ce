use std::path::PathBuf;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::assets::load_gif;
use crate::display::screen::Screen;
use crate::display::sequence::{FrameSequence, Playback};
use crate::engine::session::Completion;
use crate::foundation::error::LedResult;
use crate::renderers::Renderer;

enum Source {
    Gif(PathBuf),
    Frames(FrameSequence),
}

/// Plays an animated GIF (or prepared frames), once or looping.
pub struct SequenceRenderer {
    source: Source,
    looping: bool,
}

impl SequenceRenderer {
    /// Loop the GIF at `path` until cancelled.
    pub fn looping(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Gif(path.into()),
            looping: true,
        }
    }

    /// Play the GIF at `path` once.
    pub fn once(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Gif(path.into()),
            looping: false,
        }
    }

    /// Play already decoded frames; the sequence's own loop flag applies.
    pub fn from_frames(frames: FrameSequence) -> Self {
        let looping = frames.looping;
        Self {
            source: Source::Frames(frames),
            looping,
        }
    }
}

#[async_trait]
impl Renderer for SequenceRenderer {
    async fn render(
        &mut self,
        screen: &mut Screen,
        scope: &CancellationToken,
        on_complete: Option<Completion>,
    ) -> LedResult<()> {
        let loaded;
        let frames = match &self.source {
            Source::Gif(path) => {
                loaded = load_gif(path, self.looping)?;
                &loaded
            }
            Source::Frames(frames) => frames,
        };

        match screen.play_sequence(frames, scope).await? {
            Playback::Completed => {
                tracing::debug!(frames = frames.len(), "sequence completed");
                if let Some(done) = on_complete {
                    done.fire();
                }
            }
            Playback::Cancelled => {}
        }
        Ok(())
    }
}
