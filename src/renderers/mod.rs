//! Everything that can own the screen for a session, plus the default catalog.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::display::screen::Screen;
use crate::engine::session::Completion;
use crate::foundation::error::LedResult;

pub mod animation;
pub mod catalog;
pub mod clock;
pub mod sequence;
pub mod still;

pub use catalog::default_registry;

/// Long-running producer of frames for one session.
///
/// The session lends the screen for the whole call. Implementations must observe `scope`
/// within one frame interval and return promptly once it is cancelled. `on_complete` is only
/// supplied for temporary commands and should be fired when, and only when, the content ran
/// to its natural end.
#[async_trait]
pub trait Renderer: Send {
    async fn render(
        &mut self,
        screen: &mut Screen,
        scope: &CancellationToken,
        on_complete: Option<Completion>,
    ) -> LedResult<()>;
}
