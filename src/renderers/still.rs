use std::path::PathBuf;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::assets::load_png;
use crate::display::screen::Screen;
use crate::engine::session::Completion;
use crate::foundation::error::LedResult;
use crate::renderers::Renderer;

/// Shows one still and returns; the frame stays on the display.
#[derive(Clone, Debug)]
pub struct ImageRenderer {
    path: PathBuf,
}

impl ImageRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Renderer for ImageRenderer {
    async fn render(
        &mut self,
        screen: &mut Screen,
        _scope: &CancellationToken,
        _on_complete: Option<Completion>,
    ) -> LedResult<()> {
        let img = load_png(&self.path)?;
        screen.show_image(&img)
    }
}
