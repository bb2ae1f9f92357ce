use std::sync::Arc;

use crate::display::screen::Screen;
use crate::foundation::color::Color;
use crate::foundation::error::LedResult;
use crate::text::bdf::BdfFont;

/// Cursor-managed line writer for text dashboards.
///
/// The writer does not own the screen; each call borrows it for the duration of the draw.
#[derive(Clone, Debug)]
pub struct TextWriter {
    font: Arc<BdfFont>,
    x: i64,
    y: i64,
}

impl TextWriter {
    pub fn new(font: Arc<BdfFont>) -> Self {
        Self { font, x: 0, y: 0 }
    }

    pub fn font(&self) -> &BdfFont {
        &self.font
    }

    /// Current cursor as `(x, y)`.
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Draw `text` at the cursor and move the cursor past it.
    pub fn write(&mut self, screen: &mut Screen, text: &str, color: Color) {
        self.x = screen.draw_text(&self.font, text, self.x, self.y, color);
    }

    /// [`write`](Self::write) followed by [`new_line`](Self::new_line).
    pub fn write_ln(&mut self, screen: &mut Screen, text: &str, color: Color) {
        self.write(screen, text, color);
        self.new_line();
    }

    /// Carriage return plus one font height down.
    pub fn new_line(&mut self) {
        self.x = 0;
        self.y += i64::from(self.font.height());
    }

    pub fn set_position(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    /// Move the cursor down by `dy` pixels without touching x.
    pub fn skip(&mut self, dy: i64) {
        self.y += dy;
    }

    /// Home the cursor and flush the screen.
    pub fn flush(&mut self, screen: &mut Screen) -> LedResult<()> {
        self.set_position(0, 0);
        screen.render()
    }

    /// Home the cursor and clear the screen.
    pub fn clear(&mut self, screen: &mut Screen) -> LedResult<()> {
        self.set_position(0, 0);
        screen.clear()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/writer.rs"]
mod tests;
