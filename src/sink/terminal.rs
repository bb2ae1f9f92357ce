use std::io::{Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::foundation::color::{BLACK, Color};
use crate::foundation::error::{LedError, LedResult};
use crate::sink::PixelSink;

const UPPER_HALF_BLOCK: char = '\u{2580}';

/// Emulated display that draws the matrix in a true-color terminal.
///
/// Two matrix rows share one terminal row: the upper pixel is the foreground of a half block,
/// the lower pixel its background.
pub struct TerminalSink<W: Write + Send = Stdout> {
    width: u32,
    height: u32,
    leds: Vec<Color>,
    out: W,
    started: bool,
}

impl TerminalSink<Stdout> {
    /// Draw to the process' standard output.
    pub fn stdout(width: u32, height: u32) -> Self {
        Self::new(width, height, std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    /// Draw to an arbitrary writer.
    pub fn new(width: u32, height: u32, out: W) -> Self {
        Self {
            width,
            height,
            leds: vec![BLACK; (width as usize) * (height as usize)],
            out,
            started: false,
        }
    }

    /// Consume the sink and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        if y >= self.height {
            return BLACK;
        }
        self.leds[(y * self.width + x) as usize]
    }

    fn draw(&mut self, lines: u16) -> std::io::Result<()> {
        if !self.started {
            queue!(self.out, Hide, Clear(ClearType::All))?;
            self.started = true;
        }
        for line in 0..lines {
            queue!(self.out, MoveTo(0, line))?;
            let row = u32::from(line);
            for x in 0..self.width {
                let top = self.pixel(x, row * 2);
                let bottom = self.pixel(x, row * 2 + 1);
                queue!(
                    self.out,
                    SetForegroundColor(term_color(top)),
                    SetBackgroundColor(term_color(bottom)),
                    Print(UPPER_HALF_BLOCK)
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
    }
}

impl<W: Write + Send> PixelSink for TerminalSink<W> {
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

    fn render(&mut self) -> LedResult<()> {
        let lines = u16::try_from(self.height.div_ceil(2)).map_err(|_| {
            LedError::sink(format!(
                "{} rows do not fit in a terminal",
                self.height
            ))
        })?;
        self.draw(lines)
            .map_err(|e| LedError::sink(format!("terminal write failed: {e}")))
    }

    fn close(&mut self) -> LedResult<()> {
        queue!(self.out, ResetColor, Show, Print('\n'))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/terminal.rs"]
mod tests;
