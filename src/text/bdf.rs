use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;

use crate::display::canvas::Canvas;
use crate::foundation::color::Color;
use crate::foundation::error::{LedError, LedResult};

/// Cursor advance for characters the font has no glyph for.
pub const FALLBACK_ADVANCE: i64 = 6;

/// One parsed BDF glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Character this glyph renders.
    pub codepoint: char,
    /// Bitmap width in pixels (`BBX` first field). Governs bit unpacking only.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Horizontal offset applied when plotting.
    pub x_offset: i64,
    /// Vertical offset from `BBX`. Parsed and kept, but not applied when plotting.
    pub y_offset: i64,
    /// Cursor advance (`DWIDTH`). Governs spacing.
    pub device_width: i64,
    rows: Vec<Vec<u8>>,
}

impl Glyph {
    /// Decoded bitmap rows, one byte vector per scan line.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Whether pixel `(col, row)` is lit. Bits are MSB-first within each byte.
    pub fn is_set(&self, col: u32, row: usize) -> bool {
        if col >= self.width {
            return false;
        }
        let byte = (col / 8) as usize;
        let bit = 7 - (col % 8);
        self.rows
            .get(row)
            .and_then(|r| r.get(byte))
            .is_some_and(|b| b & (1 << bit) != 0)
    }
}

/// Bitmap font parsed from the BDF subset LED dashboards need.
#[derive(Clone, Debug, Default)]
pub struct BdfFont {
    glyphs: HashMap<char, Glyph>,
    ascent: i64,
    max_width: u32,
    max_height: u32,
}

#[derive(Default)]
struct PendingGlyph {
    codepoint: Option<char>,
    width: u32,
    height: u32,
    x_offset: i64,
    y_offset: i64,
    device_width: i64,
    rows: Vec<Vec<u8>>,
}

impl BdfFont {
    /// Read and parse a BDF file.
    pub fn load(path: &Path) -> LedResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        Self::parse(&src).map_err(|e| LedError::font(format!("{}: {e}", path.display())))
    }

    /// Parse BDF source text.
    ///
    /// Recognised keys: `FONT_ASCENT`, `STARTCHAR`, `ENCODING`, `DWIDTH`, `BBX`, `BITMAP`,
    /// `ENDCHAR`. Everything else is ignored. Glyphs without a valid encoding are dropped.
    pub fn parse(src: &str) -> LedResult<Self> {
        let mut font = Self::default();
        let mut current: Option<PendingGlyph> = None;
        let mut in_bitmap = false;

        for (idx, line) in src.lines().enumerate() {
            let lineno = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(key) = fields.next() else {
                continue;
            };
            let args: Vec<&str> = fields.collect();

            match key {
                "FONT_ASCENT" => font.ascent = int_arg(&args, 0, lineno)?,
                "STARTCHAR" => {
                    current = Some(PendingGlyph::default());
                    in_bitmap = false;
                }
                "ENCODING" => {
                    let g = glyph_mut(&mut current, key, lineno)?;
                    let code: i64 = int_arg(&args, 0, lineno)?;
                    g.codepoint = u32::try_from(code).ok().and_then(char::from_u32);
                }
                "DWIDTH" => {
                    let g = glyph_mut(&mut current, key, lineno)?;
                    g.device_width = int_arg(&args, 0, lineno)?;
                }
                "BBX" => {
                    let g = glyph_mut(&mut current, key, lineno)?;
                    g.width = int_arg(&args, 0, lineno)?;
                    g.height = int_arg(&args, 1, lineno)?;
                    g.x_offset = int_arg(&args, 2, lineno)?;
                    g.y_offset = int_arg(&args, 3, lineno)?;
                }
                "BITMAP" => {
                    glyph_mut(&mut current, key, lineno)?;
                    in_bitmap = true;
                }
                "ENDCHAR" => {
                    let Some(g) = current.take() else {
                        return Err(LedError::font(format!(
                            "line {lineno}: ENDCHAR outside of a glyph"
                        )));
                    };
                    in_bitmap = false;
                    font.insert(g);
                }
                _ if in_bitmap => {
                    if let Some(g) = current.as_mut() {
                        g.rows.push(decode_hex_row(key, lineno)?);
                    }
                }
                _ => {}
            }
        }

        Ok(font)
    }

    fn insert(&mut self, g: PendingGlyph) {
        let Some(codepoint) = g.codepoint else {
            return;
        };
        self.max_width = self.max_width.max(g.width);
        self.max_height = self.max_height.max(g.height);
        self.glyphs.insert(
            codepoint,
            Glyph {
                codepoint,
                width: g.width,
                height: g.height,
                x_offset: g.x_offset,
                y_offset: g.y_offset,
                device_width: g.device_width,
                rows: g.rows,
            },
        );
    }

    /// Glyph for `c`, if the font has one.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Return `true` for a font without glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// `FONT_ASCENT` property, 0 when absent.
    pub fn ascent(&self) -> i64 {
        self.ascent
    }

    /// Widest glyph bitmap.
    pub fn width(&self) -> u32 {
        self.max_width
    }

    /// Tallest glyph bitmap, used as line height.
    pub fn height(&self) -> u32 {
        self.max_height
    }

    /// Horizontal advance of `text`, the distance [`draw`](Self::draw) moves the cursor.
    pub fn measure(&self, text: &str) -> i64 {
        text.chars()
            .map(|c| self.glyphs.get(&c).map_or(FALLBACK_ADVANCE, |g| g.device_width))
            .sum()
    }

    /// Blit `text` onto `canvas` with its top-left at `(x, y)`. Returns the cursor after the last
    /// character.
    ///
    /// Glyph pixels land at `(cursor + x_offset + col, y + row)`; `y_offset` is not applied.
    /// Pixels outside the canvas are skipped.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        x: i64,
        y: i64,
        color: Color,
    ) -> i64 {
        let mut cursor = x;
        for ch in text.chars() {
            let Some(glyph) = self.glyphs.get(&ch) else {
                cursor += FALLBACK_ADVANCE;
                continue;
            };
            for row in 0..glyph.rows.len() {
                for col in 0..glyph.width {
                    if glyph.is_set(col, row) {
                        let px = cursor + glyph.x_offset + i64::from(col);
                        let py = y + row as i64;
                        canvas.set(px, py, color);
                    }
                }
            }
            cursor += glyph.device_width;
        }
        cursor
    }
}

fn glyph_mut<'a>(
    current: &'a mut Option<PendingGlyph>,
    key: &str,
    lineno: usize,
) -> LedResult<&'a mut PendingGlyph> {
    current
        .as_mut()
        .ok_or_else(|| LedError::font(format!("line {lineno}: {key} outside of a glyph")))
}

fn int_arg<T: std::str::FromStr>(args: &[&str], idx: usize, lineno: usize) -> LedResult<T> {
    let raw = args
        .get(idx)
        .ok_or_else(|| LedError::font(format!("line {lineno}: missing field {}", idx + 1)))?;
    raw.parse()
        .map_err(|_| LedError::font(format!("line {lineno}: invalid number '{raw}'")))
}

fn decode_hex_row(row: &str, lineno: usize) -> LedResult<Vec<u8>> {
    if row.len() % 2 != 0 {
        return Err(LedError::font(format!(
            "line {lineno}: odd-length bitmap row '{row}'"
        )));
    }
    (0..row.len())
        .step_by(2)
        .map(|i| {
            row.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| LedError::font(format!("line {lineno}: invalid hex row '{row}'")))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/bdf.rs"]
mod tests;
