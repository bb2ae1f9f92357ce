use super::*;
use crate::foundation::color::{BLACK, rgb};
use crate::sink::MemorySink;

const ONE_GLYPH: &str = "\
STARTFONT 2.1
FONT -test-fixture
FONT_ASCENT 1
CHARS 1
STARTCHAR A
ENCODING 65
DWIDTH 5 0
BBX 4 1 0 0
BITMAP
F0
ENDCHAR
ENDFONT
";

fn canvas(w: u32, h: u32) -> Canvas {
    let (sink, _log) = MemorySink::new(w, h);
    Canvas::new(sink)
}

#[test]
fn parses_single_glyph_fixture() {
    let font = BdfFont::parse(ONE_GLYPH).unwrap();
    assert_eq!(font.len(), 1);
    assert_eq!(font.ascent(), 1);

    let g = font.glyph('A').unwrap();
    assert_eq!((g.width, g.height), (4, 1));
    assert_eq!((g.x_offset, g.y_offset), (0, 0));
    assert_eq!(g.device_width, 5);
    assert_eq!(g.rows(), &[vec![0xF0]]);
    assert_eq!((font.width(), font.height()), (4, 1));
}

#[test]
fn draw_sets_exactly_the_glyph_bits_and_advances_by_device_width() {
    let font = BdfFont::parse(ONE_GLYPH).unwrap();
    let mut c = canvas(8, 2);
    let color = rgb(0, 200, 0);

    let cursor = font.draw(&mut c, "A", 0, 0, color);

    assert_eq!(cursor, 5);
    for x in 0..4 {
        assert_eq!(c.get(x, 0), Some(color));
    }
    assert_eq!(c.get(4, 0), Some(BLACK));
    assert!((0..8).all(|x| c.get(x, 1) == Some(BLACK)));
}

#[test]
fn unknown_characters_use_fallback_advance() {
    let font = BdfFont::parse(ONE_GLYPH).unwrap();
    let mut c = canvas(16, 1);
    let cursor = font.draw(&mut c, "?A", 2, 0, rgb(1, 1, 1));
    assert_eq!(cursor, 2 + FALLBACK_ADVANCE + 5);
    assert_eq!(c.get(8, 0), Some(rgb(1, 1, 1)));
    assert_eq!(c.get(7, 0), Some(BLACK));
}

#[test]
fn msb_first_bits_across_multiple_bytes() {
    let src = "\
STARTCHAR bar
ENCODING 124
DWIDTH 10 0
BBX 10 2 1 -1
BITMAP
8040
4000
ENDCHAR
";
    let font = BdfFont::parse(src).unwrap();
    let g = font.glyph('|').unwrap();
    assert!(g.is_set(0, 0));
    assert!(!g.is_set(1, 0));
    assert!(g.is_set(9, 0));
    assert!(g.is_set(1, 1));
    assert!(!g.is_set(10, 0));

    let mut c = canvas(16, 4);
    font.draw(&mut c, "|", 0, 1, rgb(9, 9, 9));
    // x_offset shifts right, y_offset is not applied.
    assert_eq!(c.get(1, 1), Some(rgb(9, 9, 9)));
    assert_eq!(c.get(10, 1), Some(rgb(9, 9, 9)));
    assert_eq!(c.get(2, 2), Some(rgb(9, 9, 9)));
    assert_eq!(c.get(0, 1), Some(BLACK));
}

#[test]
fn pixels_outside_the_canvas_are_clipped() {
    let font = BdfFont::parse(ONE_GLYPH).unwrap();
    let mut c = canvas(2, 1);
    let cursor = font.draw(&mut c, "A", -2, 0, rgb(5, 5, 5));
    assert_eq!(cursor, 3);
    assert_eq!(c.get(0, 0), Some(rgb(5, 5, 5)));
    assert_eq!(c.get(1, 0), Some(rgb(5, 5, 5)));
}

#[test]
fn glyph_keys_outside_startchar_are_errors() {
    let err = BdfFont::parse("ENCODING 65\n").unwrap_err();
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn bad_numbers_and_hex_are_errors() {
    assert!(BdfFont::parse("STARTCHAR a\nBBX 4 x 0 0\n").is_err());
    assert!(BdfFont::parse("STARTCHAR a\nENCODING 97\nBITMAP\nZZ\nENDCHAR\n").is_err());
    assert!(BdfFont::parse("STARTCHAR a\nENCODING 97\nBITMAP\nF\nENDCHAR\n").is_err());
}

#[test]
fn unencoded_glyphs_are_dropped() {
    let font = BdfFont::parse("STARTCHAR x\nENCODING -1\nBBX 1 1 0 0\nENDCHAR\n").unwrap();
    assert!(font.is_empty());
}

#[test]
fn load_reports_missing_file() {
    let err = BdfFont::load(Path::new("/definitely/not/here.bdf")).unwrap_err();
    assert!(err.to_string().contains("here.bdf"));
}

#[test]
fn measure_matches_draw_advance() {
    let font = BdfFont::parse(ONE_GLYPH).unwrap();
    let mut c = canvas(32, 2);
    let end = font.draw(&mut c, "A?A", 3, 0, rgb(1, 1, 1));
    assert_eq!(font.measure("A?A"), 16);
    assert_eq!(end - 3, font.measure("A?A"));
    assert_eq!(font.measure(""), 0);
}
