use crate::foundation::math::mul_div255_u8;

/// Straight-alpha RGBA8 color, the pixel type of every surface in the crate.
pub type Color = image::Rgba<u8>;

/// Opaque black, the background of a cleared canvas.
pub const BLACK: Color = image::Rgba([0, 0, 0, 255]);

/// Fully transparent pixel, the padding value of fit-center output.
pub const TRANSPARENT: Color = image::Rgba([0, 0, 0, 0]);

/// Build an opaque color.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    image::Rgba([r, g, b, 255])
}

/// Source-over composite of straight-alpha `src` onto `dst`.
pub fn over(dst: Color, src: Color) -> Color {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255 - sa;
    let da = u16::from(mul_div255_u8(u16::from(dst[3]), inv));
    let out_a = sa + da;
    if out_a == 0 {
        return TRANSPARENT;
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = u32::from(src[i]) * u32::from(sa);
        let dc = u32::from(dst[i]) * u32::from(da);
        out[i] = ((sc + dc + u32::from(out_a) / 2) / u32::from(out_a)).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    image::Rgba(out)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
