use std::borrow::Cow;

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Policy applied to every image before it is composited onto the canvas.
pub trait Transform: Send + Sync {
    /// Map `img` to the image that should be composited.
    fn apply<'a>(&self, img: &'a RgbaImage) -> Cow<'a, RgbaImage>;
}

/// Pass images through untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl Transform for Identity {
    fn apply<'a>(&self, img: &'a RgbaImage) -> Cow<'a, RgbaImage> {
        Cow::Borrowed(img)
    }
}

/// Default policy: scale down (never up) to fit the target and center on a transparent
/// background. Images that already have the target size are passed through.
#[derive(Clone, Copy, Debug)]
pub struct FitCenter {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Resampling filter used when shrinking.
    pub filter: FilterType,
}

impl FitCenter {
    /// Fit to `width`×`height` with a Lanczos3 filter.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filter: FilterType::Lanczos3,
        }
    }
}

impl Transform for FitCenter {
    fn apply<'a>(&self, img: &'a RgbaImage) -> Cow<'a, RgbaImage> {
        if img.dimensions() == (self.width, self.height) {
            return Cow::Borrowed(img);
        }
        Cow::Owned(fit_center(img, self.width, self.height, self.filter))
    }
}

/// Size of `src_w`×`src_h` after shrinking to fit `max_w`×`max_h` with the aspect ratio kept.
///
/// Sources that already fit keep their size. Scaled sides never collapse to 0. A zero-sized
/// source or target yields `(0, 0)`.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    let src_aspect = f64::from(src_w) / f64::from(src_h);
    let max_aspect = f64::from(max_w) / f64::from(max_h);

    if src_aspect > max_aspect {
        let h = (f64::from(max_w) / src_aspect) as u32;
        (max_w, h.clamp(1, max_h))
    } else {
        let w = (f64::from(max_h) * src_aspect) as u32;
        (w.clamp(1, max_w), max_h)
    }
}

/// Fit `img` into a `width`×`height` buffer, centered, without distortion or clipping.
///
/// Uncovered pixels stay transparent. Zero-sized inputs or targets yield an empty image.
pub fn fit_center(img: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    let (src_w, src_h) = img.dimensions();
    if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
        return RgbaImage::new(0, 0);
    }

    let (new_w, new_h) = fit_dimensions(src_w, src_h, width, height);
    let scaled = if (new_w, new_h) == (src_w, src_h) {
        Cow::Borrowed(img)
    } else {
        Cow::Owned(imageops::resize(img, new_w, new_h, filter))
    };

    let mut dst = RgbaImage::new(width, height);
    let off_x = (width - new_w) / 2;
    let off_y = (height - new_h) / 2;
    imageops::replace(&mut dst, scaled.as_ref(), i64::from(off_x), i64::from(off_y));
    dst
}

#[cfg(test)]
#[path = "../../tests/unit/display/transform.rs"]
mod tests;
