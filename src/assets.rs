//! On-disk content: PNG stills and animated GIFs, addressed by relative name.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};

use crate::display::sequence::FrameSequence;
use crate::foundation::error::{LedError, LedResult};

/// Directories the image and sequence renderers load from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDirs {
    /// PNG stills, addressed as `<images>/<name>.png`.
    pub images: PathBuf,
    /// Animated GIFs, addressed as `<gifs>/<name>.gif`.
    pub gifs: PathBuf,
}

impl Default for AssetDirs {
    fn default() -> Self {
        Self {
            images: PathBuf::from("images/pngs"),
            gifs: PathBuf::from("images/gifs"),
        }
    }
}

impl AssetDirs {
    /// Path of the PNG called `name`.
    pub fn png_path(&self, name: &str) -> LedResult<PathBuf> {
        asset_path(&self.images, name, "png")
    }

    /// Path of the GIF called `name`.
    pub fn gif_path(&self, name: &str) -> LedResult<PathBuf> {
        asset_path(&self.gifs, name, "gif")
    }
}

/// Normalize an asset name to a `/`-separated relative path.
///
/// Rejects empty names, absolute paths and `..` segments with a resolution error.
pub fn validate_asset_name(name: &str) -> LedResult<String> {
    let s = name.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(LedError::resolution("asset name must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(LedError::resolution(format!(
            "asset name '{name}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LedError::resolution(format!(
                "asset name '{name}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LedError::resolution(format!(
            "asset name '{name}' must contain a file name"
        )));
    }

    Ok(out.join("/"))
}

fn asset_path(dir: &Path, name: &str, ext: &str) -> LedResult<PathBuf> {
    let rel = validate_asset_name(name)?;
    Ok(dir.join(format!("{rel}.{ext}")))
}

fn open(path: &Path) -> LedResult<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| LedError::content(format!("open '{}': {e}", path.display())))?;
    Ok(BufReader::new(file))
}

/// Decode a still image to RGBA8.
pub fn load_png(path: &Path) -> LedResult<RgbaImage> {
    let reader = image::ImageReader::new(open(path)?)
        .with_guessed_format()
        .map_err(|e| LedError::content(format!("sniff '{}': {e}", path.display())))?;
    let img = reader
        .decode()
        .map_err(|e| LedError::content(format!("decode '{}': {e}", path.display())))?;
    Ok(img.to_rgba8())
}

/// Decode every frame of an animated GIF, with its delay, into a sequence.
///
/// Frames come out fully composited at the GIF's logical size.
pub fn load_gif(path: &Path, looping: bool) -> LedResult<FrameSequence> {
    let decode_err = |e: image::ImageError| {
        LedError::content(format!("decode '{}': {e}", path.display()))
    };
    let decoder = GifDecoder::new(open(path)?).map_err(decode_err)?;
    let frames = decoder.into_frames().collect_frames().map_err(decode_err)?;
    if frames.is_empty() {
        return Err(LedError::content(format!(
            "'{}' has no frames",
            path.display()
        )));
    }

    let mut delays = Vec::with_capacity(frames.len());
    let mut images = Vec::with_capacity(frames.len());
    for frame in frames {
        let (numer, denom) = frame.delay().numer_denom_ms();
        delays.push(numer / denom.max(1) / 10);
        images.push(frame.into_buffer());
    }
    tracing::debug!(path = %path.display(), frames = images.len(), "decoded gif");
    FrameSequence::from_centiseconds(images, &delays, looping)
}

#[cfg(test)]
#[path = "../tests/unit/assets.rs"]
mod tests;
