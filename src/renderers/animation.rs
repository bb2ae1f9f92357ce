//! Procedural animations: a per-frame [`Shader`] driven at a fixed cadence.

use std::f64::consts::TAU;
use std::time::Duration;

use async_trait::async_trait;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::display::screen::Screen;
use crate::engine::session::Completion;
use crate::foundation::color::{BLACK, Color, rgb};
use crate::foundation::error::LedResult;
use crate::foundation::math::{hsv_to_rgb, unit_to_u8};
use crate::renderers::Renderer;

/// Default time between two animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(30);

/// Names resolvable through [`by_name`], sorted.
pub const NAMES: [&str; 9] = [
    "checkerboard",
    "color-wave",
    "game-of-life",
    "marble-shader",
    "pixel-bloom",
    "plasma",
    "rgb-flow",
    "ripple",
    "spiral",
];

/// Paints whole frames as a function of elapsed time.
pub trait Shader: Send {
    /// Paint `frame` for `t` seconds after the animation started.
    fn paint(&mut self, frame: &mut RgbaImage, t: f64);
}

/// Position of one pixel, in pixels, plus frame size and time.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub t: f64,
}

/// Stateless shader evaluating a color function per pixel.
#[derive(Clone, Copy)]
pub struct Field(pub fn(Sample) -> Color);

impl Shader for Field {
    fn paint(&mut self, frame: &mut RgbaImage, t: f64) {
        let (w, h) = (f64::from(frame.width()), f64::from(frame.height()));
        for (x, y, px) in frame.enumerate_pixels_mut() {
            *px = (self.0)(Sample {
                x: f64::from(x),
                y: f64::from(y),
                w,
                h,
                t,
            });
        }
    }
}

/// Drives a [`Shader`] until the session is cancelled.
pub struct AnimationRenderer<S> {
    shader: S,
    interval: Duration,
}

impl<S: Shader> AnimationRenderer<S> {
    pub fn new(shader: S) -> Self {
        Self {
            shader,
            interval: FRAME_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl<S: Shader> Renderer for AnimationRenderer<S> {
    async fn render(
        &mut self,
        screen: &mut Screen,
        scope: &CancellationToken,
        _on_complete: Option<Completion>,
    ) -> LedResult<()> {
        let (w, h) = screen.bounds();
        let mut frame = RgbaImage::new(w, h);
        let start = Instant::now();
        while !scope.is_cancelled() {
            self.shader.paint(&mut frame, start.elapsed().as_secs_f64());
            screen.show_image_for(&frame, self.interval, scope).await?;
        }
        Ok(())
    }
}

/// Build the animation called `name`.
pub fn by_name(name: &str) -> Option<Box<dyn Renderer>> {
    let field: fn(Sample) -> Color = match name {
        "checkerboard" => checkerboard,
        "color-wave" => color_wave,
        "marble-shader" => marble,
        "pixel-bloom" => pixel_bloom,
        "plasma" => plasma,
        "rgb-flow" => rgb_flow,
        "ripple" => ripple,
        "spiral" => spiral,
        "game-of-life" => {
            return Some(Box::new(
                AnimationRenderer::new(GameOfLife::new(StdRng::from_entropy()))
                    .with_interval(Duration::from_millis(50)),
            ));
        }
        _ => return None,
    };
    Some(Box::new(AnimationRenderer::new(Field(field))))
}

fn hsv(h: f64, s: f64, v: f64, floor: f64) -> Color {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    unit_rgb(r, g, b, floor)
}

fn unit_rgb(r: f64, g: f64, b: f64, floor: f64) -> Color {
    rgb(
        unit_to_u8(r.max(floor)),
        unit_to_u8(g.max(floor)),
        unit_to_u8(b.max(floor)),
    )
}

/// Square tiles whose size breathes between 4 and 12 pixels.
pub fn checkerboard(s: Sample) -> Color {
    let size = 8.0 + (4.0 * s.t.sin()).trunc();
    let tile = (s.x / size).floor() + (s.y / size).floor();
    if tile.rem_euclid(2.0) == 0.0 {
        rgb(255, 255, 255)
    } else {
        unit_rgb(0.1, 0.1, 0.1, 0.0)
    }
}

pub fn color_wave(s: Sample) -> Color {
    let offset = (s.t * 0.5).sin() * 20.0;
    let (xx, yy) = (s.x + offset, s.y + offset);
    unit_rgb(
        0.5 + 0.5 * ((xx + s.t * 30.0) * 0.1).sin(),
        0.5 + 0.5 * ((yy + s.t * 40.0) * 0.1).sin(),
        0.5 + 0.5 * ((xx + yy + s.t * 50.0) * 0.1).sin(),
        0.1,
    )
}

/// Veined marble; also the playground shader.
pub fn marble(s: Sample) -> Color {
    let xf = s.x / s.w.max(1.0);
    let yf = s.y / s.h.max(1.0);
    let noise = ((xf * 10.0 + (yf * 10.0 + s.t * 0.2).sin()) * 3.0 + s.t).sin();
    let value = ((xf * 20.0 + noise * 2.0 + s.t * 0.5).sin() + 1.0) / 2.0;
    hsv(
        0.5 + value * 0.3 + s.t * 0.02,
        0.7,
        0.4 + 0.6 * value,
        0.15,
    )
}

pub fn pixel_bloom(s: Sample) -> Color {
    let dist = (s.x - s.w / 2.0).hypot(s.y - s.h / 2.0);
    let pulse = (dist * 0.2 - s.t * 2.0).sin();
    hsv(0.6 + dist * 0.01 + s.t * 0.05, 1.0, 0.5 + 0.5 * pulse, 0.1)
}

pub fn plasma(s: Sample) -> Color {
    let value = (s.x * 0.1 + s.t).sin()
        + (s.y * 0.1 + s.t).sin()
        + ((s.x + s.y) * 0.1 + s.t).sin()
        + ((s.x - s.w / 2.0).hypot(s.y - s.h / 2.0) * 0.1 - s.t).sin();
    hsv((value + 4.0) / 8.0, 1.0, 1.0, 0.1)
}

pub fn rgb_flow(s: Sample) -> Color {
    let phase = (s.x * 0.2 + s.y * 0.2 + s.t).sin();
    hsv((phase + 1.0) / 2.0 + 0.5 * s.t, 1.0, 1.0, 0.1)
}

pub fn ripple(s: Sample) -> Color {
    let dist = (s.x - s.w / 2.0).hypot(s.y - s.h / 2.0);
    let value = (dist * 0.3 - s.t * 3.0).sin();
    let brightness = 0.5 + 0.5 * (dist * 0.2 - s.t * 2.0).sin();
    hsv(value * 0.25 + s.t * 0.1, 1.0, brightness, 0.1)
}

pub fn spiral(s: Sample) -> Color {
    let angle = (s.y - s.h / 2.0).atan2(s.x - s.w / 2.0);
    hsv((angle + s.t) / TAU, 1.0, 1.0, 0.1)
}

/// Conway's life on a torus the size of the frame, seeded with about 20% live cells.
#[derive(Clone, Debug)]
pub struct GameOfLife {
    rng: StdRng,
    width: usize,
    height: usize,
    cells: Vec<bool>,
    scratch: Vec<bool>,
}

impl GameOfLife {
    /// Seed from `rng` whenever the frame size changes.
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            width: 0,
            height: 0,
            cells: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Deterministic start, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Start from an explicit row-major grid.
    pub fn with_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        let scratch = vec![false; cells.len()];
        Self {
            rng: StdRng::seed_from_u64(0),
            width,
            height,
            cells,
            scratch,
        }
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    fn reseed(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = (0..width * height)
            .map(|_| self.rng.gen_bool(0.2))
            .collect();
        self.scratch = vec![false; width * height];
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return;
        }
        for y in 0..h {
            for x in 0..w {
                let mut live = 0;
                for dy in [h - 1, 0, 1] {
                    for dx in [w - 1, 0, 1] {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        if self.cells[((y + dy) % h) * w + (x + dx) % w] {
                            live += 1;
                        }
                    }
                }
                let alive = self.cells[y * w + x];
                self.scratch[y * w + x] = live == 3 || (alive && live == 2);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }
}

impl Shader for GameOfLife {
    fn paint(&mut self, frame: &mut RgbaImage, _t: f64) {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        if (w, h) != (self.width, self.height) {
            self.reseed(w, h);
        }
        for (x, y, px) in frame.enumerate_pixels_mut() {
            let (x, y) = (x as usize, y as usize);
            *px = if self.cells[y * w + x] {
                hsv(((x * y) % 360) as f64 / 360.0, 1.0, 1.0, 0.0)
            } else {
                BLACK
            };
        }
        self.step();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/renderers/animation.rs"]
mod tests;
