//! Clock dashboards: an analog face drawn with `kurbo` geometry and a BDF text clock.

use std::f64::consts::PI;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use image::RgbaImage;
use kurbo::{Circle, Line, ParamCurve, ParamCurveArclen, Point, Shape, Vec2};
use tokio_util::sync::CancellationToken;

use crate::display::screen::Screen;
use crate::engine::session::Completion;
use crate::foundation::color::{BLACK, Color, rgb};
use crate::foundation::error::LedResult;
use crate::renderers::Renderer;
use crate::renderers::animation::Shader;
use crate::text::bdf::BdfFont;
use crate::text::writer::TextWriter;

const FACE: Color = rgb(128, 128, 128);
const HAND: Color = rgb(255, 255, 255);
const SECOND_HAND: Color = rgb(255, 0, 0);

/// Analog clock face reading the local wall clock on every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalogClock;

impl Shader for AnalogClock {
    fn paint(&mut self, frame: &mut RgbaImage, _t: f64) {
        draw_analog(frame, Local::now().time());
    }
}

/// Draw a clock face for `time`, centred on `frame`.
///
/// The radius is half the shorter side. Hands are half, three quarters and four fifths of it
/// long; the second hand sweeps continuously.
pub fn draw_analog(frame: &mut RgbaImage, time: NaiveTime) {
    frame.pixels_mut().for_each(|p| *p = BLACK);

    let center = Point::new(
        f64::from(frame.width()) / 2.0,
        f64::from(frame.height()) / 2.0,
    );
    let r = f64::from(frame.width().min(frame.height())) / 2.0;
    if r < 2.0 {
        return;
    }

    stroke(frame, &Circle::new(center, r - 2.0), FACE);
    for tick in 0..12 {
        let dir = direction(f64::from(tick) / 12.0);
        stroke(
            frame,
            &Line::new(center + dir * (r - 8.0).max(0.0), center + dir * (r - 2.0)),
            FACE,
        );
    }

    let seconds = (f64::from(time.second()) + f64::from(time.nanosecond()) / 1e9) / 60.0;
    let minutes = f64::from(time.minute()) / 60.0;
    let hours = (f64::from(time.hour() % 12) + minutes) / 12.0;

    for (turns, len, color) in [
        (hours, r / 2.0, HAND),
        (minutes, r * 3.0 / 4.0, HAND),
        (seconds, r * 4.0 / 5.0, SECOND_HAND),
    ] {
        stroke(frame, &Line::new(center, center + direction(turns) * len), color);
    }
}

/// Unit vector for a fraction of a full turn, 0 pointing up and growing clockwise.
fn direction(turns: f64) -> Vec2 {
    Vec2::from_angle(turns * 2.0 * PI - PI / 2.0)
}

fn stroke(frame: &mut RgbaImage, shape: &impl Shape, color: Color) {
    for seg in shape.path_segments(0.1) {
        let steps = (seg.arclen(0.1) * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            plot(frame, seg.eval(i as f64 / steps as f64), color);
        }
    }
}

fn plot(frame: &mut RgbaImage, p: Point, color: Color) {
    let (x, y) = (p.x.floor(), p.y.floor());
    if x >= 0.0 && y >= 0.0 && x < f64::from(frame.width()) && y < f64::from(frame.height()) {
        frame.put_pixel(x as u32, y as u32, color);
    }
}

/// Time and date in a BDF font, redrawn a few times per second.
pub struct DigitalClock {
    font: PathBuf,
    interval: Duration,
}

impl DigitalClock {
    pub fn new(font: impl Into<PathBuf>) -> Self {
        Self {
            font: font.into(),
            interval: Duration::from_millis(250),
        }
    }
}

/// Draw `now` as two centred lines, `HH:MM:SS` over `Www DD.MM`, and flush.
pub fn draw_digital(
    screen: &mut Screen,
    writer: &mut TextWriter,
    now: NaiveDateTime,
) -> LedResult<()> {
    let (w, h) = screen.bounds();
    let lines = [
        now.format("%H:%M:%S").to_string(),
        now.format("%a %d.%m").to_string(),
    ];
    let line_h = i64::from(writer.font().height());
    let top = (i64::from(h) - line_h * lines.len() as i64).max(0) / 2;

    screen.fill(BLACK);
    for (i, line) in lines.iter().enumerate() {
        let x = ((i64::from(w) - writer.font().measure(line)) / 2).max(0);
        writer.set_position(x, top + line_h * i as i64);
        let color = if i == 0 { HAND } else { FACE };
        writer.write(screen, line, color);
    }
    writer.flush(screen)
}

#[async_trait]
impl Renderer for DigitalClock {
    async fn render(
        &mut self,
        screen: &mut Screen,
        scope: &CancellationToken,
        _on_complete: Option<Completion>,
    ) -> LedResult<()> {
        let font = Arc::new(BdfFont::load(&self.font)?);
        let mut writer = TextWriter::new(font);
        while !scope.is_cancelled() {
            draw_digital(screen, &mut writer, Local::now().naive_local())?;
            tokio::select! {
                biased;
                _ = scope.cancelled() => {}
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/renderers/clock.rs"]
mod tests;
