//! ledmatrix drives an LED matrix (or an emulated one) from a stream of commands.
//!
//! A single [`Engine`] owns the [`Screen`] and runs at most one render session at a time:
//!
//! - Commands name a kind (`image`, `gif`, `gif-once`, `dashboard`, `animation`, `playground`)
//!   and a renderer, resolved through a [`Registry`]
//! - Every new command cancels the running session before the next one gets the screen
//! - Temporary content (`gif-once`) hands the display back to the last persistent command
//!   once it has played to the end
//!
//! Pixels leave the crate through a [`PixelSink`]; [`MemorySink`] and [`TerminalSink`] ship
//! with it.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod display;
pub mod engine;
mod foundation;
pub mod renderers;
pub mod sink;
pub mod text;

pub use crate::config::{Config, ConfigError};
pub use crate::display::canvas::Canvas;
pub use crate::display::screen::Screen;
pub use crate::display::sequence::{FrameSequence, Playback, SequenceFrame};
pub use crate::display::transform::{FitCenter, Identity, Transform};
pub use crate::engine::{
    Command, CommandKind, Completion, Engine, EngineOptions, Registry, Resources, SessionId,
};
pub use crate::foundation::color::{BLACK, Color, TRANSPARENT, over, rgb};
pub use crate::foundation::error::{LedError, LedResult};
pub use crate::renderers::{Renderer, default_registry};
pub use crate::sink::{Dimmer, FrameLog, MemorySink, PixelSink, RecordedFrame, TerminalSink};
pub use crate::text::bdf::BdfFont;
pub use crate::text::writer::TextWriter;
