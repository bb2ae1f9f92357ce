//! Command dispatch: one screen, at most one render session, resumption after temporary
//! content.

pub mod command;
pub mod dispatch;
pub mod registry;
pub mod session;

pub use command::{Command, CommandKind};
pub use dispatch::{Engine, EngineOptions};
pub use registry::{Constructor, Registry, Resources};
pub use session::{Completion, SessionId};
