use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::LedError;

/// What a [`Command`] asks the engine to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    /// A still PNG.
    Image,
    /// An animated GIF that loops until replaced.
    Gif,
    /// An animated GIF played once, after which the last persistent command resumes.
    GifOnce,
    /// A live dashboard such as a clock.
    Dashboard,
    /// A procedural animation.
    Animation,
    /// The experimental shader slot; every name resolves.
    Playground,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Image,
        CommandKind::Gif,
        CommandKind::GifOnce,
        CommandKind::Dashboard,
        CommandKind::Animation,
        CommandKind::Playground,
    ];

    /// Wire name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Image => "image",
            CommandKind::Gif => "gif",
            CommandKind::GifOnce => "gif-once",
            CommandKind::Dashboard => "dashboard",
            CommandKind::Animation => "animation",
            CommandKind::Playground => "playground",
        }
    }

    /// Temporary kinds hand the display back to the last persistent command when they finish.
    pub fn is_temporary(self) -> bool {
        self == CommandKind::GifOnce
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| LedError::resolution(format!("unknown command kind '{s}'")))
    }
}

/// One request to the engine. Consumed exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireCommand", into = "WireCommand")]
pub struct Command {
    pub kind: CommandKind,
    pub name: String,
    /// Derived from `kind`; see [`CommandKind::is_temporary`].
    pub temporary: bool,
}

impl Command {
    pub fn new(kind: CommandKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            temporary: kind.is_temporary(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Parse a `<kind> <name>` line.
impl FromStr for Command {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, name) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| LedError::resolution(format!("expected '<kind> <name>', got '{s}'")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LedError::resolution(format!("missing name in '{s}'")));
        }
        Ok(Command::new(kind.parse()?, name))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireCommand {
    kind: CommandKind,
    name: String,
}

impl From<WireCommand> for Command {
    fn from(w: WireCommand) -> Self {
        Command::new(w.kind, w.name)
    }
}

impl From<Command> for WireCommand {
    fn from(c: Command) -> Self {
        WireCommand {
            kind: c.kind,
            name: c.name,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/command.rs"]
mod tests;
