/// Crate-wide result alias.
pub type LedResult<T> = Result<T, LedError>;

/// Errors surfaced by the engine, its renderers and the display stack.
#[derive(thiserror::Error, Debug)]
pub enum LedError {
    /// A command name did not resolve to a renderer.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// A renderer could not load or decode its content.
    #[error("content error: {0}")]
    Content(String),

    /// A BDF font could not be parsed.
    #[error("font error: {0}")]
    Font(String),

    /// The pixel sink rejected an operation.
    #[error("sink error: {0}")]
    Sink(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A render session task ended without handing the screen back.
    #[error("render session {0} lost the screen")]
    SessionLost(u64),

    /// Image decoding or encoding failure.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything else, usually with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LedError {
    /// Build a [`LedError::Resolution`].
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`LedError::Content`].
    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    /// Build a [`LedError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`LedError::Sink`].
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`LedError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
