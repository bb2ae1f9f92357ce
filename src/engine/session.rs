use std::fmt;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Monotonic tag of one render session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One-shot notification that a temporary session ran to its natural end.
///
/// Handed only to sessions of temporary commands. Firing asks the engine to resume the last
/// persistent command; the request carries the session id so the engine can ignore it once
/// the session has been superseded.
#[derive(Debug)]
pub struct Completion {
    id: SessionId,
    scope: CancellationToken,
    tx: mpsc::UnboundedSender<SessionId>,
}

impl Completion {
    pub(crate) fn new(
        id: SessionId,
        scope: CancellationToken,
        tx: mpsc::UnboundedSender<SessionId>,
    ) -> Self {
        Self { id, scope, tx }
    }

    /// Session this completion belongs to.
    pub fn session(&self) -> SessionId {
        self.id
    }

    /// Request resumption. Returns `false` without sending when the session scope is already
    /// cancelled or the engine is gone.
    pub fn fire(self) -> bool {
        if self.scope.is_cancelled() {
            tracing::debug!(session = %self.id, "completion after cancel, not resuming");
            return false;
        }
        self.tx.send(self.id).is_ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/session.rs"]
mod tests;
