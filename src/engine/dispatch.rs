use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt as _;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::display::screen::Screen;
use crate::engine::command::Command;
use crate::engine::registry::Registry;
use crate::engine::session::{Completion, SessionId};
use crate::foundation::error::{LedError, LedResult};
use crate::renderers::Renderer;

/// Engine tuning that does not come from the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineOptions {
    /// A superseded session slower than this to stop is reported; the engine keeps waiting.
    pub stop_grace: Duration,
    /// Dispatched before the first external command.
    pub bootstrap: Option<Command>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for EngineOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            stop_grace: config.stop_grace(),
            bootstrap: config.bootstrap.clone(),
        }
    }
}

struct ActiveSession {
    id: SessionId,
    command: Command,
    scope: CancellationToken,
    task: JoinHandle<Screen>,
}

/// Single-consumer dispatcher owning the screen and at most one render session.
///
/// The screen moves into the session task and comes back when that task ends, so exactly one
/// renderer can write to it at any time. Replacing a session means cancelling its scope and
/// waiting for the screen to be handed back.
pub struct Engine {
    registry: Registry,
    options: EngineOptions,
    screen: Option<Screen>,
    active: Option<ActiveSession>,
    last_persistent: Option<Command>,
    next_id: u64,
    resume_tx: mpsc::UnboundedSender<SessionId>,
}

impl Engine {
    fn new(
        screen: Screen,
        registry: Registry,
        options: EngineOptions,
    ) -> (Self, mpsc::UnboundedReceiver<SessionId>) {
        let (resume_tx, resumes) = mpsc::unbounded_channel();
        let engine = Engine {
            registry,
            options,
            screen: Some(screen),
            active: None,
            last_persistent: None,
            next_id: 0,
            resume_tx,
        };
        (engine, resumes)
    }

    /// Run until `root` is cancelled, consuming `commands` in arrival order.
    ///
    /// When every sender is dropped the current session keeps running and completions are
    /// still honoured. On exit the active session is stopped, the screen cleared and the
    /// sink closed.
    pub async fn run(
        screen: Screen,
        registry: Registry,
        options: EngineOptions,
        commands: mpsc::Receiver<Command>,
        root: CancellationToken,
    ) -> LedResult<()> {
        let (mut engine, mut resumes) = Engine::new(screen, registry, options);
        let mut commands = Some(commands);

        if let Some(cmd) = engine.options.bootstrap.clone() {
            info!(command = %cmd, "bootstrap");
            engine.dispatch(cmd, &root).await?;
        }

        let outcome = loop {
            tokio::select! {
                biased;
                _ = root.cancelled() => break Ok(()),
                cmd = next_command(&mut commands) => match cmd {
                    Some(cmd) => {
                        if let Err(e) = engine.dispatch(cmd, &root).await {
                            break Err(e);
                        }
                    }
                    None => {
                        info!("command stream closed, keeping current session");
                        commands = None;
                    }
                },
                Some(id) = resumes.recv() => {
                    if let Err(e) = engine.resume(id, &root).await {
                        break Err(e);
                    }
                }
            }
        };

        let shutdown = engine.shutdown().await;
        outcome.and(shutdown)
    }

    #[tracing::instrument(skip_all, fields(command = %command))]
    async fn dispatch(&mut self, command: Command, root: &CancellationToken) -> LedResult<()> {
        self.stop_active().await?;

        if !command.temporary {
            self.last_persistent = Some(command.clone());
        }

        let renderer = match self.registry.resolve(&command) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!(error = %e, "cannot resolve command, no session started");
                return Ok(());
            }
        };

        let Some(mut screen) = self.screen.take() else {
            return Err(LedError::Other(anyhow::anyhow!(
                "screen missing while idle"
            )));
        };

        self.next_id += 1;
        let id = SessionId::new(self.next_id);
        let scope = root.child_token();
        let completion = command
            .temporary
            .then(|| Completion::new(id, scope.clone(), self.resume_tx.clone()));

        let task_scope = scope.clone();
        let mut renderer: Box<dyn Renderer> = renderer;
        let task = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(renderer.render(&mut screen, &task_scope, completion))
                .catch_unwind()
                .await;
            match outcome {
                Ok(Ok(())) => debug!(session = %id, "renderer returned"),
                Ok(Err(e)) => error!(session = %id, error = %e, "renderer failed"),
                Err(payload) => error!(
                    session = %id,
                    panic = %panic_message(&*payload),
                    "renderer panicked"
                ),
            }
            screen
        });

        info!(session = %id, "session started");
        self.active = Some(ActiveSession {
            id,
            command,
            scope,
            task,
        });
        Ok(())
    }

    async fn resume(&mut self, id: SessionId, root: &CancellationToken) -> LedResult<()> {
        if self.active.as_ref().map(|a| a.id) != Some(id) {
            debug!(session = %id, "ignoring completion of superseded session");
            return Ok(());
        }
        let Some(cmd) = self.last_persistent.clone() else {
            debug!(session = %id, "completed with nothing to resume");
            return Ok(());
        };
        info!(session = %id, resume = %cmd, "temporary command finished");
        self.dispatch(cmd, root).await
    }

    /// Cancel the active session and take the screen back.
    async fn stop_active(&mut self) -> LedResult<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        active.scope.cancel();

        let mut task = active.task;
        let joined = match tokio::time::timeout(self.options.stop_grace, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(
                    session = %active.id,
                    command = %active.command,
                    grace_ms = self.options.stop_grace.as_millis() as u64,
                    "session slow to stop, still waiting"
                );
                task.await
            }
        };

        match joined {
            Ok(screen) => {
                debug!(session = %active.id, "session stopped");
                self.screen = Some(screen);
                Ok(())
            }
            Err(e) => {
                error!(session = %active.id, error = %e, "session task died with the screen");
                Err(LedError::SessionLost(active.id.get()))
            }
        }
    }

    async fn shutdown(&mut self) -> LedResult<()> {
        info!("shutting down");
        self.stop_active().await?;
        let Some(mut screen) = self.screen.take() else {
            return Ok(());
        };
        let cleared = screen.clear();
        let closed = screen.close();
        cleared.and(closed)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

async fn next_command(commands: &mut Option<mpsc::Receiver<Command>>) -> Option<Command> {
    match commands {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/dispatch.rs"]
mod tests;
