use async_trait::async_trait;
use tokio::time::Instant;

use super::*;
use crate::engine::command::CommandKind;
use crate::engine::registry::Resources;
use crate::sink::MemorySink;

/// Holds the screen until cancelled, optionally ignoring the cancel for a while first.
struct Hold {
    stubborn: Duration,
}

#[async_trait]
impl Renderer for Hold {
    async fn render(
        &mut self,
        screen: &mut Screen,
        scope: &CancellationToken,
        _on_complete: Option<Completion>,
    ) -> LedResult<()> {
        screen.render()?;
        tokio::time::sleep(self.stubborn).await;
        scope.cancelled().await;
        Ok(())
    }
}

fn registry() -> Registry {
    let mut reg = Registry::new(Resources::default());
    reg.register(CommandKind::Animation, "hold", |_, _| {
        Ok(Box::new(Hold {
            stubborn: Duration::ZERO,
        }) as Box<dyn Renderer>)
    })
    .register(CommandKind::Animation, "stubborn", |_, _| {
        Ok(Box::new(Hold {
            stubborn: Duration::from_millis(200),
        }) as Box<dyn Renderer>)
    })
    .register(CommandKind::GifOnce, "blip", |_, _| {
        Ok(Box::new(Hold {
            stubborn: Duration::ZERO,
        }) as Box<dyn Renderer>)
    });
    reg
}

fn engine(options: EngineOptions) -> Engine {
    let (sink, _log) = MemorySink::new(2, 2);
    let (engine, _resumes) = Engine::new(Screen::new(sink), registry(), options);
    engine
}

fn active_id(engine: &Engine) -> Option<u64> {
    engine.active.as_ref().map(|a| a.id.get())
}

#[test]
fn options_follow_engine_config() {
    let config = EngineConfig {
        command_buffer: 4,
        stop_grace_ms: 7,
        bootstrap: Some(Command::new(CommandKind::Dashboard, "clock")),
    };
    let options = EngineOptions::from(&config);
    assert_eq!(options.stop_grace, Duration::from_millis(7));
    assert_eq!(
        options.bootstrap,
        Some(Command::new(CommandKind::Dashboard, "clock"))
    );
    assert_eq!(EngineOptions::default().stop_grace, Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn completion_from_superseded_session_is_ignored() {
    let root = CancellationToken::new();
    let mut engine = engine(EngineOptions::default());

    engine
        .dispatch(Command::new(CommandKind::Animation, "hold"), &root)
        .await
        .unwrap();
    engine
        .dispatch(Command::new(CommandKind::GifOnce, "blip"), &root)
        .await
        .unwrap();
    engine
        .dispatch(Command::new(CommandKind::Animation, "hold"), &root)
        .await
        .unwrap();
    assert_eq!(active_id(&engine), Some(3));

    // session 2 was the temporary one; its late completion must not restart anything
    engine.resume(SessionId::new(2), &root).await.unwrap();
    assert_eq!(active_id(&engine), Some(3));
    assert_eq!(engine.next_id, 3);

    // the current session completing does resume the last persistent command
    engine.resume(SessionId::new(3), &root).await.unwrap();
    assert_eq!(active_id(&engine), Some(4));
    assert_eq!(
        engine.active.as_ref().map(|a| a.command.clone()),
        Some(Command::new(CommandKind::Animation, "hold"))
    );

    engine.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn temporary_commands_are_not_remembered() {
    let root = CancellationToken::new();
    let mut engine = engine(EngineOptions::default());

    engine
        .dispatch(Command::new(CommandKind::Animation, "hold"), &root)
        .await
        .unwrap();
    engine
        .dispatch(Command::new(CommandKind::GifOnce, "blip"), &root)
        .await
        .unwrap();
    assert_eq!(
        engine.last_persistent,
        Some(Command::new(CommandKind::Animation, "hold"))
    );
    engine.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn unresolved_command_stops_current_session_and_starts_none() {
    let root = CancellationToken::new();
    let mut engine = engine(EngineOptions::default());

    engine
        .dispatch(Command::new(CommandKind::Animation, "hold"), &root)
        .await
        .unwrap();
    engine
        .dispatch(Command::new(CommandKind::Animation, "missing"), &root)
        .await
        .unwrap();

    assert!(engine.active.is_none());
    assert!(engine.screen.is_some());
    assert_eq!(
        engine.last_persistent,
        Some(Command::new(CommandKind::Animation, "missing"))
    );
}

#[tokio::test(start_paused = true)]
async fn slow_sessions_are_awaited_past_the_grace_period() {
    let root = CancellationToken::new();
    let mut engine = engine(EngineOptions {
        stop_grace: Duration::from_millis(50),
        bootstrap: None,
    });

    engine
        .dispatch(Command::new(CommandKind::Animation, "stubborn"), &root)
        .await
        .unwrap();
    let start = Instant::now();
    engine
        .dispatch(Command::new(CommandKind::Animation, "hold"), &root)
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::from_millis(200));
    assert_eq!(active_id(&engine), Some(2));
}

#[tokio::test(start_paused = true)]
async fn session_scopes_are_children_of_root() {
    let root = CancellationToken::new();
    let mut engine = engine(EngineOptions::default());
    engine
        .dispatch(Command::new(CommandKind::Animation, "hold"), &root)
        .await
        .unwrap();

    root.cancel();
    let active = engine.active.take().unwrap();
    assert!(active.scope.is_cancelled());
    assert!(active.task.await.is_ok());
}
