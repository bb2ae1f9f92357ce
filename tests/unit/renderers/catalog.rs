use super::*;
use crate::engine::command::Command;

fn registry() -> Registry {
    default_registry(Resources::default())
}

#[test]
fn lists_named_dashboards_and_animations() {
    let r = registry();
    assert_eq!(r.names(CommandKind::Dashboard), vec!["clock", "digital-clock"]);
    assert_eq!(r.names(CommandKind::Animation), animation::NAMES.to_vec());
    assert!(r.names(CommandKind::Image).is_empty());
}

#[test]
fn asset_kinds_and_playground_accept_any_valid_name() {
    let r = registry();
    for kind in [
        CommandKind::Image,
        CommandKind::Gif,
        CommandKind::GifOnce,
        CommandKind::Playground,
    ] {
        assert!(r.has_fallback(kind), "{kind}");
        assert!(r.resolve(&Command::new(kind, "anything")).is_ok(), "{kind}");
    }
    assert!(!r.has_fallback(CommandKind::Animation));
}

#[test]
fn bad_names_are_resolution_errors() {
    let r = registry();
    for cmd in [
        Command::new(CommandKind::Animation, "fireworks"),
        Command::new(CommandKind::Dashboard, "weather"),
        Command::new(CommandKind::Image, "../etc/passwd"),
        Command::new(CommandKind::GifOnce, "/abs"),
    ] {
        let err = r.resolve(&cmd).err().unwrap();
        assert!(matches!(err, LedError::Resolution(_)), "{cmd}: {err}");
    }
}
