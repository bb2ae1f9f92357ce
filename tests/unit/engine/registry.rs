use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::display::screen::Screen;
use crate::engine::session::Completion;

struct Tagged(String);

#[async_trait]
impl Renderer for Tagged {
    async fn render(
        &mut self,
        _screen: &mut Screen,
        _scope: &CancellationToken,
        _on_complete: Option<Completion>,
    ) -> LedResult<()> {
        Err(LedError::content(self.0.clone()))
    }
}

async fn tag_of(r: Box<dyn Renderer>) -> String {
    let mut r = r;
    let (sink, _log) = crate::sink::MemorySink::new(1, 1);
    let mut screen = Screen::new(sink);
    match r.render(&mut screen, &CancellationToken::new(), None).await {
        Err(LedError::Content(tag)) => tag,
        other => panic!("unexpected {other:?}"),
    }
}

fn tagged(tag: &'static str) -> impl Fn(&Resources, &str) -> LedResult<Box<dyn Renderer>> {
    move |_, name| Ok(Box::new(Tagged(format!("{tag}:{name}"))) as Box<dyn Renderer>)
}

#[tokio::test]
async fn exact_names_win_over_fallback() {
    let mut reg = Registry::default();
    reg.register(CommandKind::Dashboard, "clock", tagged("named"))
        .register_fallback(CommandKind::Dashboard, tagged("fallback"));

    let named = reg
        .resolve(&Command::new(CommandKind::Dashboard, "clock"))
        .ok()
        .unwrap();
    assert_eq!(tag_of(named).await, "named:clock");

    let other = reg
        .resolve(&Command::new(CommandKind::Dashboard, "weather"))
        .ok()
        .unwrap();
    assert_eq!(tag_of(other).await, "fallback:weather");
}

#[test]
fn unknown_kind_or_name_is_a_resolution_error() {
    let mut reg = Registry::default();
    reg.register(CommandKind::Animation, "plasma", tagged("a"));

    for cmd in [
        Command::new(CommandKind::Animation, "nope"),
        Command::new(CommandKind::Image, "plasma"),
    ] {
        let err = reg.resolve(&cmd).err().unwrap();
        assert!(matches!(err, LedError::Resolution(_)));
        assert!(err.to_string().contains(&cmd.name));
    }
}

#[test]
fn names_are_sorted_per_kind() {
    let mut reg = Registry::new(Resources {
        font: "f.bdf".into(),
        ..Resources::default()
    });
    reg.register(CommandKind::Animation, "spiral", tagged("a"))
        .register(CommandKind::Animation, "plasma", tagged("a"))
        .register(CommandKind::Dashboard, "clock", tagged("d"));

    assert_eq!(reg.names(CommandKind::Animation), vec!["plasma", "spiral"]);
    assert_eq!(reg.names(CommandKind::Dashboard), vec!["clock"]);
    assert!(reg.names(CommandKind::Gif).is_empty());
    assert!(!reg.has_fallback(CommandKind::Animation));
    assert_eq!(reg.resources().font, PathBuf::from("f.bdf"));
    assert!(format!("{reg:?}").contains("spiral"));
}

#[test]
fn resources_follow_config() {
    let mut config = Config::default();
    config.dashboards.font = "fonts/5x8.bdf".into();
    let res = Resources::from_config(&config);
    assert_eq!(res.font, PathBuf::from("fonts/5x8.bdf"));
    assert_eq!(res.assets, AssetDirs::default());
}
