use std::io::Write;

use super::*;
use crate::engine::command::CommandKind;

#[test]
fn empty_file_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.geometry(), (64, 32));
    assert_eq!(config.engine.command_buffer, 16);
    assert_eq!(config.engine.stop_grace(), Duration::from_millis(100));
    assert_eq!(config.dashboards.font, PathBuf::from("fonts/7x14.bdf"));
    assert_eq!(config.assets.dirs(), AssetDirs::default());
    assert!(config.engine.bootstrap.is_none());
}

#[test]
fn geometry_multiplies_chain_and_parallel() {
    let config = Config::from_toml_str(
        r#"
        [display]
        rows = 32
        cols = 64
        chain_length = 2
        parallel = 3
        "#,
    )
    .unwrap();
    assert_eq!(config.geometry(), (128, 96));
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_toml_str(
        r#"
        [assets]
        gifs_dir = "media/gifs"

        [engine]
        stop_grace_ms = 250
        bootstrap = { kind = "animation", name = "plasma" }
        "#,
    )
    .unwrap();
    assert_eq!(config.assets.gifs_dir, PathBuf::from("media/gifs"));
    assert_eq!(config.assets.images_dir, PathBuf::from("images/pngs"));
    assert_eq!(config.engine.command_buffer, 16);

    let boot = config.engine.bootstrap.unwrap();
    assert_eq!(boot.kind, CommandKind::Animation);
    assert_eq!(boot.name, "plasma");
    assert!(!boot.temporary);
}

#[test]
fn validation_errors_are_collected() {
    let err = Config::from_toml_str(
        r#"
        [display]
        rows = 0
        brightness = 0

        [engine]
        command_buffer = 0
        "#,
    )
    .unwrap_err();
    let ConfigError::Validation(errors) = &err else {
        panic!("expected validation error, got {err}");
    };
    assert_eq!(errors.len(), 3, "{errors:?}");
    assert!(err.to_string().contains("display.rows"));
    assert!(err.to_string().contains("engine.command_buffer"));
}

#[test]
fn unknown_keys_and_kinds_fail_to_parse() {
    assert!(matches!(
        Config::from_toml_str("[display]\nwidth = 3\n"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        Config::from_toml_str("[engine]\nbootstrap = { kind = \"video\", name = \"x\" }\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_file_and_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dashboards]\nfont = \"fonts/5x8.bdf\"").unwrap();
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.dashboards.font, PathBuf::from("fonts/5x8.bdf"));

    let missing = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(missing.to_string().contains("/definitely/not/here.toml"));
    let led: LedError = missing.into();
    assert!(matches!(led, LedError::Config(_)));
}
