use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LedError::resolution("x")
            .to_string()
            .contains("resolution error:")
    );
    assert!(LedError::content("x").to_string().contains("content error:"));
    assert!(LedError::font("x").to_string().contains("font error:"));
    assert!(LedError::sink("x").to_string().contains("sink error:"));
    assert!(LedError::config("x").to_string().contains("config error:"));
    assert_eq!(
        LedError::SessionLost(7).to_string(),
        "render session 7 lost the screen"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LedError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert_transparently() {
    let err: LedError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, LedError::Io(_)));
    assert_eq!(err.to_string(), "gone");
}
