use super::*;

#[test]
fn fire_sends_session_id_once() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scope = CancellationToken::new();
    let done = Completion::new(SessionId::new(4), scope, tx);
    assert_eq!(done.session().get(), 4);

    assert!(done.fire());
    assert_eq!(rx.try_recv().unwrap(), SessionId::new(4));
    assert!(rx.try_recv().is_err());
}

#[test]
fn fire_after_cancel_is_dropped() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scope = CancellationToken::new();
    let done = Completion::new(SessionId::new(1), scope.clone(), tx);
    scope.cancel();

    assert!(!done.fire());
    assert!(rx.try_recv().is_err());
}

#[test]
fn fire_without_engine_reports_failure() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let done = Completion::new(SessionId::new(2), CancellationToken::new(), tx);
    assert!(!done.fire());
}

#[test]
fn ids_display_with_hash() {
    assert_eq!(SessionId::new(12).to_string(), "#12");
}
