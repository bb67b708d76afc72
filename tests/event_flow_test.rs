//! Async flow test: fetch completions travel the event channel from a
//! spawned task and land in the view state, the same path the interactive
//! loop drives.

use countryscope::services::fetcher::{decode_countries, FetchError};
use countryscope::state::{Status, ViewState};
use countryscope::ui::events::AppEvent;
use tokio::sync::mpsc;

#[tokio::test]
async fn spawned_fetch_completion_reaches_the_view_state() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut state = ViewState::new();
    state.begin_refresh();
    assert_eq!(state.status(), Status::Loading);

    tokio::spawn(async move {
        let result = decode_countries(r#"[{"name": "Fiji", "population": 900000}]"#)
            .map_err(FetchError::from);
        let _ = tx.send(AppEvent::FetchCompleted(result));
    });

    match rx.recv().await.expect("completion event") {
        AppEvent::FetchCompleted(result) => state.apply_fetch(result),
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(state.status(), Status::Idle);
    assert!(state.has_loaded());
    assert_eq!(state.records().len(), 1);
    assert_eq!(state.records()[0].name, "Fiji");
}

#[tokio::test]
async fn spawned_fetch_failure_reaches_the_view_state_as_an_error() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut state = ViewState::new();
    state.apply_fetch(Ok(
        decode_countries(r#"[{"name": "Malta", "population": 520000}]"#).unwrap(),
    ));
    state.begin_refresh();

    tokio::spawn(async move {
        let _ = tx.send(AppEvent::FetchCompleted(Err(FetchError::Status(503))));
    });

    match rx.recv().await.expect("completion event") {
        AppEvent::FetchCompleted(result) => state.apply_fetch(result),
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(state.status(), Status::Error);
    assert!(state.last_error().is_some());
    // Previous records survive the failed refresh.
    assert_eq!(state.records().len(), 1);
}
