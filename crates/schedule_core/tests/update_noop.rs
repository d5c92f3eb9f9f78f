use schedule_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn stray_refresh_finished_is_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::RefreshFinished { chat_id: 7 });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
