use std::sync::Once;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use schedule_core::{update, AppState, DateRange, Effect, Msg, USAGE_TEXT};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bot_logging::initialize_for_tests);
}

fn command(state: AppState, chat_id: i64, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::CommandReceived {
            chat_id,
            text: text.to_string(),
        },
    )
}

fn range(from: u32, to: u32) -> DateRange {
    DateRange {
        from: NaiveDate::from_ymd_opt(2025, 3, from).unwrap(),
        to: NaiveDate::from_ymd_opt(2025, 3, to).unwrap(),
    }
}

#[test]
fn schedule_renders_the_cached_page() {
    init_logging();
    let (state, effects) = command(AppState::new(), 1, "/schedule");

    assert_eq!(effects, vec![Effect::RenderCached { chat_id: 1 }]);
    assert!(state.in_flight().is_none());
}

#[test]
fn bad_range_and_help_reply_with_usage() {
    init_logging();
    for text in ["/rasspisan 02.03.2025", "/start", "/help"] {
        let (state, effects) = command(AppState::new(), 5, text);
        assert_eq!(
            effects,
            vec![Effect::Reply {
                chat_id: 5,
                text: USAGE_TEXT.to_string(),
            }],
            "{text}"
        );
        assert_eq!(state, AppState::new());
    }
}

#[test]
fn plain_text_produces_nothing() {
    init_logging();
    let (state, effects) = command(AppState::new(), 1, "привет");
    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}

#[test]
fn range_starts_a_fetch_when_idle() {
    init_logging();
    let (state, effects) = command(AppState::new(), 1, "/rasspisan 02.03.2025 - 05.03.2025");

    assert_eq!(
        effects,
        vec![Effect::FetchRange {
            chat_id: 1,
            range: range(2, 5),
        }]
    );
    assert_eq!(state.in_flight().map(|fetch| fetch.chat_id), Some(1));
    assert_eq!(state.queued_len(), 0);
}

#[test]
fn ranges_arriving_during_a_fetch_wait_in_order() {
    init_logging();
    let (state, _) = command(AppState::new(), 1, "/rasspisan 02.03.2025 - 05.03.2025");
    let (state, effects) = command(state, 2, "/rasspisan 10.03.2025 - 12.03.2025");
    assert!(effects.is_empty());
    let (state, effects) = command(state, 3, "/rasspisan 13.03.2025 - 14.03.2025");
    assert!(effects.is_empty());
    assert_eq!(state.queued_len(), 2);

    let (state, effects) = update(state, Msg::RefreshFinished { chat_id: 1 });
    assert_eq!(
        effects,
        vec![Effect::FetchRange {
            chat_id: 2,
            range: range(10, 12),
        }]
    );
    assert_eq!(state.queued_len(), 1);

    let (state, effects) = update(state, Msg::RefreshFinished { chat_id: 2 });
    assert_eq!(
        effects,
        vec![Effect::FetchRange {
            chat_id: 3,
            range: range(13, 14),
        }]
    );

    let (state, effects) = update(state, Msg::RefreshFinished { chat_id: 3 });
    assert!(effects.is_empty());
    assert!(state.in_flight().is_none());
    assert_eq!(state, AppState::new());
}

#[test]
fn cached_render_does_not_wait_for_a_fetch() {
    init_logging();
    let (state, _) = command(AppState::new(), 1, "/rasspisan 02.03.2025 - 05.03.2025");
    let (state, effects) = command(state, 2, "/schedule");

    assert_eq!(effects, vec![Effect::RenderCached { chat_id: 2 }]);
    assert_eq!(state.queued_len(), 0);
}

#[test]
fn finish_for_another_chat_keeps_the_running_fetch() {
    init_logging();
    let (state, _) = command(AppState::new(), 1, "/rasspisan 02.03.2025 - 05.03.2025");
    let (state, _) = command(state, 2, "/rasspisan 10.03.2025 - 12.03.2025");

    let (state, effects) = update(state, Msg::RefreshFinished { chat_id: 2 });
    assert!(effects.is_empty());
    assert_eq!(state.in_flight().map(|fetch| fetch.chat_id), Some(1));
    assert_eq!(
        state.queued().map(|fetch| fetch.chat_id).collect::<Vec<_>>(),
        vec![2]
    );
}
