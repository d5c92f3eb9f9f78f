use crate::{parse_command, AppState, Command, Effect, Msg, PendingFetch, USAGE_TEXT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CommandReceived { chat_id, text } => match parse_command(&text) {
            Some(Command::Schedule) => vec![Effect::RenderCached { chat_id }],
            Some(Command::Range(range)) => state
                .submit(PendingFetch { chat_id, range })
                .map(fetch_effect)
                .into_iter()
                .collect(),
            Some(Command::InvalidRange) | Some(Command::Help) => vec![Effect::Reply {
                chat_id,
                text: USAGE_TEXT.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::RefreshFinished { chat_id } => {
            state.finish(chat_id).map(fetch_effect).into_iter().collect()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_effect(fetch: PendingFetch) -> Effect {
    Effect::FetchRange {
        chat_id: fetch.chat_id,
        range: fetch.range,
    }
}
