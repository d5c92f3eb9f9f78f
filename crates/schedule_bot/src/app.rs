use std::sync::Arc;
use std::time::Duration;

use bot_logging::{bot_debug, bot_info, bot_warn};
use schedule_core::{update, AppState, Msg};
use schedule_engine::ScheduleEngine;
use tokio::sync::mpsc;

use crate::effects::EffectRunner;
use crate::telegram::{TelegramClient, Update};

/// Pause after a failed `getUpdates` before polling again.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Run the bot until the update stream ends.
///
/// Telegram updates and effect completions both arrive as [`Msg`]s on one
/// channel; this loop is the only owner of [`AppState`].
pub async fn run(engine: Arc<ScheduleEngine>, telegram: Arc<TelegramClient>) {
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();
    let runner = EffectRunner::new(engine, Arc::clone(&telegram), msg_tx.clone());
    tokio::spawn(poll_updates(telegram, msg_tx));

    let mut state = AppState::new();
    while let Some(msg) = msg_rx.recv().await {
        let (next, effects) = update(state, msg);
        state = next;
        if state.queued_len() > 0 {
            bot_debug!("{} range request(s) waiting", state.queued_len());
        }
        runner.enqueue(effects);
    }
}

async fn poll_updates(telegram: Arc<TelegramClient>, msg_tx: mpsc::UnboundedSender<Msg>) {
    let mut offset = 0;
    bot_info!("polling for updates");
    loop {
        let updates = match telegram.get_updates(offset).await {
            Ok(updates) => updates,
            Err(err) => {
                bot_warn!("getUpdates failed: {}", err);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };
        for update in updates {
            offset = update.update_id + 1;
            if msg_tx.send(to_msg(update)).is_err() {
                return;
            }
        }
    }
}

fn to_msg(update: Update) -> Msg {
    match update.message {
        Some(message) => match message.text {
            Some(text) => Msg::CommandReceived {
                chat_id: message.chat.id,
                text,
            },
            None => Msg::NoOp,
        },
        None => Msg::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::{Chat, Message};

    #[test]
    fn text_messages_become_commands() {
        let update = Update {
            update_id: 1,
            message: Some(Message {
                message_id: 3,
                chat: Chat { id: -100 },
                text: Some("/schedule".to_string()),
            }),
        };
        assert_eq!(
            to_msg(update),
            Msg::CommandReceived {
                chat_id: -100,
                text: "/schedule".to_string(),
            }
        );
    }

    #[test]
    fn other_updates_are_ignored() {
        let no_text = Update {
            update_id: 2,
            message: Some(Message {
                message_id: 4,
                chat: Chat { id: 5 },
                text: None,
            }),
        };
        assert_eq!(to_msg(no_text), Msg::NoOp);
        assert_eq!(
            to_msg(Update {
                update_id: 3,
                message: None
            }),
            Msg::NoOp
        );
    }
}
