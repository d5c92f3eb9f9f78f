use std::sync::Arc;

use bot_logging::bot_warn;
use schedule_core::ChatId;

use crate::telegram::{ParseMode, TelegramClient};

/// A "loading" message shown while a fetch runs.
///
/// Call [`ProgressNotice::dismiss`] to remove it before answering. If the
/// notice is dropped instead (early return, panic) the deletion is spawned
/// on the current runtime.
pub struct ProgressNotice {
    telegram: Arc<TelegramClient>,
    chat_id: ChatId,
    message_id: Option<i64>,
}

impl ProgressNotice {
    /// Post `text` to the chat. Returns `None` when the message could not be
    /// sent; the caller carries on without a notice.
    pub async fn show(telegram: Arc<TelegramClient>, chat_id: ChatId, text: &str) -> Option<Self> {
        match telegram.send_message(chat_id, text, ParseMode::Plain).await {
            Ok(message_id) => Some(Self {
                telegram,
                chat_id,
                message_id: Some(message_id),
            }),
            Err(err) => {
                bot_warn!("failed to post progress message to chat {}: {}", chat_id, err);
                None
            }
        }
    }

    pub async fn dismiss(mut self) {
        if let Some(message_id) = self.message_id.take() {
            delete(&self.telegram, self.chat_id, message_id).await;
        }
    }
}

impl Drop for ProgressNotice {
    fn drop(&mut self) {
        let Some(message_id) = self.message_id.take() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            bot_warn!("no runtime to remove progress message {}", message_id);
            return;
        };
        let telegram = Arc::clone(&self.telegram);
        let chat_id = self.chat_id;
        runtime.spawn(async move { delete(&telegram, chat_id, message_id).await });
    }
}

async fn delete(telegram: &TelegramClient, chat_id: ChatId, message_id: i64) {
    if let Err(err) = telegram.delete_message(chat_id, message_id).await {
        bot_warn!("failed to remove progress message {}: {}", message_id, err);
    }
}
