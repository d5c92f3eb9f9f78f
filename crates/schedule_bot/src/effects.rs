use std::sync::Arc;

use bot_logging::{bot_error, bot_info, bot_warn};
use schedule_core::{ChatId, DateRange, Effect, Msg};
use schedule_engine::{LogProgressSink, RenderedMessage, ScheduleEngine, MAX_MESSAGE_CHARS};
use tokio::sync::mpsc;

use crate::progress::ProgressNotice;
use crate::telegram::{ParseMode, TelegramClient};

pub const PROGRESS_TEXT: &str = "Загрузка расписания...";

/// Executes core effects against the schedule engine and Telegram.
#[derive(Clone)]
pub struct EffectRunner {
    engine: Arc<ScheduleEngine>,
    telegram: Arc<TelegramClient>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl EffectRunner {
    pub fn new(
        engine: Arc<ScheduleEngine>,
        telegram: Arc<TelegramClient>,
        msg_tx: mpsc::UnboundedSender<Msg>,
    ) -> Self {
        Self {
            engine,
            telegram,
            msg_tx,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let runner = self.clone();
            tokio::spawn(async move { runner.run(effect).await });
        }
    }

    async fn run(&self, effect: Effect) {
        match effect {
            Effect::Reply { chat_id, text } => {
                self.send(chat_id, &text, ParseMode::Plain).await;
            }
            Effect::RenderCached { chat_id } => {
                bot_info!("RenderCached chat_id={}", chat_id);
                let message = self.engine.render_cached().await;
                self.deliver(chat_id, &message).await;
            }
            Effect::FetchRange { chat_id, range } => {
                let _finished = RefreshFinishedGuard::new(chat_id, self.msg_tx.clone());
                self.fetch_range(chat_id, range).await;
            }
        }
    }

    async fn fetch_range(&self, chat_id: ChatId, range: DateRange) {
        let (from, to) = (range.from_label(), range.to_label());
        bot_info!("FetchRange chat_id={} from={} to={}", chat_id, from, to);

        let notice = ProgressNotice::show(Arc::clone(&self.telegram), chat_id, PROGRESS_TEXT).await;
        let result = self
            .engine
            .fetch_and_render(&from, &to, &LogProgressSink)
            .await;
        if let Some(notice) = notice {
            notice.dismiss().await;
        }

        match result {
            Ok(message) => self.deliver(chat_id, &message).await,
            Err(err) => {
                bot_error!("schedule refresh for chat {} failed: {}", chat_id, err);
                let text = format!("Ошибка при получении расписания: {err}");
                self.send(chat_id, &text, ParseMode::Plain).await;
            }
        }
    }

    /// Send a rendered message in as many HTML chunks as it takes. Stops at
    /// the first chunk Telegram refuses so the chat never gets a gap.
    async fn deliver(&self, chat_id: ChatId, message: &RenderedMessage) {
        let chunks = message.to_chunks(MAX_MESSAGE_CHARS);
        let total = chunks.len();
        for (index, chunk) in chunks.iter().enumerate() {
            if !self.send(chat_id, chunk, ParseMode::Html).await {
                bot_warn!("delivery to chat {} stopped at chunk {}/{}", chat_id, index + 1, total);
                return;
            }
        }
    }

    async fn send(&self, chat_id: ChatId, text: &str, mode: ParseMode) -> bool {
        match self.telegram.send_message(chat_id, text, mode).await {
            Ok(_) => true,
            Err(err) => {
                bot_error!("failed to send message to chat {}: {}", chat_id, err);
                false
            }
        }
    }
}

/// Reports [`Msg::RefreshFinished`] when dropped, so the core starts the
/// next queued fetch even if the running one panicked.
struct RefreshFinishedGuard {
    chat_id: ChatId,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl RefreshFinishedGuard {
    fn new(chat_id: ChatId, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self { chat_id, msg_tx }
    }
}

impl Drop for RefreshFinishedGuard {
    fn drop(&mut self) {
        // A closed channel means the bot is shutting down.
        let _ = self.msg_tx.send(Msg::RefreshFinished {
            chat_id: self.chat_id,
        });
    }
}
