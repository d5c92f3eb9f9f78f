use crate::ChatId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A text message arrived in a chat.
    CommandReceived { chat_id: ChatId, text: String },
    /// The fetch started for `chat_id` has finished, successfully or not.
    RefreshFinished { chat_id: ChatId },
    /// Fallback for updates the bot does not act on.
    NoOp,
}
