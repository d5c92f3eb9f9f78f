use crate::{ChatId, DateRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send plain text back to the chat.
    Reply { chat_id: ChatId, text: String },
    /// Render the cached schedule page into the chat.
    RenderCached { chat_id: ChatId },
    /// Fetch the schedule for `range`, replace the cached page and render it.
    /// The runner answers with [`crate::Msg::RefreshFinished`].
    FetchRange { chat_id: ChatId, range: DateRange },
}
