use std::collections::VecDeque;

use crate::DateRange;

/// Telegram chat identifier.
pub type ChatId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub chat_id: ChatId,
    pub range: DateRange,
}

/// At most one fetch runs at a time; later range requests wait in arrival
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    in_flight: Option<PendingFetch>,
    queue: VecDeque<PendingFetch>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> Option<&PendingFetch> {
        self.in_flight.as_ref()
    }

    pub fn queued(&self) -> impl Iterator<Item = &PendingFetch> {
        self.queue.iter()
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Start `fetch` now if nothing is running, otherwise queue it.
    /// Returns the fetch to start, if any.
    pub(crate) fn submit(&mut self, fetch: PendingFetch) -> Option<PendingFetch> {
        if self.in_flight.is_some() {
            self.queue.push_back(fetch);
            None
        } else {
            self.in_flight = Some(fetch);
            Some(fetch)
        }
    }

    /// Mark the running fetch for `chat_id` as done and promote the next one.
    pub(crate) fn finish(&mut self, chat_id: ChatId) -> Option<PendingFetch> {
        match self.in_flight {
            Some(running) if running.chat_id == chat_id => {
                self.in_flight = self.queue.pop_front();
                self.in_flight
            }
            _ => None,
        }
    }
}
