//! Minimal Telegram Bot API client: long polling, sending and deleting
//! messages.

use std::time::Duration;

use bot_logging::bot_debug;
use schedule_core::ChatId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request to {method} failed: {source}")]
    Transport {
        method: &'static str,
        source: reqwest::Error,
    },
    #[error("{method} rejected ({code}): {description}")]
    Api {
        method: &'static str,
        code: i64,
        description: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    disable_web_page_preview: bool,
}

#[derive(Debug, Serialize)]
struct DeleteMessage {
    chat_id: ChatId,
    message_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Plain,
    Html,
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    /// `api_url` is the Bot API root, e.g. `https://api.telegram.org`.
    pub fn new(
        api_url: &str,
        token: &str,
        poll_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TelegramError> {
        // Long polls hold the connection for up to `poll_timeout`.
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + request_timeout)
            .build()
            .map_err(|err| TelegramError::Client(err.to_string()))?;
        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            poll_timeout,
        })
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdates {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: ["message"],
        };
        self.call("getUpdates", &body).await
    }

    /// Send `text` to `chat_id`; returns the id of the sent message.
    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        mode: ParseMode,
    ) -> Result<i64, TelegramError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: match mode {
                ParseMode::Plain => None,
                ParseMode::Html => Some("HTML"),
            },
            disable_web_page_preview: true,
        };
        let sent: Message = self.call("sendMessage", &body).await?;
        Ok(sent.message_id)
    }

    pub async fn delete_message(&self, chat_id: ChatId, message_id: i64) -> Result<(), TelegramError> {
        let body = DeleteMessage {
            chat_id,
            message_id,
        };
        let _deleted: bool = self.call("deleteMessage", &body).await?;
        Ok(())
    }

    async fn call<B, T>(&self, method: &'static str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        bot_debug!("telegram call {}", method);
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
            .map_err(|source| TelegramError::Transport { method, source })?;

        // Error statuses still carry the JSON envelope with a description.
        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|source| TelegramError::Transport { method, source })?;
        unwrap_envelope(method, status.as_u16(), envelope)
    }
}

fn unwrap_envelope<T>(
    method: &'static str,
    status: u16,
    envelope: ApiResponse<T>,
) -> Result<T, TelegramError> {
    match envelope {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse {
            error_code,
            description,
            ..
        } => Err(TelegramError::Api {
            method,
            code: error_code.unwrap_or(i64::from(status)),
            description: description.unwrap_or_else(|| "no result".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_envelope_keeps_the_api_description() {
        let envelope: ApiResponse<bool> = serde_json::from_str(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: message to delete not found"}"#,
        )
        .unwrap();
        let err = unwrap_envelope("deleteMessage", 400, envelope).unwrap_err();
        assert_eq!(
            err.to_string(),
            "deleteMessage rejected (400): Bad Request: message to delete not found"
        );
    }

    #[test]
    fn updates_without_text_still_parse() {
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{"ok":true,"result":[
                {"update_id":10,"message":{"message_id":1,"chat":{"id":-100,"type":"group"},"text":"/schedule"}},
                {"update_id":11,"message":{"message_id":2,"chat":{"id":5,"type":"private"},"photo":[]}},
                {"update_id":12,"edited_message":{"message_id":3}}
            ]}"#,
        )
        .unwrap();
        let updates = unwrap_envelope("getUpdates", 200, envelope).unwrap();
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].message.as_ref().unwrap().chat.id, -100);
        assert_eq!(updates[1].message.as_ref().unwrap().text, None);
        assert_eq!(updates[2].message, None);
    }
}
