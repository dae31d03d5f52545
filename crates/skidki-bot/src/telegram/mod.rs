//! Minimal client for the Telegram Bot API.
//!
//! Covers the methods the menu flow needs: `getMe` at startup,
//! `getUpdates` long polling, `sendMessage` with an inline keyboard,
//! `deleteMessage` and `answerCallbackQuery`. Every response is a JSON envelope whose `ok` flag
//! is checked before the `result` is returned.

mod types;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User,
};
use types::{
    AnswerCallbackQueryRequest, ApiResponse, DeleteMessageRequest, EmptyRequest,
    GetUpdatesRequest, SendMessageRequest,
};

/// Headroom on top of the long-poll timeout before the HTTP request gives up.
const POLL_TIMEOUT_SLACK_SECS: u64 = 10;

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Errors returned by the Bot API client.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network or TLS failure. The request URL is stripped because it
    /// embeds the bot token.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The API answered with `"ok": false`.
    #[error("Telegram API error in {method}: {description}")]
    Api { method: String, description: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Telegram API URL '{0}'")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// Client for the Telegram Bot API.
///
/// The API root is configurable so tests can point it at a mock server.
pub struct TelegramClient {
    client: Client,
    base_url: Url,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Creates a client for the API rooted at `api_url`, usually
    /// `https://api.telegram.org`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`TelegramError::InvalidBaseUrl`] if `api_url` does
    /// not form a valid URL.
    pub fn with_base_url(
        token: &str,
        poll_timeout_secs: u64,
        api_url: &str,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(
                poll_timeout_secs.saturating_add(POLL_TIMEOUT_SLACK_SECS),
            ))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Methods are joined onto `{api}/bot{token}/`, so the trailing slash
        // must be present.
        let base = format!("{}/bot{token}/", api_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&base).map_err(|_| TelegramError::InvalidBaseUrl(api_url.to_owned()))?;

        Ok(Self {
            client,
            base_url,
            poll_timeout_secs,
        })
    }

    /// Returns the bot's own account. Also confirms the token is valid.
    ///
    /// # Errors
    ///
    /// See [`TelegramClient::get_updates`].
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &EmptyRequest {}).await
    }

    /// Long-polls for new updates starting at `offset`.
    ///
    /// # Errors
    ///
    /// - [`TelegramError::Http`] on network failure.
    /// - [`TelegramError::Api`] if the API rejects the call.
    /// - [`TelegramError::Deserialize`] if the payload does not match.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &request).await
    }

    /// Sends a text message, optionally with an inline keyboard.
    ///
    /// # Errors
    ///
    /// See [`TelegramClient::get_updates`].
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: keyboard,
        };
        self.call("sendMessage", &request).await
    }

    /// Deletes a message previously sent by the bot.
    ///
    /// # Errors
    ///
    /// See [`TelegramClient::get_updates`]. Deleting an already deleted or
    /// too old message surfaces as [`TelegramError::Api`].
    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TelegramError> {
        let request = DeleteMessageRequest {
            chat_id,
            message_id,
        };
        self.call::<_, bool>("deleteMessage", &request).await?;
        Ok(())
    }

    /// Acknowledges a button press so the client stops its progress spinner.
    ///
    /// # Errors
    ///
    /// See [`TelegramClient::get_updates`].
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), TelegramError> {
        let request = AnswerCallbackQueryRequest { callback_query_id };
        self.call::<_, bool>("answerCallbackQuery", &request).await?;
        Ok(())
    }

    /// POSTs `params` as JSON to `method` and unwraps the response envelope.
    ///
    /// Non-2xx statuses are not treated as transport errors: the API still
    /// returns an envelope with `ok: false` and a description, which is more
    /// useful than the bare status.
    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(method)
            .map_err(|_| TelegramError::InvalidBaseUrl(method.to_owned()))?;

        let response = self.client.post(url).json(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| TelegramError::Deserialize {
                context: format!("{method} (HTTP {status})"),
                source: e,
            })?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                method: method.to_owned(),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {status}")),
            });
        }

        envelope.result.ok_or_else(|| TelegramError::Api {
            method: method.to_owned(),
            description: "response has no result".to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
