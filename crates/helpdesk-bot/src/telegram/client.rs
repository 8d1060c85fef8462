//! Telegram Bot API client over reqwest

use std::time::Duration;

use async_trait::async_trait;
use helpdesk_core::errors::{HdError, HdErrorKind};
use helpdesk_core_types::Sensitive;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{
    AnswerCallbackQueryRequest, ApiResponse, BotUser, EditMessageTextRequest, GetUpdatesRequest,
    SendMessageRequest, Update,
};
use super::{ChatTransport, Result};
use crate::dispatcher::Reply;

/// Extra time on top of the long-poll timeout before the HTTP request gives up
const HTTP_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    http: reqwest::Client,
    /// `<api_base>/bot<token>`; never logged
    endpoint: Sensitive<String>,
}

impl TelegramClient {
    /// # Errors
    ///
    /// `Configuration` if the HTTP client cannot be built.
    pub fn new(api_base: &str, token: &Sensitive<String>, poll_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + HTTP_GRACE)
            .build()
            .map_err(|e| {
                HdError::new(HdErrorKind::Configuration)
                    .with_op("telegram_client")
                    .with_message(e.to_string())
            })?;

        Ok(Self {
            http,
            endpoint: Sensitive::new(format!(
                "{}/bot{}",
                api_base.trim_end_matches('/'),
                token.expose()
            )),
        })
    }

    async fn call<B, T>(&self, method: &'static str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.endpoint.expose(), method);

        // without_url keeps the token out of error messages
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| external(method, e.without_url().to_string()))?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            HdError::new(HdErrorKind::Serialization)
                .with_op(method)
                .with_message(e.without_url().to_string())
        })?;

        if !envelope.ok {
            return Err(external(
                method,
                format!(
                    "{} {}",
                    status,
                    envelope.description.unwrap_or_default()
                ),
            ));
        }

        envelope
            .result
            .ok_or_else(|| external(method, "response without result".to_string()))
    }
}

fn external(method: &'static str, message: String) -> HdError {
    HdError::new(HdErrorKind::ExternalService)
        .with_op(method)
        .with_message(message)
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn get_me(&self) -> Result<BotUser> {
        self.call("getMe", &serde_json::json!({})).await
    }

    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message", "callback_query"],
        };
        self.call("getUpdates", &request).await
    }

    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let request = SendMessageRequest::from_reply(chat_id, reply);
        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_query_id: &str) -> Result<()> {
        let request = AnswerCallbackQueryRequest { callback_query_id };
        let _: serde_json::Value = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }

    async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        let request = EditMessageTextRequest {
            chat_id,
            message_id,
            text,
        };
        let _: serde_json::Value = self.call("editMessageText", &request).await?;
        Ok(())
    }
}
