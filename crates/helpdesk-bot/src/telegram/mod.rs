//! Chat transport
//!
//! `ChatTransport` is the seam between the runner and the chat network.
//! `TelegramClient` implements it against the Telegram Bot API.

pub mod client;
pub mod types;

pub use client::TelegramClient;
pub use types::{BotUser, CallbackQuery, Chat, Message, Update};

use crate::dispatcher::Reply;
use async_trait::async_trait;
use helpdesk_core::errors::HdError;

pub type Result<T> = std::result::Result<T, HdError>;

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// The bot's own account; also proves the token is valid
    async fn get_me(&self) -> Result<BotUser>;

    /// Long-poll for updates with `update_id >= offset`
    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>>;

    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()>;

    /// Acknowledge a button click so the client stops its spinner
    async fn answer_callback(&self, callback_query_id: &str) -> Result<()>;

    async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()>;
}
