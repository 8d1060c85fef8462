//! Helpdesk Bot - chat front end for the helpdesk store
//!
//! Provides:
//! - Command dispatcher: parsing, replies and inline ticket buttons
//! - Telegram Bot API transport (long polling) behind `ChatTransport`
//! - Polling runner with one task per update
//! - Process configuration and the demo walkthrough

pub mod config;
pub mod demo;
pub mod dispatcher;
pub mod runner;
pub mod telegram;

pub use config::BotConfig;
pub use dispatcher::{dispatch_callback, dispatch_text, Reply};
pub use telegram::{ChatTransport, TelegramClient};
