//! Command dispatcher
//!
//! Turns one chat message (or one button click) into replies. Everything
//! here is synchronous and opens its own store session, so the runner calls
//! it on the blocking pool.
//!
//! Every failure becomes a reply; nothing in here returns an error.

pub mod callback;
pub mod handlers;
pub mod parse;
pub mod reply;

pub use callback::CallbackAction;
pub use parse::{command_payload, parse_command, parse_pipe_args, Command};
pub use reply::{InlineButton, Reply};

use helpdesk_store::Storage;

/// Handle an incoming text message
///
/// Plain text gets the help message; an unknown command, or one addressed
/// to another bot, gets no reply. `bot_username` is this bot's own name.
pub fn dispatch_text(storage: &Storage, bot_username: Option<&str>, text: &str) -> Vec<Reply> {
    let Some(command) = parse_command(text, bot_username) else {
        return vec![Reply::text(reply::HELP_TEXT)];
    };

    match command {
        Command::Start => vec![Reply::text(reply::HELP_TEXT)],
        Command::AddUser => vec![handlers::add_user(storage, text)],
        Command::Users => vec![handlers::list_users(storage)],
        Command::NewTicket => vec![handlers::new_ticket(storage, text)],
        Command::Tickets => handlers::list_tickets(storage, text),
        Command::UpdateTicket => vec![handlers::update_ticket(storage, text)],
        Command::DeleteTicket => vec![handlers::delete_ticket(storage, text)],
        Command::Unknown(name) => {
            tracing::debug!(command = name, "ignoring unknown command");
            Vec::new()
        }
        Command::AddressedElsewhere(target) => {
            tracing::debug!(target_bot = target, "ignoring command for another bot");
            Vec::new()
        }
    }
}

/// Handle the data of a pressed inline button; returns the text that
/// replaces the button's message
pub fn dispatch_callback(storage: &Storage, data: &str) -> String {
    match CallbackAction::parse(data) {
        Some(action) => handlers::apply_callback(storage, action),
        None => reply::INVALID_ACTION.to_string(),
    }
}
