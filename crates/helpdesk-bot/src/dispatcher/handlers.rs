//! One handler per command
//!
//! Arguments are checked before a session is opened. Each handler opens
//! one session, calls one engine command and drops the session before the
//! reply is sent.

use helpdesk_core::errors::{HdError, HelpdeskError};
use helpdesk_core::model::{TicketField, TicketId, TicketPatch};
use helpdesk_engine::commands;
use helpdesk_store::Storage;

use super::callback::CallbackAction;
use super::parse::{command_payload, parse_pipe_args};
use super::reply::{self, describe_error, Reply};

fn parse_ticket_id(raw: &str) -> Result<TicketId, HdError> {
    raw.trim().parse().map_err(|_| {
        HdError::from(HelpdeskError::InvalidTicketId {
            raw: raw.to_string(),
        })
    })
}

/// Build a ticket patch from `key=value` fields; unknown keys are skipped
pub fn patch_from_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> TicketPatch {
    let mut patch = TicketPatch::new();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        match TicketField::from_key(key) {
            Some(ticket_field) => patch.set(ticket_field, value.trim()),
            None => tracing::debug!(key = key.trim(), "ignoring unknown ticket field"),
        }
    }
    patch
}

pub fn add_user(storage: &Storage, text: &str) -> Reply {
    let args = parse_pipe_args(text, 2);
    let (name, email) = (&args[0], &args[1]);
    if name.is_empty() || email.is_empty() {
        return Reply::text(reply::USAGE_ADD_USER);
    }

    let result = storage
        .new_session()
        .and_then(|mut session| commands::user_create(&mut session, name, email));

    match result {
        Ok(user) => Reply::text(reply::user_created(&user)),
        Err(e) => Reply::text(format!("❌ Erro ao criar usuário: {}", describe_error(&e))),
    }
}

pub fn list_users(storage: &Storage) -> Reply {
    let result = storage
        .new_session()
        .and_then(|session| commands::user_list(&session));

    match result {
        Ok(users) if users.is_empty() => Reply::text(reply::NO_USERS),
        Ok(users) => Reply::text(reply::user_listing(&users)),
        Err(e) => Reply::text(format!("❌ Erro: {}", describe_error(&e))),
    }
}

pub fn new_ticket(storage: &Storage, text: &str) -> Reply {
    let args = parse_pipe_args(text, 3);
    let (email, title, description) = (&args[0], &args[1], &args[2]);
    if email.is_empty() || title.is_empty() {
        return Reply::text(reply::USAGE_NEW_TICKET);
    }

    let result = storage.new_session().and_then(|mut session| {
        commands::ticket_create_for_email(&mut session, email, title, description)
    });

    match result {
        Ok(Some(ticket)) => Reply::text(reply::ticket_created(&ticket)),
        Ok(None) => Reply::text(reply::OWNER_NOT_FOUND),
        Err(e) => Reply::text(format!("❌ Erro ao criar ticket: {}", describe_error(&e))),
    }
}

/// One message per ticket, each with its own buttons
pub fn list_tickets(storage: &Storage, text: &str) -> Vec<Reply> {
    let email = Some(command_payload(text)).filter(|e| !e.is_empty());

    let result = storage
        .new_session()
        .and_then(|session| commands::ticket_list(&session, email));

    match result {
        Ok(Some(tickets)) if tickets.is_empty() => vec![Reply::text(reply::NO_TICKETS)],
        Ok(Some(tickets)) => tickets.iter().map(Reply::ticket_card).collect(),
        Ok(None) => vec![Reply::text(reply::LIST_OWNER_NOT_FOUND)],
        Err(e) => vec![Reply::text(format!("❌ Erro: {}", describe_error(&e)))],
    }
}

/// `/atualizar_ticket id | k=v | k=v`; only the first two fields are read
pub fn update_ticket(storage: &Storage, text: &str) -> Reply {
    let args = parse_pipe_args(text, 3);
    if args[0].is_empty() {
        return Reply::text(reply::USAGE_UPDATE_TICKET);
    }

    let result = parse_ticket_id(&args[0]).and_then(|ticket_id| {
        let patch = patch_from_fields(args[1..].iter().map(String::as_str));
        let mut session = storage.new_session()?;
        commands::ticket_update(&mut session, ticket_id, &patch)
    });

    match result {
        Ok(Some(ticket)) => Reply::text(reply::ticket_updated(&ticket)),
        Ok(None) => Reply::text(reply::TICKET_NOT_FOUND),
        Err(e) => Reply::text(format!("❌ Erro: {}", describe_error(&e))),
    }
}

pub fn delete_ticket(storage: &Storage, text: &str) -> Reply {
    let raw = command_payload(text);
    if raw.is_empty() {
        return Reply::text(reply::USAGE_DELETE_TICKET);
    }

    let result = parse_ticket_id(raw).and_then(|ticket_id| {
        let mut session = storage.new_session()?;
        commands::ticket_delete(&mut session, ticket_id)
    });

    match result {
        Ok(true) => Reply::text(reply::DELETED),
        Ok(false) => Reply::text(reply::TICKET_NOT_FOUND),
        Err(e) => Reply::text(format!("❌ Erro: {}", describe_error(&e))),
    }
}

/// Carry out a button action; the button click was already acknowledged
pub fn apply_callback(storage: &Storage, action: CallbackAction) -> String {
    let result = storage.new_session().and_then(|mut session| match action {
        CallbackAction::Resolve(ticket_id) => commands::ticket_resolve(&mut session, ticket_id)
            .map(|ticket| match ticket {
                Some(ticket) => reply::ticket_resolved(&ticket),
                None => reply::TICKET_NOT_FOUND.to_string(),
            }),
        CallbackAction::Delete(ticket_id) => {
            commands::ticket_delete(&mut session, ticket_id).map(|removed| {
                if removed {
                    reply::TICKET_DELETED.to_string()
                } else {
                    reply::TICKET_NOT_FOUND.to_string()
                }
            })
        }
    });

    result.unwrap_or_else(|e| format!("❌ Erro: {}", describe_error(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_from_fields() {
        let patch = patch_from_fields(["status=em análise", "descricao = nova desc "]);
        assert_eq!(patch.status.as_deref(), Some("em análise"));
        assert_eq!(patch.description.as_deref(), Some("nova desc"));
    }

    #[test]
    fn test_patch_ignores_unknown_and_malformed() {
        let patch = patch_from_fields(["owner_id=9", "id=1", "status", ""]);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_parse_ticket_id() {
        assert_eq!(parse_ticket_id(" 12 ").unwrap(), 12);
        let err = parse_ticket_id("doze").unwrap_err();
        assert_eq!(err.entity_id(), Some("doze"));
    }
}
