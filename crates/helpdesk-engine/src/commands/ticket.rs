//! Ticket command handlers with boundary logging.
//!
//! Chat users name ticket owners by email, so creation and listing resolve
//! the email first and report an unknown one as `None`.

use helpdesk_core::model::{NewTicket, Ticket, TicketId, TicketPatch, STATUS_RESOLVED};
use helpdesk_core::{log_op_end, log_op_error, log_op_start};
use helpdesk_store::errors::Result;
use helpdesk_store::{Session, TicketRepo, UserRepo};

/// Open a ticket for the user registered under `email`
///
/// Returns `None` when no user has that email; nothing is written then.
///
/// ## Errors
///
/// - `InvalidInput`: empty or oversized title
/// - `ForeignKeyViolation`: owner deleted between lookup and insert
pub fn ticket_create_for_email(
    session: &mut Session,
    email: &str,
    title: &str,
    description: &str,
) -> Result<Option<Ticket>> {
    log_op_start!("ticket_create", email = email);
    let start = std::time::Instant::now();

    let created = ticket_create_for_email_impl(session, email, title, description).map_err(|e| {
        log_op_error!(
            "ticket_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "ticket_create",
        duration_ms = start.elapsed().as_millis() as u64,
        ticket_id = created.as_ref().map(|t| t.id)
    );

    Ok(created)
}

fn ticket_create_for_email_impl(
    session: &mut Session,
    email: &str,
    title: &str,
    description: &str,
) -> Result<Option<Ticket>> {
    let Some(owner) = UserRepo::find_user_by_email(session, email)? else {
        return Ok(None);
    };

    let draft = NewTicket::new(title).with_description(description);
    TicketRepo::create_ticket(session, owner.id, &draft).map(Some)
}

/// List tickets, optionally only those owned by `owner_email`
///
/// Returns `None` when an owner email was given but matches no user.
pub fn ticket_list(session: &Session, owner_email: Option<&str>) -> Result<Option<Vec<Ticket>>> {
    log_op_start!("ticket_list", filtered = owner_email.is_some());
    let start = std::time::Instant::now();

    let tickets = ticket_list_impl(session, owner_email).map_err(|e| {
        log_op_error!(
            "ticket_list",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "ticket_list",
        duration_ms = start.elapsed().as_millis() as u64,
        count = tickets.as_ref().map(Vec::len)
    );

    Ok(tickets)
}

fn ticket_list_impl(session: &Session, owner_email: Option<&str>) -> Result<Option<Vec<Ticket>>> {
    match owner_email {
        None => TicketRepo::list_tickets(session).map(Some),
        Some(email) => match UserRepo::find_user_by_email(session, email)? {
            Some(owner) => TicketRepo::list_tickets_by_owner(session, owner.id).map(Some),
            None => Ok(None),
        },
    }
}

/// Apply a status/description patch
///
/// ## Errors
///
/// - `InvalidInput`: empty or oversized status
pub fn ticket_update(
    session: &mut Session,
    ticket_id: TicketId,
    patch: &TicketPatch,
) -> Result<Option<Ticket>> {
    log_op_start!("ticket_update", ticket_id = ticket_id);
    let start = std::time::Instant::now();

    let updated = TicketRepo::update_ticket(session, ticket_id, patch).map_err(|e| {
        log_op_error!(
            "ticket_update",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "ticket_update",
        duration_ms = start.elapsed().as_millis() as u64,
        found = updated.is_some()
    );

    Ok(updated)
}

/// Mark a ticket resolved
pub fn ticket_resolve(session: &mut Session, ticket_id: TicketId) -> Result<Option<Ticket>> {
    ticket_update(session, ticket_id, &TicketPatch::new().status(STATUS_RESOLVED))
}

pub fn ticket_delete(session: &mut Session, ticket_id: TicketId) -> Result<bool> {
    log_op_start!("ticket_delete", ticket_id = ticket_id);
    let start = std::time::Instant::now();

    let removed = TicketRepo::delete_ticket(session, ticket_id).map_err(|e| {
        log_op_error!(
            "ticket_delete",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "ticket_delete",
        duration_ms = start.elapsed().as_millis() as u64,
        found = removed
    );

    Ok(removed)
}
