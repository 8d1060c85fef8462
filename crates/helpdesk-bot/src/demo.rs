//! Demo walkthrough: seeds sample users and tickets and exercises every
//! kind of write once. Existing sample users are reused, so it can run
//! against the same database more than once.

use helpdesk_core::errors::HdError;
use helpdesk_core::model::{NewTicket, TicketPatch, User, UserPatch, STATUS_RESOLVED};
use helpdesk_engine::commands;
use helpdesk_store::{Session, Storage, TicketRepo, UserRepo};

fn find_or_create_user(session: &mut Session, name: &str, email: &str) -> Result<User, HdError> {
    match UserRepo::find_user_by_email(session, email)? {
        Some(user) => Ok(user),
        None => commands::user_create(session, name, email),
    }
}

/// Run the walkthrough and return the lines to print
///
/// # Errors
///
/// Propagates any store failure.
pub fn run_demo(storage: &Storage) -> Result<Vec<String>, HdError> {
    let mut session = storage.new_session()?;
    let mut lines = Vec::new();

    let luis = find_or_create_user(&mut session, "Luís", "luis@exemplo.com")?;
    find_or_create_user(&mut session, "Jamilly", "jamilly@exemplo.com")?;

    let t1 = TicketRepo::create_ticket(
        &mut session,
        luis.id,
        &NewTicket::new("Erro NF-e").with_description("CEAN inválido"),
    )?;
    let t2 = TicketRepo::create_ticket(
        &mut session,
        luis.id,
        &NewTicket::new("Falha na impressão")
            .with_description("Impressora Zebra")
            .with_status("em análise"),
    )?;

    let users: Vec<String> = commands::user_list(&session)?
        .iter()
        .map(|u| format!("({}, {}, {})", u.id, u.name, u.email))
        .collect();
    lines.push(format!("Usuários: [{}]", users.join(", ")));

    let tickets: Vec<String> = TicketRepo::list_tickets_by_owner(&session, luis.id)?
        .iter()
        .map(|t| format!("({}, {}, {})", t.id, t.title, t.status))
        .collect();
    lines.push(format!("Tickets do Luís: [{}]", tickets.join(", ")));

    if let Some(user) =
        commands::user_update(&mut session, luis.id, &UserPatch::new().name("Luís Eduardo"))?
    {
        lines.push(format!("Usuário {} renomeado para {}", user.id, user.name));
    }

    let patch = TicketPatch::new()
        .status(STATUS_RESOLVED)
        .description("Cliente atualizou CEAN");
    if let Some(ticket) = commands::ticket_update(&mut session, t1.id, &patch)? {
        lines.push(format!("Ticket #{} agora {}", ticket.id, ticket.status));
    }

    if commands::ticket_delete(&mut session, t2.id)? {
        lines.push(format!("Ticket #{} deletado", t2.id));
    }

    Ok(lines)
}
