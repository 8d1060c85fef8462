//! Ticket persistence

use crate::db::Session;
use crate::errors::{from_rusqlite, Result};
use helpdesk_core::model::{NewTicket, Ticket, TicketId, TicketPatch, UserId};
use helpdesk_core::rules::{validate_new_ticket, validate_ticket_patch};
use rusqlite::{Connection, OptionalExtension, Row};

const TICKET_COLUMNS: &str = "id, title, description, status, owner_id";

/// SQLite repository for tickets
pub struct TicketRepo;

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        owner_id: row.get(4)?,
    })
}

fn select_ticket(conn: &Connection, ticket_id: TicketId) -> Result<Option<Ticket>> {
    conn.query_row(
        &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
        [ticket_id],
        ticket_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

fn query_tickets(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Ticket>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;

    let tickets = stmt
        .query_map(params, ticket_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(tickets)
}

impl TicketRepo {
    /// Insert a ticket for an existing owner
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty or oversized title/status,
    /// `ForeignKeyViolation` when `owner_id` names no user.
    pub fn create_ticket(
        session: &mut Session,
        owner_id: UserId,
        draft: &NewTicket,
    ) -> Result<Ticket> {
        validate_new_ticket(draft)?;

        let uow = session.unit_of_work()?;
        uow.conn()
            .execute(
                "INSERT INTO tickets (title, description, status, owner_id)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![draft.title, draft.description, draft.status, owner_id],
            )
            .map_err(|e| {
                from_rusqlite(e)
                    .with_op("create_ticket")
                    .with_field("owner_id")
                    .with_entity_id(owner_id.to_string())
            })?;
        let id = uow.conn().last_insert_rowid();
        uow.commit()?;

        tracing::debug!(ticket_id = id, owner_id, "ticket inserted");
        Ok(Ticket {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status.clone(),
            owner_id,
        })
    }

    /// Get a ticket by ID
    pub fn get_ticket(session: &Session, ticket_id: TicketId) -> Result<Option<Ticket>> {
        select_ticket(session.conn(), ticket_id)
    }

    /// All tickets in creation order
    pub fn list_tickets(session: &Session) -> Result<Vec<Ticket>> {
        query_tickets(
            session.conn(),
            &format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id"),
            [],
        )
    }

    /// Tickets of one owner; empty for an unknown owner
    pub fn list_tickets_by_owner(session: &Session, owner_id: UserId) -> Result<Vec<Ticket>> {
        query_tickets(
            session.conn(),
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE owner_id = ?1 ORDER BY id"),
            [owner_id],
        )
    }

    /// Apply a patch; `None` when the ticket does not exist
    ///
    /// Only status and description can change. An empty patch returns the
    /// ticket untouched.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty or oversized status.
    pub fn update_ticket(
        session: &mut Session,
        ticket_id: TicketId,
        patch: &TicketPatch,
    ) -> Result<Option<Ticket>> {
        validate_ticket_patch(patch)?;

        let uow = session.unit_of_work()?;
        let Some(mut ticket) = select_ticket(uow.conn(), ticket_id)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(ticket));
        }

        patch.apply_to(&mut ticket);
        uow.conn()
            .execute(
                "UPDATE tickets SET status = ?1, description = ?2 WHERE id = ?3",
                rusqlite::params![ticket.status, ticket.description, ticket.id],
            )
            .map_err(from_rusqlite)?;
        uow.commit()?;

        Ok(Some(ticket))
    }

    /// Delete a ticket; `false` when it does not exist
    pub fn delete_ticket(session: &mut Session, ticket_id: TicketId) -> Result<bool> {
        let uow = session.unit_of_work()?;
        let removed = uow
            .conn()
            .execute("DELETE FROM tickets WHERE id = ?1", [ticket_id])
            .map_err(from_rusqlite)?;
        uow.commit()?;

        Ok(removed > 0)
    }

    pub fn count_tickets(session: &Session) -> Result<i64> {
        session
            .conn()
            .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))
            .map_err(from_rusqlite)
    }
}
