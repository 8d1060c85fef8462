//! Adoption of databases written by the first (SQLAlchemy) helpdesk bot
//!
//! That bot stored users in `usuarios(id, nome, email)` and tickets in
//! `tickets(id, titulo, descricao, status, usuario_id)` without ever
//! enforcing its foreign key. Before the initial schema is created the old
//! tables are moved aside; afterwards their rows are copied into `users` and
//! `tickets` with their ids, and the old tables are dropped. Tickets whose
//! owner no longer exists cannot satisfy the new foreign key and are skipped.

use crate::errors::{from_rusqlite, legacy_schema_error, Result};
use rusqlite::{Connection, OptionalExtension};

/// What was moved aside by [`stash`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyTables {
    pub has_tickets: bool,
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(from_rusqlite)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    conn.query_row(
        "SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(from_rusqlite)
}

/// Move the old tables out of the way; `None` when there is nothing to adopt
///
/// # Errors
///
/// `StorageUnavailable` when `usuarios` exists next to a `tickets` table
/// that has no `usuario_id` column.
pub fn stash(conn: &Connection) -> Result<Option<LegacyTables>> {
    if !table_exists(conn, "usuarios")? || table_exists(conn, "users")? {
        return Ok(None);
    }

    let has_tickets = table_exists(conn, "tickets")?;
    if has_tickets && !column_exists(conn, "tickets", "usuario_id")? {
        return Err(legacy_schema_error(
            "table 'usuarios' found, but 'tickets' has no 'usuario_id' column",
        ));
    }

    if has_tickets {
        conn.execute_batch("ALTER TABLE tickets RENAME TO legacy_tickets")
            .map_err(from_rusqlite)?;
    }
    conn.execute_batch("ALTER TABLE usuarios RENAME TO legacy_usuarios")
        .map_err(from_rusqlite)?;

    tracing::debug!(has_tickets, "legacy tables moved aside");
    Ok(Some(LegacyTables { has_tickets }))
}

/// Copy the stashed rows into the new tables and drop the old ones
///
/// # Errors
///
/// Propagates SQLite failures; the surrounding migration rolls back.
pub fn import(conn: &Connection, tables: LegacyTables) -> Result<()> {
    let users = conn
        .execute(
            "INSERT INTO users (id, name, email)
             SELECT id, nome, email FROM legacy_usuarios ORDER BY id",
            [],
        )
        .map_err(from_rusqlite)?;

    let mut tickets = 0;
    let mut skipped: i64 = 0;
    if tables.has_tickets {
        skipped = conn
            .query_row(
                "SELECT COUNT(*) FROM legacy_tickets
                 WHERE usuario_id IS NULL OR usuario_id NOT IN (SELECT id FROM users)",
                [],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;

        tickets = conn
            .execute(
                "INSERT INTO tickets (id, title, description, status, owner_id)
                 SELECT id, titulo, COALESCE(descricao, ''),
                        COALESCE(NULLIF(status, ''), 'aberto'), usuario_id
                 FROM legacy_tickets
                 WHERE usuario_id IN (SELECT id FROM users)
                 ORDER BY id",
                [],
            )
            .map_err(from_rusqlite)?;

        conn.execute_batch("DROP TABLE legacy_tickets")
            .map_err(from_rusqlite)?;
    }
    conn.execute_batch("DROP TABLE legacy_usuarios")
        .map_err(from_rusqlite)?;

    if skipped > 0 {
        tracing::warn!(skipped, "legacy tickets without an owner were not imported");
    }
    tracing::info!(users, tickets, "legacy database adopted");
    Ok(())
}
