//! User persistence

use crate::db::Session;
use crate::errors::{from_rusqlite, Result};
use helpdesk_core::model::{User, UserId, UserPatch};
use helpdesk_core::rules::{validate_user, validate_user_patch};
use rusqlite::{Connection, OptionalExtension, Row};

/// SQLite repository for users
pub struct UserRepo;

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

fn select_user(conn: &Connection, user_id: UserId) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, name, email FROM users WHERE id = ?1",
        [user_id],
        user_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

impl UserRepo {
    /// Insert a user and return it with its assigned id
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty or oversized name/email,
    /// `UniqueConstraintViolation` when the email is taken.
    pub fn create_user(session: &mut Session, name: &str, email: &str) -> Result<User> {
        validate_user(name, email)?;

        let uow = session.unit_of_work()?;
        uow.conn()
            .execute(
                "INSERT INTO users (name, email) VALUES (?1, ?2)",
                rusqlite::params![name, email],
            )
            .map_err(|e| {
                from_rusqlite(e)
                    .with_op("create_user")
                    .with_field("email")
                    .with_entity_id(email)
            })?;
        let id = uow.conn().last_insert_rowid();
        uow.commit()?;

        tracing::debug!(user_id = id, "user inserted");
        Ok(User::new(id, name, email))
    }

    /// Get a user by ID
    pub fn get_user(session: &Session, user_id: UserId) -> Result<Option<User>> {
        select_user(session.conn(), user_id)
    }

    /// Get a user by exact email
    pub fn find_user_by_email(session: &Session, email: &str) -> Result<Option<User>> {
        session
            .conn()
            .query_row(
                "SELECT id, name, email FROM users WHERE email = ?1",
                [email],
                user_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    /// All users in creation order
    pub fn list_users(session: &Session) -> Result<Vec<User>> {
        let mut stmt = session
            .conn()
            .prepare("SELECT id, name, email FROM users ORDER BY id")
            .map_err(from_rusqlite)?;

        let users = stmt
            .query_map([], user_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(users)
    }

    /// Apply a patch; `None` when the user does not exist
    ///
    /// # Errors
    ///
    /// `InvalidInput` for invalid patch values,
    /// `UniqueConstraintViolation` when the new email is taken.
    pub fn update_user(
        session: &mut Session,
        user_id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>> {
        validate_user_patch(patch)?;

        let uow = session.unit_of_work()?;
        let Some(mut user) = select_user(uow.conn(), user_id)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(user));
        }

        patch.apply_to(&mut user);
        uow.conn()
            .execute(
                "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
                rusqlite::params![user.name, user.email, user.id],
            )
            .map_err(|e| {
                from_rusqlite(e)
                    .with_op("update_user")
                    .with_field("email")
                    .with_entity_id(user.email.clone())
            })?;
        uow.commit()?;

        Ok(Some(user))
    }

    /// Delete a user together with all of their tickets
    ///
    /// Returns `false` when no such user exists.
    pub fn delete_user(session: &mut Session, user_id: UserId) -> Result<bool> {
        let uow = session.unit_of_work()?;
        let removed = uow
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", [user_id])
            .map_err(from_rusqlite)?;
        uow.commit()?;

        if removed > 0 {
            tracing::debug!(user_id, "user deleted with owned tickets");
        }
        Ok(removed > 0)
    }

    pub fn count_users(session: &Session) -> Result<i64> {
        session
            .conn()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(from_rusqlite)
    }
}
