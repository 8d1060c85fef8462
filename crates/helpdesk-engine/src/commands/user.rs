//! User command handlers with boundary logging.

use helpdesk_core::model::{User, UserId, UserPatch};
use helpdesk_core::{log_op_end, log_op_error, log_op_start};
use helpdesk_store::errors::Result;
use helpdesk_store::{Session, UserRepo};

/// Create a user
///
/// ## Errors
///
/// - `InvalidInput`: empty or oversized name/email
/// - `UniqueConstraintViolation`: email already registered
pub fn user_create(session: &mut Session, name: &str, email: &str) -> Result<User> {
    log_op_start!("user_create", email = email);
    let start = std::time::Instant::now();

    let user = UserRepo::create_user(session, name, email).map_err(|e| {
        log_op_error!(
            "user_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "user_create",
        duration_ms = start.elapsed().as_millis() as u64,
        user_id = user.id
    );

    Ok(user)
}

/// List all users ordered by id
pub fn user_list(session: &Session) -> Result<Vec<User>> {
    log_op_start!("user_list");
    let start = std::time::Instant::now();

    let users = UserRepo::list_users(session).map_err(|e| {
        log_op_error!(
            "user_list",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "user_list",
        duration_ms = start.elapsed().as_millis() as u64,
        count = users.len()
    );

    Ok(users)
}

/// Update a user's name and/or email
///
/// Returns `None` when no user has `user_id`.
///
/// ## Errors
///
/// - `InvalidInput`: patch sets an empty or oversized value
/// - `UniqueConstraintViolation`: new email already registered
pub fn user_update(
    session: &mut Session,
    user_id: UserId,
    patch: &UserPatch,
) -> Result<Option<User>> {
    log_op_start!("user_update", user_id = user_id);
    let start = std::time::Instant::now();

    let updated = UserRepo::update_user(session, user_id, patch).map_err(|e| {
        log_op_error!(
            "user_update",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "user_update",
        duration_ms = start.elapsed().as_millis() as u64,
        found = updated.is_some()
    );

    Ok(updated)
}

/// Delete a user and, by cascade, all of their tickets
pub fn user_delete(session: &mut Session, user_id: UserId) -> Result<bool> {
    log_op_start!("user_delete", user_id = user_id);
    let start = std::time::Instant::now();

    let removed = UserRepo::delete_user(session, user_id).map_err(|e| {
        log_op_error!(
            "user_delete",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "user_delete",
        duration_ms = start.elapsed().as_millis() as u64,
        found = removed
    );

    Ok(removed)
}
