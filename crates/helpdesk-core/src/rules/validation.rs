//! Field validation applied before any store access
//!
//! Limits mirror the column widths the helpdesk schema has always used.
//! SQLite does not enforce declared lengths, so they are enforced here.

use crate::errors::{HelpdeskError, Result};
use crate::model::{NewTicket, TicketPatch, UserPatch};

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_EMAIL_LEN: usize = 180;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_STATUS_LEN: usize = 50;

fn required(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HelpdeskError::EmptyField { field });
    }
    if value.chars().count() > max {
        return Err(HelpdeskError::FieldTooLong { field, max });
    }
    Ok(())
}

pub fn validate_user_name(name: &str) -> Result<()> {
    required("name", name, MAX_NAME_LEN)
}

pub fn validate_email(email: &str) -> Result<()> {
    required("email", email, MAX_EMAIL_LEN)
}

pub fn validate_title(title: &str) -> Result<()> {
    required("title", title, MAX_TITLE_LEN)
}

/// Status is free text, but not blank
pub fn validate_status(status: &str) -> Result<()> {
    required("status", status, MAX_STATUS_LEN)
}

/// Validate the inputs of `create_user`
pub fn validate_user(name: &str, email: &str) -> Result<()> {
    validate_user_name(name)?;
    validate_email(email)
}

pub fn validate_user_patch(patch: &UserPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        validate_user_name(name)?;
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    Ok(())
}

/// Validate a ticket draft. The description may be empty.
pub fn validate_new_ticket(ticket: &NewTicket) -> Result<()> {
    validate_title(&ticket.title)?;
    validate_status(&ticket.status)
}

pub fn validate_ticket_patch(patch: &TicketPatch) -> Result<()> {
    if let Some(status) = &patch.status {
        validate_status(status)?;
    }
    Ok(())
}
