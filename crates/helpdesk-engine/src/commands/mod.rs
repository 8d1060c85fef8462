//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for helpdesk operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod ticket;
pub mod user;

pub use ticket::{
    ticket_create_for_email, ticket_delete, ticket_list, ticket_resolve, ticket_update,
};
pub use user::{user_create, user_delete, user_list, user_update};
