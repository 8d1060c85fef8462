//! Helpdesk Core - record model and shared facilities
//!
//! This crate provides the pieces every other helpdesk crate builds on:
//! - User and Ticket records plus the enumerated patches used to update them
//! - Validation rules applied before anything reaches the store
//! - The structured error facility (`HdError`) and domain errors
//! - The logging facility (`init`, `log_op_*` macros, test capture)

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{HdError, HdErrorKind, HelpdeskError, Result};
pub use model::{
    NewTicket, Ticket, TicketField, TicketId, TicketPatch, User, UserId, UserPatch, STATUS_OPEN,
    STATUS_RESOLVED,
};
