//! Repository layer for persisting users and tickets to SQLite
//!
//! Each write runs in its own unit of work and commits before returning.
//! Absence is reported as `None`/`false`, never as an error.

pub mod ticket_repo;
pub mod user_repo;

pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
