//! Helpdesk Store - SQLite persistence for users and tickets
//!
//! Provides:
//! - `Storage` handle, per-task `Session`s and `UnitOfWork` transaction guards
//! - Embedded schema migrations with checksums
//! - Repository functions for users and tickets (cascade delete included)

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use db::{Session, Storage, UnitOfWork, DEFAULT_DB_PATH};
pub use errors::Result;
pub use repo::{TicketRepo, UserRepo};
