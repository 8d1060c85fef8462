//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums
//! - Idempotent application
//! - Embedded SQL migrations
//! - Adoption of databases left by the first bot

mod checksums;
mod embedded;
mod legacy;
mod runner;

pub use runner::apply_migrations;
