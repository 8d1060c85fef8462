//! Helpdesk Engine - Orchestration layer
//!
//! Provides the command handlers the bot calls: each wraps one repository
//! operation with lifecycle logging and resolves ticket owners by email.

pub mod commands;
