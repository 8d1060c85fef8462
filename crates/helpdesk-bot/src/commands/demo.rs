//! Demo walkthrough against a local database
//!
//! Usage: helpdesk-bot demo [--db PATH]

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use helpdesk_bot::config::ENV_DB_PATH;
use helpdesk_core::logging_facility::{self, Profile};
use helpdesk_store::{Storage, DEFAULT_DB_PATH};

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Database file
    #[arg(long, env = ENV_DB_PATH, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
}

/// Execute demo command
pub fn execute(args: DemoArgs) -> anyhow::Result<()> {
    logging_facility::init(Profile::Development);

    let storage = Storage::open(&args.db)
        .with_context(|| format!("cannot open {}", args.db.display()))?;

    for line in helpdesk_bot::demo::run_demo(&storage)? {
        println!("{}", line);
    }

    storage.close()?;
    Ok(())
}
