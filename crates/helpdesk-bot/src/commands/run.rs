//! Run the bot
//!
//! Usage: helpdesk-bot run [--db PATH] [--log-profile development|production]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, ValueEnum};
use helpdesk_bot::{runner, BotConfig, TelegramClient};
use helpdesk_core::logging_facility::{self, Profile};
use helpdesk_store::Storage;
use tokio::signal;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Database file (overrides HELPDESK_DB_PATH)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "development")]
    pub log_profile: LogProfile,
}

/// Execute run command
pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    logging_facility::init(args.log_profile.into());

    let mut config = BotConfig::from_env().context("Defina TELEGRAM_TOKEN no .env")?;
    if let Some(db) = args.db {
        config.db_path = db;
    }

    let storage = Storage::open(&config.db_path)
        .with_context(|| format!("cannot open {}", config.db_path.display()))?;
    let client = TelegramClient::new(&config.api_base, &config.token, config.poll_timeout())?;

    println!("Bot rodando. Pressione Ctrl+C para sair.");
    runner::run(
        Arc::new(client),
        storage,
        config.poll_timeout_secs,
        shutdown_signal(),
    )
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
