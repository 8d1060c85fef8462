//! Helpdesk bot CLI
//!
//! Command-line entry point for the helpdesk Telegram bot

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "helpdesk-bot")]
#[command(about = "Helpdesk ticketing bot for Telegram", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll Telegram and answer commands
    Run(commands::run::RunArgs),
    /// Seed sample users and tickets and print them
    Demo(commands::demo::DemoArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,
        Commands::Demo(args) => commands::demo::execute(args),
    }
}
