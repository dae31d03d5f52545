mod bot;
mod commands;
mod controller;
mod menu;
mod session;
mod telegram;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "skidki-bot")]
#[command(about = "Weekly discounts from Pyaterochka and Magnit, served over Telegram")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the Telegram bot (default when no command is given)
    Run,
    /// List the sections on a merchant's discount page
    Sections {
        /// Merchant key (e.g., magnit)
        merchant: String,
    },
    /// Print the discount report for one section
    Report {
        /// Merchant key (e.g., pyaterochka)
        merchant: String,
        /// Section id as printed by `sections`
        section: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = skidki_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let merchants = match &config.merchants_path {
        Some(path) => skidki_core::load_merchants(path)?,
        None => skidki_core::default_merchants(),
    };
    tracing::debug!(?config, merchants = merchants.merchants.len(), "configuration loaded");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => bot::run_bot(&config, merchants).await?,
        Commands::Sections { merchant } => commands::run_sections(&merchants, &merchant).await?,
        Commands::Report { merchant, section } => {
            commands::run_report(&merchants, &merchant, &section, config.max_message_len).await?;
        }
    }

    Ok(())
}
