//! Tally command-line client
//!
//! Main entry point for adding, editing, and browsing ledger transactions
//! against the bookkeeping backend.

mod cli;
mod commands;
mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_client::ApiClient;
use tally_shared::AppConfig;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_cli=info,tally_core=info,tally_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    debug!(base_url = %config.api.base_url, "Configuration loaded");

    let client = Arc::new(ApiClient::new(&config.api)?);

    match cli.command {
        Commands::Ping => commands::ping(&client).await,
        Commands::Accounts => commands::accounts(&client).await,
        Commands::Currencies => commands::currencies(&client).await,
        Commands::Categories => commands::categories(&client).await,
        Commands::Classifications { account } => commands::classifications(&client, account).await,
        Commands::Link {
            account,
            classification,
        } => commands::link(&client, account, classification).await,
        Commands::Unlink {
            account,
            classification,
        } => commands::unlink(&client, account, classification).await,
        Commands::Transactions => commands::transactions(&client).await,
        Commands::Show { id } => commands::show(client, &config.cache, id).await,
        Commands::Add(args) => commands::add(client, &config.cache, args).await,
        Commands::Edit {
            id,
            description,
            date,
        } => commands::edit(client, &config.cache, id, description, date).await,
    }
}
