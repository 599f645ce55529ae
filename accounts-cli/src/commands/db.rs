//! Table setup without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use accounts_server::db::{schema, PgAccountStore};

use super::DEFAULT_DATABASE_URI;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URI", default_value = DEFAULT_DATABASE_URI)]
    pub database_uri: String,

    /// Drop the accounts table first, deleting every row
    #[arg(long)]
    pub reset: bool,
}

/// Create (or recreate) the accounts table
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    // connect() already creates the table when it is missing
    let store = PgAccountStore::connect(&args.database_uri, 1)
        .await
        .context("Failed to connect to accounts database")?;

    if args.reset {
        schema::reset(store.pool())
            .await
            .context("Failed to recreate accounts table")?;
    }

    tracing::info!("accounts table ready");
    Ok(())
}
