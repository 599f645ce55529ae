//! accounts CLI - runs the Account REST service
//!
//! - `serve`: HTTP API over Postgres (or `--in-memory`)
//! - `init-db`: create the accounts table

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "accounts", version, about = "Account REST API service")]
struct Cli {
    /// Debug logging when RUST_LOG is not set
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Create the accounts table in the configured database
    InitDb(commands::db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::InitDb(args) => commands::run_init_db(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
