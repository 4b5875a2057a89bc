//! userctl - sequential CRUD demonstration against a user store
//!
//! Runs a fixed eleven-step create/read/update/delete sequence through
//! the userctl-core data-access layer, logging each step, and releases
//! the store session on every exit path.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use userctl_core::{create_pool, ensure_schema, UserRepo};

mod runner;
mod tracing_setup;

use tracing_setup::TracingConfig;

/// Connection string when neither --database-url nor DATABASE_URL is set.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/userctl";

#[derive(Parser, Debug)]
#[command(
    name = "userctl",
    author,
    version,
    about = "Run a fixed CRUD sequence against the user store",
    long_about = "Executes eleven create/read/update/delete steps against a relational user \
                  store in strict order, logging each outcome, then releases the store \
                  session whether the sequence completed or aborted."
)]
struct Cli {
    /// Postgres connection string (falls back to a localhost default)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Suppress per-step logging, keep warnings and errors
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Best effort; a missing .env is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init_tracing(&TracingConfig {
        quiet: cli.quiet,
        debug: cli.debug,
    })?;

    let database_url = cli
        .database_url
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let pool = create_pool(&database_url)
        .await
        .context("failed to connect to the user store")?;

    // The session is open from here on; every path below releases it
    // exactly once before the process exits.
    let outcome = async {
        ensure_schema(&pool).await?;
        let repo = UserRepo::new(&pool);
        runner::run_sequence(&repo).await
    }
    .await;

    match &outcome {
        Ok(()) => info!("crud sequence completed"),
        Err(err) => error!(%err, "crud sequence aborted"),
    }

    pool.close().await;
    info!("store connection released");

    outcome.map_err(Into::into)
}
