//! starfav - people/planets favorites API server
//!
//! Single entry point: parses flags and environment (a `.env` file is
//! honoured), sets up tracing and serves the API until Ctrl+C / SIGTERM.

use anyhow::Result;
use clap::Parser;

mod serve;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "starfav",
    author,
    version,
    about = "JSON API for a people and planets catalog with per-user favorites"
)]
struct Cli {
    /// Debug logging when RUST_LOG is not set
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    serve: serve::ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment wins either way
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    serve::run_serve(cli.serve).await
}
