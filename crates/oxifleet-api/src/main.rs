//! Service entry point for `oxifleet-api`.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use oxifleet::logging::Verbosity;
use oxifleet::{init_logging, Config, Dataset};
use oxifleet_api::{router, ServiceState};

/// oxifleet-api - Read-only collection-query service
#[derive(Debug, Parser)]
#[command(name = "oxifleet-api")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    // Load the document once at startup; a resident service caches where
    // the serverless original re-read per invocation.
    let dataset = match &config.api.dataset_path {
        Some(path) => {
            info!("serving dataset from {}", path.display());
            Dataset::from_path(path)?
        }
        None => {
            info!("serving built-in seed dataset");
            Dataset::seed()
        }
    };

    let state = ServiceState::new(dataset, config.api.route_prefix.clone());
    let app = router(state);

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
