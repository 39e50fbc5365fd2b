//! # Job Fair Feed
//!
//! Collects job fair, campus recruitment and walk-in drive listings from a
//! web-search API, pulls an event date and venue out of each result's snippet,
//! and publishes the records as a JSON file and over HTTP.
//!
//! ## Usage
//!
//! ```sh
//! SEARCH_API_KEY=... SEARCH_ENGINE_ID=... job_fair_feed
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Search**: Send each phrase of the query set to the search provider
//! 2. **Extract**: Derive `Date` and `Venue` from every hit's snippet
//! 3. **Aggregate**: Concatenate events in query order, pausing between queries
//! 4. **Output**: Write the startup run to a JSON file, then serve `GET /search`

use std::error::Error;
use std::sync::Arc;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod extract;
mod models;
mod outputs;
mod queries;
mod search;
mod server;
mod utils;

use aggregate::Aggregator;
use clap::Parser;
use cli::Cli;
use config::Config;
use outputs::json;
use server::{AppState, create_router};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("job_fair_feed starting up");

    // .env is optional
    if let Ok(path) = dotenvy::dotenv() {
        info!(path = %path.display(), "Loaded .env file");
    }

    // Parse CLI and build the one config value everything else borrows
    let args = Cli::parse();
    let config = match Config::from_cli(args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration; refusing to start");
            return Err(e.into());
        }
    };
    info!(?config, "Configuration loaded");

    let aggregator = Arc::new(Aggregator::from_config(&config));

    // ---- Startup run ----
    if config.run_on_startup {
        let events = aggregator.run(&config.queries).await;
        info!(count = events.len(), "Startup aggregation finished");

        if let Err(e) = json::write_results(&events, &config.output_file).await {
            error!(path = %config.output_file.display(), error = %e, "Failed to write results file");
        } else {
            info!(path = %config.output_file.display(), "JSON file saved");
        }
    } else {
        info!("Startup aggregation disabled");
    }

    // ---- HTTP server ----
    if config.serve {
        let state = AppState::new(Arc::clone(&aggregator), config.queries.clone());
        server::serve(&config.bind, create_router(state)).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
