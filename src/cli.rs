//! Command-line interface definitions for the job fair feed.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables,
//! and a `.env` file in the working directory is loaded before parsing.

use clap::Parser;
use clap::builder::BoolishValueParser;
use std::path::PathBuf;

/// Default Custom Search JSON API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Command-line arguments for the job fair feed.
///
/// The two secrets are declared optional here so that a missing value is
/// reported by [`crate::config::Config::from_cli`] with the name of the
/// environment variable to set.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment, fetch once at startup, then serve
/// SEARCH_API_KEY=... SEARCH_ENGINE_ID=... job_fair_feed
///
/// # Serve only, no startup fetch
/// job_fair_feed --run-on-startup false
///
/// # Fetch once into a custom file and exit
/// job_fair_feed --serve false -o ./fairs.json
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Search provider API key
    #[arg(long, env = "SEARCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search engine (scope) identifier
    #[arg(long, env = "SEARCH_ENGINE_ID", hide_env_values = true)]
    pub engine_id: Option<String>,

    /// Run every query once at startup and write the results file
    #[arg(
        long,
        env = "RUN_ON_STARTUP",
        default_value = "true",
        value_parser = BoolishValueParser::new(),
        action = clap::ArgAction::Set
    )]
    pub run_on_startup: bool,

    /// Start the HTTP server after the startup run
    #[arg(
        long,
        env = "SERVE",
        default_value = "true",
        value_parser = BoolishValueParser::new(),
        action = clap::ArgAction::Set
    )]
    pub serve: bool,

    /// File the startup run writes its results to
    #[arg(short, long, env = "OUTPUT_FILE", default_value = "job_mela_results.json")]
    pub output_file: PathBuf,

    /// Address the HTTP server listens on
    #[arg(short, long, env = "BIND_ADDR", default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// Pause after each query, in milliseconds
    #[arg(long, env = "QUERY_DELAY_MS", default_value_t = 1000)]
    pub query_delay_ms: u64,

    /// Search API endpoint
    #[arg(long, env = "SEARCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// YAML file with the search phrases to use instead of the built-in list
    #[arg(short, long, env = "QUERIES_FILE")]
    pub queries_file: Option<PathBuf>,

    /// Skip natural-language date parsing
    #[arg(long, env = "NO_HEURISTIC_DATES")]
    pub no_heuristic_dates: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["job_fair_feed", "--api-key", "k", "--engine-id", "cx"]);

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.engine_id.as_deref(), Some("cx"));
        assert!(cli.run_on_startup);
        assert!(cli.serve);
        assert_eq!(cli.output_file, PathBuf::from("job_mela_results.json"));
        assert_eq!(cli.bind, "127.0.0.1:5000");
        assert_eq!(cli.query_delay_ms, 1000);
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert!(!cli.no_heuristic_dates);
    }

    #[test]
    fn test_cli_boolish_flags() {
        let cli = Cli::parse_from([
            "job_fair_feed",
            "--run-on-startup",
            "no",
            "--serve",
            "0",
        ]);

        assert!(!cli.run_on_startup);
        assert!(!cli.serve);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "job_fair_feed",
            "-o",
            "/tmp/fairs.json",
            "-b",
            "0.0.0.0:8080",
            "-q",
            "queries.yaml",
        ]);

        assert_eq!(cli.output_file, PathBuf::from("/tmp/fairs.json"));
        assert_eq!(cli.bind, "0.0.0.0:8080");
        assert_eq!(cli.queries_file, Some(PathBuf::from("queries.yaml")));
    }
}
