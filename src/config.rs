//! Runtime configuration assembled once at process start.
//!
//! [`Config`] is built from the parsed [`Cli`] and then passed by reference to
//! the components that need it. Nothing below `main` reads the environment.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::queries::{DEFAULT_QUERIES, load_queries};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Everything the pipeline and server need to run.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub engine_id: String,
    pub endpoint: Url,
    pub queries: Vec<String>,
    pub query_delay: Duration,
    pub run_on_startup: bool,
    pub serve: bool,
    pub output_file: PathBuf,
    pub bind: String,
    pub heuristic_dates: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("engine_id", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("queries", &self.queries.len())
            .field("query_delay", &self.query_delay)
            .field("run_on_startup", &self.run_on_startup)
            .field("serve", &self.serve)
            .field("output_file", &self.output_file)
            .field("bind", &self.bind)
            .field("heuristic_dates", &self.heuristic_dates)
            .finish()
    }
}

impl Config {
    /// Validate CLI input and load the query set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingSecret`] if the API key or engine id is absent or blank
    /// - [`ConfigError::InvalidEndpoint`] if the endpoint does not parse as a URL
    /// - [`ConfigError::QueriesRead`] / [`ConfigError::QueriesParse`] for a bad queries file
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let api_key = required(cli.api_key, "SEARCH_API_KEY")?;
        let engine_id = required(cli.engine_id, "SEARCH_ENGINE_ID")?;

        let endpoint = Url::parse(&cli.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: cli.endpoint.clone(),
            source,
        })?;

        let queries = match &cli.queries_file {
            Some(path) => load_queries(path)?,
            None => DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
        };

        Ok(Self {
            api_key,
            engine_id,
            endpoint,
            queries,
            query_delay: Duration::from_millis(cli.query_delay_ms),
            run_on_startup: cli.run_on_startup,
            serve: cli.serve,
            output_file: cli.output_file,
            bind: cli.bind,
            heuristic_dates: !cli.no_heuristic_dates,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingSecret(name)),
    }
}
