//! Runs the query set through the search client and field extractor.
//!
//! Queries are processed strictly one after another. After every query,
//! whether it returned hits, nothing, or failed, the aggregator sleeps for the
//! configured delay so the provider's rate limit is respected.
//!
//! Runs started concurrently (overlapping `/search` requests, or a request
//! arriving during the startup run) wait for one another, so the provider
//! never sees more than one query per delay period.

use crate::config::Config;
use crate::extract::FieldExtractor;
use crate::models::{Event, ResultSet};
use crate::search::SearchClient;
use crate::utils::truncate_for_log;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Builds a fresh [`ResultSet`] on every [`run`](Aggregator::run).
#[derive(Debug)]
pub struct Aggregator {
    client: SearchClient,
    extractor: FieldExtractor,
    delay: Duration,
    gate: Mutex<()>,
}

impl Aggregator {
    pub fn new(client: SearchClient, extractor: FieldExtractor, delay: Duration) -> Self {
        Self {
            client,
            extractor,
            delay,
            gate: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SearchClient::from_config(config),
            FieldExtractor::new(config.heuristic_dates),
            config.query_delay,
        )
    }

    /// Search every query in order and annotate each hit.
    ///
    /// Every hit becomes exactly one [`Event`]; nothing is dropped or merged.
    /// Failed queries contribute no events. An empty query list yields an
    /// empty result set.
    #[instrument(level = "info", skip_all, fields(queries = queries.len()))]
    pub async fn run(&self, queries: &[String]) -> ResultSet {
        let _running = self.gate.lock().await;
        let t0 = Instant::now();
        let mut results = ResultSet::new();

        for (i, query) in queries.iter().enumerate() {
            let hits = self.client.search(query).await;
            let hit_count = hits.len();

            for raw in hits {
                let fields = self.extractor.extract(&raw.snippet);
                debug!(
                    title = %truncate_for_log(&raw.title, 80),
                    date = %fields.date,
                    venue = %fields.venue,
                    "Extracted fields"
                );
                results.push(Event::from_raw(raw, fields.date, fields.venue));
            }

            info!(index = i, %query, hits = hit_count, total = results.len(), "Processed query");
            sleep(self.delay).await;
        }

        info!(
            events = results.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Aggregation complete"
        );
        results
    }
}
