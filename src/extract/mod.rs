//! Field extraction from search snippets.
//!
//! A snippet is free text, so the date and venue of an event are recovered
//! heuristically:
//!
//! | Field | Method |
//! |-------|--------|
//! | Date  | Ordered fallback chain of [`DateStrategy`] implementations |
//! | Venue | Single regex pass, see [`extract_venue`] |
//!
//! # Date Chain
//!
//! Strategies are tried in [`DATE_STRATEGY_ORDER`]; the first one to return a
//! value wins and later ones are not consulted:
//!
//! 1. [`PatternMatch`]: `March 15, 2025` style text, returned verbatim
//! 2. [`StructuredParse`]: calendar dates in other layouts, reformatted
//! 3. [`HeuristicParse`]: relative phrases such as `next Friday`, reformatted
//!
//! Reformatted dates use `DD Month YYYY` (`05 March 2025`). When nothing
//! matches, the field is [`UNKNOWN`].

use crate::models::UNKNOWN;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::{debug, warn};

pub mod heuristic;
pub mod pattern;
pub mod structured;

pub use heuristic::HeuristicParse;
pub use pattern::PatternMatch;
pub use structured::StructuredParse;

/// Names of the date strategies, in the order the chain consults them.
pub const DATE_STRATEGY_ORDER: [&str; 3] = ["pattern", "structured", "heuristic"];

/// English month names, full or abbreviated, with a capitalized first letter.
/// Prefix the pattern with `(?i)` for case-insensitive use.
pub(crate) const MONTH_NAMES: &str = "Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";

/// Output layout for reformatted dates.
pub(crate) const DATE_FORMAT: &str = "%d %B %Y";

static VENUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:at|in|venue)(?::\s*|\s+)([A-Z][a-z]+(?: [A-Z][a-z]+)*)").unwrap()
});

/// One way of finding a date in a snippet.
pub trait DateStrategy: Send + Sync {
    /// Short identifier used in logs and in [`DATE_STRATEGY_ORDER`].
    fn name(&self) -> &'static str;

    /// Whether the strategy can run at all. An unavailable strategy is
    /// skipped by the chain as if it found nothing.
    fn is_available(&self) -> bool {
        true
    }

    /// Look for a date in `text`. `reference` is "today" for strategies that
    /// fill in a missing year or resolve relative phrases.
    fn extract(&self, text: &str, reference: NaiveDate) -> Option<String>;
}

/// Dates and venue recovered from one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub date: String,
    pub venue: String,
}

impl ExtractedFields {
    fn unknown() -> Self {
        Self {
            date: UNKNOWN.to_string(),
            venue: UNKNOWN.to_string(),
        }
    }
}

/// Ordered list of date strategies, evaluated left to right.
pub struct DateChain {
    strategies: Vec<Box<dyn DateStrategy>>,
}

impl DateChain {
    /// The standard chain: pattern, structured, then the given heuristic parser.
    pub fn standard(heuristic: HeuristicParse) -> Self {
        if let Some(reason) = heuristic.unavailable_reason() {
            warn!(%reason, "Heuristic date parsing unavailable; chain stops at structured parse");
        }
        Self {
            strategies: vec![
                Box::new(PatternMatch),
                Box::new(StructuredParse),
                Box::new(heuristic),
            ],
        }
    }

    /// Strategy names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// First date any available strategy finds, or `None`.
    pub fn resolve(&self, text: &str, reference: NaiveDate) -> Option<String> {
        self.strategies
            .iter()
            .filter(|s| s.is_available())
            .find_map(|s| {
                let found = s.extract(text, reference).filter(|d| d != UNKNOWN);
                if let Some(ref date) = found {
                    debug!(strategy = s.name(), %date, "Date strategy matched");
                }
                found
            })
    }
}

impl fmt::Debug for DateChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateChain")
            .field("strategies", &self.names())
            .finish()
    }
}

/// Derives `Date` and `Venue` for an [`Event`](crate::models::Event).
#[derive(Debug)]
pub struct FieldExtractor {
    dates: DateChain,
}

impl FieldExtractor {
    /// Build the standard extractor. With `heuristic_dates` false the
    /// natural-language step is present but reports itself unavailable.
    pub fn new(heuristic_dates: bool) -> Self {
        let heuristic = if heuristic_dates {
            HeuristicParse::new()
        } else {
            HeuristicParse::disabled()
        };
        Self {
            dates: DateChain::standard(heuristic),
        }
    }

    /// Extract fields using today's local date as the reference.
    pub fn extract(&self, snippet: &str) -> ExtractedFields {
        self.extract_on(snippet, Local::now().date_naive())
    }

    /// Extract fields relative to an explicit reference date.
    pub fn extract_on(&self, snippet: &str, reference: NaiveDate) -> ExtractedFields {
        if snippet.trim().is_empty() {
            return ExtractedFields::unknown();
        }
        ExtractedFields {
            date: self
                .dates
                .resolve(snippet, reference)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            venue: extract_venue(snippet).unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// Capitalized words following the first `at`, `in` or `venue` trigger.
///
/// The trigger is case-sensitive and not part of the result. Only the first
/// match in the text is considered.
pub fn extract_venue(text: &str) -> Option<String> {
    VENUE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Month number (1-12) for an English month name or abbreviation.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
