//! Data models for search hits and the event records built from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawResult`]: One search hit exactly as the provider returned it
//! - [`SearchResponse`]: The provider's JSON envelope around those hits
//! - [`Event`]: A search hit annotated with an extracted date and venue
//!
//! `Event` serializes with capitalized keys (`Title`, `Link`, `Date`, `Venue`)
//! because that is the shape consumers of the JSON file and the `/search`
//! endpoint read, hence the `#[serde(rename_all)]` attribute.

use serde::{Deserialize, Serialize};

/// Placeholder written into `Date` or `Venue` when no extraction method matched.
pub const UNKNOWN: &str = "Unknown";

/// A single search hit before field extraction.
///
/// Every field defaults to an empty string when the provider omits it; a hit
/// without a snippet is common and still produces an [`Event`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawResult {
    /// The page title shown by the provider.
    #[serde(default)]
    pub title: String,
    /// The absolute URL of the hit.
    #[serde(default)]
    pub link: String,
    /// The short text excerpt the provider matched against the query.
    #[serde(default)]
    pub snippet: String,
}

/// Body of a Custom Search JSON API response.
///
/// Only `items` is read. The provider leaves it out entirely when a query has
/// no hits, so it defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawResult>,
}

/// A normalized job fair record.
///
/// Exactly one `Event` is produced per [`RawResult`]. Records are never
/// deduplicated, so the same page can appear once per query that found it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Title of the search hit, unchanged.
    pub title: String,
    /// Link of the search hit, unchanged.
    pub link: String,
    /// Extracted date, or [`UNKNOWN`].
    pub date: String,
    /// Extracted venue, or [`UNKNOWN`].
    pub venue: String,
}

impl Event {
    /// Combine a raw hit with the fields extracted from its snippet.
    pub fn from_raw(raw: RawResult, date: String, venue: String) -> Self {
        Self {
            title: raw.title,
            link: raw.link,
            date,
            venue,
        }
    }
}

/// Events from one aggregation run, in query order.
pub type ResultSet = Vec<Event>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_capitalized_keys() {
        let event = Event {
            title: "Mega Job Fair".to_string(),
            link: "https://example.com/fair".to_string(),
            date: "March 15, 2025".to_string(),
            venue: "Pragati Maidan".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["Title"], "Mega Job Fair");
        assert_eq!(json["Link"], "https://example.com/fair");
        assert_eq!(json["Date"], "March 15, 2025");
        assert_eq!(json["Venue"], "Pragati Maidan");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_search_response_without_items() {
        let json = r#"{"kind": "customsearch#search", "searchInformation": {"totalResults": "0"}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_raw_result_missing_snippet() {
        let json = r#"{"title": "Campus Drive", "link": "https://example.com"}"#;
        let raw: RawResult = serde_json::from_str(json).unwrap();
        assert_eq!(raw.title, "Campus Drive");
        assert_eq!(raw.snippet, "");
    }

    #[test]
    fn test_event_from_raw() {
        let raw = RawResult {
            title: "Walk-in Drive".to_string(),
            link: "https://example.com/walkin".to_string(),
            snippet: "ignored".to_string(),
        };
        let event = Event::from_raw(raw, UNKNOWN.to_string(), "Chennai".to_string());
        assert_eq!(event.title, "Walk-in Drive");
        assert_eq!(event.date, "Unknown");
        assert_eq!(event.venue, "Chennai");
    }
}
