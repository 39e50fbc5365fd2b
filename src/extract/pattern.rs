//! First step of the date chain: `Month D, YYYY` text copied verbatim.

use super::{DateStrategy, MONTH_NAMES};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{MONTH_NAMES})\s+\d{{1,2}}(?:\s*,\s*|\s+)\d{{4}}\b")).unwrap()
});

/// Matches a month name, a one or two digit day, an optional comma and a
/// four digit year against the raw snippet. Case-sensitive; the matched
/// substring is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatch;

impl DateStrategy for PatternMatch {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, text: &str, _reference: NaiveDate) -> Option<String> {
        MONTH_DAY_YEAR.find(text).map(|m| m.as_str().to_string())
    }
}
