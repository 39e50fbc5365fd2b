//! Second step of the date chain: calendar dates in common layouts.
//!
//! Recognized layouts, case-insensitive, searched anywhere in the text:
//!
//! | Layout | Example |
//! |--------|---------|
//! | ISO | `2025-03-15` |
//! | Numeric | `15/03/2025`, `3-15-2025`, `15.03.2025` |
//! | Day month | `15 March 2025`, `15th of Mar, 2025`, `15 March` |
//! | Month day | `March 15th 2025`, `Mar 15` |
//!
//! Candidates are tried in the order they start in the text and the first
//! valid one is returned. A missing year is taken from the reference date. A
//! numeric date that reads as two different valid dates (`05/03/2025`) is
//! ambiguous and skipped, as is any impossible date (`31 February 2025`).

use super::{DATE_FORMAT, DateStrategy, MONTH_NAMES, month_number};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/.-](\d{1,2})[/.-](\d{4})\b").unwrap());

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?(?:\s+of)?\s+({MONTH_NAMES})\b\.?(?:(?:\s*,\s*|\s+)(\d{{4}})\b)?"
    ))
    .unwrap()
});

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_NAMES})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:(?:\s*,\s*|\s+)(\d{{4}})\b)?"
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy)]
enum Layout {
    Iso,
    Numeric,
    DayMonth,
    MonthDay,
}

impl Layout {
    const ALL: [Layout; 4] = [Layout::Iso, Layout::Numeric, Layout::DayMonth, Layout::MonthDay];

    fn regex(self) -> &'static Regex {
        match self {
            Layout::Iso => &ISO,
            Layout::Numeric => &NUMERIC,
            Layout::DayMonth => &DAY_MONTH,
            Layout::MonthDay => &MONTH_DAY,
        }
    }

    fn resolve(self, caps: &Captures<'_>, reference: NaiveDate) -> Option<NaiveDate> {
        let year = |i: usize| -> Option<i32> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(reference.year()),
            }
        };
        match self {
            Layout::Iso => NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            ),
            Layout::Numeric => {
                let a: u32 = caps[1].parse().ok()?;
                let b: u32 = caps[2].parse().ok()?;
                let y: i32 = caps[3].parse().ok()?;
                unambiguous_numeric(y, a, b)
            }
            Layout::DayMonth => {
                NaiveDate::from_ymd_opt(year(3)?, month_number(&caps[2])?, caps[1].parse().ok()?)
            }
            Layout::MonthDay => {
                NaiveDate::from_ymd_opt(year(3)?, month_number(&caps[1])?, caps[2].parse().ok()?)
            }
        }
    }
}

/// `a/b/y` as a date, accepting it only when one reading is possible.
fn unambiguous_numeric(y: i32, a: u32, b: u32) -> Option<NaiveDate> {
    let month_first = NaiveDate::from_ymd_opt(y, a, b);
    let day_first = NaiveDate::from_ymd_opt(y, b, a);
    match (month_first, day_first) {
        (Some(m), Some(d)) if m == d => Some(m),
        (Some(_), Some(_)) => None,
        (Some(m), None) => Some(m),
        (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}

/// Parses the earliest valid date-like span of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredParse;

impl StructuredParse {
    pub fn parse(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
        let mut candidates: Vec<(usize, Layout, Captures<'_>)> = Layout::ALL
            .iter()
            .flat_map(|&layout| {
                layout
                    .regex()
                    .captures_iter(text)
                    .map(move |caps| (layout, caps))
            })
            .filter_map(|(layout, caps)| Some((caps.get(0)?.start(), layout, caps)))
            .collect();
        // stable, so ties keep layout order
        candidates.sort_by_key(|(start, _, _)| *start);
        candidates
            .into_iter()
            .find_map(|(_, layout, caps)| layout.resolve(&caps, reference))
    }
}

impl DateStrategy for StructuredParse {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, text: &str, reference: NaiveDate) -> Option<String> {
        Self::parse(text, reference).map(|d| d.format(DATE_FORMAT).to_string())
    }
}
