//! Third step of the date chain: natural-language date phrases.
//!
//! Phrases are resolved against the reference date:
//!
//! | Phrase | Resolves to |
//! |--------|-------------|
//! | `today`, `tonight`, `tomorrow`, `yesterday`, `day after tomorrow` | fixed offset |
//! | `in 3 days`, `in two weeks`, `10 days from now` | offset in days or weeks |
//! | `next week` | seven days ahead |
//! | `this Friday`, `coming Sat`, `on Monday` | upcoming weekday, today included |
//! | `next Friday` | upcoming weekday, today excluded |
//! | `March 2025` | first day of that month |
//! | `05/03/2025` | day-first reading of a numeric date |
//!
//! The phrase that starts earliest in the text wins.
//!
//! The rule table is only built with the `heuristic-dates` feature. Without
//! it, or if the table fails to compile, [`HeuristicParse`] reports itself
//! unavailable and never yields a date.

use super::{DATE_FORMAT, DateStrategy, MONTH_NAMES, month_number};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

/// Why heuristic parsing cannot run.
#[derive(Debug, Error)]
pub enum Unavailable {
    #[cfg(not(feature = "heuristic-dates"))]
    #[error("built without the `heuristic-dates` feature")]
    NotCompiled,
    #[error("disabled by configuration")]
    Disabled,
    #[error("rule table failed to compile: {0}")]
    Rules(#[from] regex::Error),
}

#[cfg_attr(not(feature = "heuristic-dates"), allow(dead_code))]
#[derive(Debug, Clone, Copy)]
enum Rule {
    RelativeDay,
    InCount,
    CountFromNow,
    NextWeek,
    Weekday,
    MonthYear,
    DayFirstNumeric,
}

#[cfg_attr(not(feature = "heuristic-dates"), allow(dead_code))]
#[derive(Debug)]
struct Rules(Vec<(Rule, Regex)>);

#[cfg_attr(not(feature = "heuristic-dates"), allow(dead_code))]
impl Rules {
    fn compile() -> Result<Self, regex::Error> {
        let weekdays = "mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?";
        let count = r"\d{1,3}|an?|one|two|three|four|five|six|seven|eight|nine|ten";
        let table = [
            (
                Rule::RelativeDay,
                r"(?i)\b(day after tomorrow|today|tonight|tomorrow|yesterday)\b".to_string(),
            ),
            (
                Rule::InCount,
                format!(r"(?i)\bin\s+({count})\s+(day|week)s?\b"),
            ),
            (
                Rule::CountFromNow,
                format!(r"(?i)\b({count})\s+(day|week)s?\s+from\s+(?:now|today)\b"),
            ),
            (Rule::NextWeek, r"(?i)\bnext\s+week\b".to_string()),
            (
                Rule::Weekday,
                format!(r"(?i)\b(next|this|coming|on)\s+({weekdays})\b"),
            ),
            (
                Rule::MonthYear,
                format!(r"(?i)\b({MONTH_NAMES})\b\.?,?\s+(\d{{4}})\b"),
            ),
            (
                Rule::DayFirstNumeric,
                r"\b(\d{1,2})[/.-](\d{1,2})[/.-](\d{4})\b".to_string(),
            ),
        ];

        let rules = table
            .into_iter()
            .map(|(rule, pattern)| Regex::new(&pattern).map(|re| (rule, re)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(rules))
    }

    /// Earliest phrase in the text that resolves to a date.
    fn find(&self, text: &str, reference: NaiveDate) -> Option<NaiveDate> {
        self.0
            .iter()
            .filter_map(|(rule, re)| {
                re.captures_iter(text).find_map(|caps| {
                    let start = caps.get(0)?.start();
                    rule.resolve(&caps, reference).map(|date| (start, date))
                })
            })
            .min_by_key(|(start, _)| *start)
            .map(|(_, date)| date)
    }
}

#[cfg_attr(not(feature = "heuristic-dates"), allow(dead_code))]
impl Rule {
    fn resolve(self, caps: &Captures<'_>, reference: NaiveDate) -> Option<NaiveDate> {
        match self {
            Rule::RelativeDay => match caps[1].to_ascii_lowercase().as_str() {
                "today" | "tonight" => Some(reference),
                "tomorrow" => reference.checked_add_days(Days::new(1)),
                "yesterday" => reference.checked_sub_days(Days::new(1)),
                _ => reference.checked_add_days(Days::new(2)),
            },
            Rule::InCount | Rule::CountFromNow => {
                let n = parse_count(&caps[1])?;
                let unit = if caps[2].eq_ignore_ascii_case("week") { 7 } else { 1 };
                reference.checked_add_days(Days::new(n.checked_mul(unit)?))
            }
            Rule::NextWeek => reference.checked_add_days(Days::new(7)),
            Rule::Weekday => {
                let target = weekday_number(&caps[2])?;
                let ahead = (7 + target.num_days_from_monday()
                    - reference.weekday().num_days_from_monday())
                    % 7;
                let ahead = if ahead == 0 && caps[1].eq_ignore_ascii_case("next") {
                    7
                } else {
                    ahead
                };
                reference.checked_add_days(Days::new(u64::from(ahead)))
            }
            Rule::MonthYear => {
                NaiveDate::from_ymd_opt(caps[2].parse().ok()?, month_number(&caps[1])?, 1)
            }
            Rule::DayFirstNumeric => NaiveDate::from_ymd_opt(
                caps[3].parse().ok()?,
                caps[2].parse().ok()?,
                caps[1].parse().ok()?,
            ),
        }
    }
}

#[cfg_attr(not(feature = "heuristic-dates"), allow(dead_code))]
fn weekday_number(name: &str) -> Option<Weekday> {
    let lower = name.to_ascii_lowercase();
    let day = match lower.get(..3)? {
        "mon" => Weekday::Mon,
        "tue" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

#[cfg_attr(not(feature = "heuristic-dates"), allow(dead_code))]
fn parse_count(word: &str) -> Option<u64> {
    let n = match word.to_ascii_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        digits => digits.parse().ok()?,
    };
    Some(n)
}

#[cfg(feature = "heuristic-dates")]
fn load_rules() -> Result<Rules, Unavailable> {
    Ok(Rules::compile()?)
}

#[cfg(not(feature = "heuristic-dates"))]
fn load_rules() -> Result<Rules, Unavailable> {
    Err(Unavailable::NotCompiled)
}

/// Natural-language date finder. May be unavailable; see the module docs.
#[derive(Debug)]
pub struct HeuristicParse {
    rules: Result<Rules, Unavailable>,
}

impl HeuristicParse {
    /// Build the rule table, recording why it is unavailable if that fails.
    pub fn new() -> Self {
        let rules = load_rules();
        if let Ok(r) = &rules {
            debug!(rules = r.0.len(), "Heuristic date rules ready");
        }
        Self { rules }
    }

    /// A parser that is always unavailable.
    pub fn disabled() -> Self {
        Self {
            rules: Err(Unavailable::Disabled),
        }
    }

    /// Why the parser is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&Unavailable> {
        self.rules.as_ref().err()
    }
}

impl Default for HeuristicParse {
    fn default() -> Self {
        Self::new()
    }
}

impl DateStrategy for HeuristicParse {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn is_available(&self) -> bool {
        self.rules.is_ok()
    }

    fn extract(&self, text: &str, reference: NaiveDate) -> Option<String> {
        let rules = self.rules.as_ref().ok()?;
        rules
            .find(text, reference)
            .map(|d| d.format(DATE_FORMAT).to_string())
    }
}
