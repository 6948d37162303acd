//! Date-distance classification: horizon buckets for expirations and
//! relative-time labels for simulation points.
//!
//! Both are pure functions of (date, reference date). The reference is
//! always injected by the caller; nothing here reads the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse classification of an expiration date's distance from the
/// reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    Nearest,
    #[serde(rename = "~3 Months")]
    ThreeMonths,
    #[serde(rename = "~6 Months")]
    SixMonths,
    #[serde(rename = "~1 Year")]
    OneYear,
    Unknown,
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Nearest => "Nearest",
            Horizon::ThreeMonths => "~3 Months",
            Horizon::SixMonths => "~6 Months",
            Horizon::OneYear => "~1 Year",
            Horizon::Unknown => "Unknown",
        }
    }

    /// Classify by absolute day count between `date` and `reference`.
    /// Unparseable dates classify as Unknown rather than failing the join.
    pub fn classify(date: &str, reference: NaiveDate) -> Self {
        let Some(days) = day_count(date, reference) else {
            return Horizon::Unknown;
        };
        match days {
            0..=30 => Horizon::Nearest,
            31..=90 => Horizon::ThreeMonths,
            91..=180 => Horizon::SixMonths,
            _ => Horizon::OneYear,
        }
    }
}

/// Absolute whole-day distance between a date string and the reference.
/// None if the string is not a calendar date.
pub fn day_count(date: &str, reference: NaiveDate) -> Option<i64> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((parsed - reference).num_days().abs())
}

/// Relative-time label for a simulation point: "N days" under a week,
/// then floored weeks, months, years. Unparseable dates pass through
/// verbatim so a malformed row degrades to its raw label.
pub fn relative_label(date: &str, reference: NaiveDate) -> String {
    let Some(days) = day_count(date, reference) else {
        return date.to_string();
    };
    if days < 7 {
        format!("{} days", days)
    } else if days < 30 {
        format!("{} weeks", days / 7)
    } else if days < 365 {
        format!("{} months", days / 30)
    } else {
        format!("{} years", days / 365)
    }
}
