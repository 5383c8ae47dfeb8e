//! Daily start/target word pairs.
//!
//! Pairs are keyed by calendar date; any date without a pair plays the
//! default pair. In JSON a pair is a two-element array and the table is
//! `{"default": [start, end], "pairs": {"YYYY-MM-DD": [start, end]}}`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct WordPair {
    pub start: String,
    pub end: String,
}

impl WordPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: start.into(), end: end.into() }
    }

    fn check(&self, what: &str) -> Result<(), ConfigError> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{} word pair has an empty word", what)));
        }
        Ok(())
    }
}

impl From<(String, String)> for WordPair {
    fn from((start, end): (String, String)) -> Self {
        Self {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        }
    }
}

impl From<WordPair> for (String, String) {
    fn from(pair: WordPair) -> Self {
        (pair.start, pair.end)
    }
}

/// JSON shape of the table, before date keys are validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDailyWords {
    default: WordPair,
    #[serde(default)]
    pairs: BTreeMap<String, WordPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDailyWords", into = "RawDailyWords")]
pub struct DailyWords {
    default: WordPair,
    pairs: BTreeMap<NaiveDate, WordPair>,
}

impl TryFrom<RawDailyWords> for DailyWords {
    type Error = ConfigError;

    fn try_from(raw: RawDailyWords) -> Result<Self, Self::Error> {
        raw.default.check("default")?;
        let mut pairs = BTreeMap::new();
        for (date, pair) in raw.pairs {
            let day = NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .map_err(|source| ConfigError::InvalidDate { date: date.clone(), source })?;
            pair.check(&date)?;
            pairs.insert(day, pair);
        }
        Ok(Self { default: raw.default, pairs })
    }
}

impl From<DailyWords> for RawDailyWords {
    fn from(words: DailyWords) -> Self {
        Self {
            default: words.default,
            pairs: words
                .pairs
                .into_iter()
                .map(|(day, pair)| (day.format(DATE_FORMAT).to_string(), pair))
                .collect(),
        }
    }
}

impl Default for DailyWords {
    fn default() -> Self {
        let table = [
            (10, "Bitcoin", "China"),
            (11, "Pizza", "Italy"),
            (12, "Shakespeare", "Hollywood"),
            (13, "Dinosaur", "Oil"),
            (14, "Elephant", "Steve Jobs"),
            (15, "Soccer", "China"),
        ];
        let pairs = table
            .into_iter()
            .filter_map(|(day, start, end)| {
                NaiveDate::from_ymd_opt(2025, 3, day).map(|d| (d, WordPair::new(start, end)))
            })
            .collect();

        Self {
            default: WordPair::new("USA", "Elon Musk"),
            pairs,
        }
    }
}

impl DailyWords {
    pub fn new(default: WordPair) -> Self {
        Self { default, pairs: BTreeMap::new() }
    }

    pub fn insert(&mut self, date: NaiveDate, pair: WordPair) {
        self.pairs.insert(date, pair);
    }

    pub fn default_pair(&self) -> &WordPair {
        &self.default
    }

    pub fn for_date(&self, date: NaiveDate) -> &WordPair {
        self.pairs.get(&date).unwrap_or(&self.default)
    }

    /// Pair for a `YYYY-MM-DD` date; unparsable dates get the default pair.
    pub fn for_iso_date(&self, date: &str) -> &WordPair {
        match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
            Ok(day) => self.for_date(day),
            Err(e) => {
                warn!("unparsable date '{}' ({}), using default words", date, e);
                &self.default
            }
        }
    }
}
