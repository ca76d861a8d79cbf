//! Answer keys, answer sets and the compact answer-string format.
//!
//! An answer string carries exactly eight `letter + digit` tokens, letters
//! `A`-`H` (any case) and digits `1`-`5`, e.g. `a1b2c3d4e5f1g2h3`. Tokens are
//! found by pattern scan, so separators between them are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ResultsError, ResultsResult};

/// Number of answers in a complete quiz.
pub const ANSWER_COUNT: usize = 8;

/// Smallest valid answer value.
pub const MIN_ANSWER_VALUE: u8 = 1;

/// Largest valid answer value.
pub const MAX_ANSWER_VALUE: u8 = 5;

lazy_static! {
    static ref ANSWER_TOKEN: Regex = Regex::new(r"(?i)([a-h])([1-5])").unwrap();
}

/// Display key of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

/// Backend field name ↔ display key, in field order.
///
/// Shared by the record transformer, the answer-string encoder and the
/// submission payload. Nothing else maps between the two namings.
pub const FIELD_TABLE: [(&str, AnswerKey); ANSWER_COUNT] = [
    ("d1", AnswerKey::A),
    ("d2", AnswerKey::B),
    ("d3", AnswerKey::C),
    ("d4", AnswerKey::D),
    ("d5", AnswerKey::E),
    ("d6", AnswerKey::F),
    ("d7", AnswerKey::G),
    ("d8", AnswerKey::H),
];

impl AnswerKey {
    /// Parse a letter, case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .map(|(_, key)| *key)
            .find(|key| key.as_char().eq_ignore_ascii_case(&letter))
    }

    /// Key for a backend field name (`d1`..`d8`).
    pub fn from_backend_field(field: &str) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, key)| *key)
    }

    /// Backend field name for this key.
    pub fn backend_field(self) -> &'static str {
        FIELD_TABLE
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    /// Uppercase letter.
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub key: AnswerKey,
    pub value: u8,
}

impl AnswerEntry {
    /// Build an entry, rejecting values outside `1..=5`.
    pub fn new(key: AnswerKey, value: i64) -> ResultsResult<Self> {
        match u8::try_from(value) {
            Ok(v) if (MIN_ANSWER_VALUE..=MAX_ANSWER_VALUE).contains(&v) => {
                Ok(Self { key, value: v })
            }
            _ => Err(ResultsError::validation(format!(
                "answer {} out of range: {} (expected {}..={})",
                key, value, MIN_ANSWER_VALUE, MAX_ANSWER_VALUE
            ))),
        }
    }
}

/// Ordered answers plus a key → value lookup built from the same entries.
///
/// The lookup holds the value of the *last* entry for each key. Keys mapped
/// to `None` are known fields with no answer (record-derived sets list all
/// eight keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    answers: Vec<AnswerEntry>,
    object: BTreeMap<AnswerKey, Option<u8>>,
}

impl AnswerSet {
    pub fn from_entries(answers: Vec<AnswerEntry>) -> Self {
        let object = answers
            .iter()
            .map(|entry| (entry.key, Some(entry.value)))
            .collect();
        Self { answers, object }
    }

    /// Add every table key missing from the lookup as `None`.
    pub(crate) fn with_absent_keys(mut self) -> Self {
        for (_, key) in FIELD_TABLE {
            self.object.entry(key).or_insert(None);
        }
        self
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[AnswerEntry] {
        &self.answers
    }

    /// Lookup view.
    pub fn object(&self) -> &BTreeMap<AnswerKey, Option<u8>> {
        &self.object
    }

    pub fn get(&self, key: AnswerKey) -> Option<u8> {
        self.object.get(&key).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// True when every key `A`-`H` has a value.
    pub fn is_complete(&self) -> bool {
        FIELD_TABLE.iter().all(|(_, key)| self.get(*key).is_some())
    }

    /// Keys that occur more than once in the entry list.
    pub fn duplicate_keys(&self) -> Vec<AnswerKey> {
        let mut counts: BTreeMap<AnswerKey, usize> = BTreeMap::new();
        for entry in &self.answers {
            *counts.entry(entry.key).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key)
            .collect()
    }

    /// Render as an answer string, one lowercase token per entry.
    pub fn to_answer_string(&self) -> String {
        self.answers
            .iter()
            .map(|entry| format!("{}{}", entry.key.as_char().to_ascii_lowercase(), entry.value))
            .collect()
    }
}

impl FromStr for AnswerSet {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_answer_string(s)
    }
}

/// Parse an answer string.
///
/// Fails unless the scan finds exactly eight tokens. Repeated letters are
/// accepted: both entries are kept and the lookup reflects the later one.
///
/// ```
/// use dynamics_results::{parse_answer_string, AnswerKey};
///
/// let set = parse_answer_string("a1b2c3d4e5f1g2h3").unwrap();
/// assert_eq!(set.len(), 8);
/// assert_eq!(set.get(AnswerKey::H), Some(3));
/// assert!(parse_answer_string("a1b2").is_err());
/// ```
pub fn parse_answer_string(input: &str) -> ResultsResult<AnswerSet> {
    let answers: Vec<AnswerEntry> = ANSWER_TOKEN
        .captures_iter(input)
        .filter_map(|caps| {
            let key = caps[1].chars().next().and_then(AnswerKey::from_letter)?;
            let value = caps[2].parse().ok()?;
            Some(AnswerEntry { key, value })
        })
        .collect();

    if answers.len() != ANSWER_COUNT {
        return Err(ResultsError::validation("invalid match string"));
    }

    let set = AnswerSet::from_entries(answers);
    let duplicates = set.duplicate_keys();
    if !duplicates.is_empty() {
        warn!(duplicates = ?duplicates, "answer string repeats keys; later values win");
    }

    Ok(set)
}
