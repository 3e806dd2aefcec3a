use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

/// A Jira issue reference such as `SCRUM-123`.
///
/// Keys compare by their numeric ordinal so `SCRUM-9` sorts before `SCRUM-10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey {
    key: String,
    number: u64,
}

impl IssueKey {
    /// Parse `<PREFIX>-<digits>`. The ordinal is whatever follows the last `-`.
    pub fn parse(key: &str) -> Option<Self> {
        let (prefix, digits) = key.rsplit_once('-')?;
        if prefix.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Ordinals past u64 saturate here; `Ord` still orders them exactly.
        let number = digits.parse::<u64>().unwrap_or(u64::MAX);
        Some(Self {
            key: key.to_string(),
            number,
        })
    }

    /// The ordinal's digits without leading zeros.
    fn significant_digits(&self) -> &str {
        let digits = self.key.rsplit_once('-').map_or("", |(_, d)| d);
        digits.trim_start_matches('0')
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl Ord for IssueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let (ours, theirs) = (self.significant_digits(), other.significant_digits());
        ours.len()
            .cmp(&theirs.len())
            .then_with(|| ours.cmp(theirs))
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for IssueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Matches `<PREFIX>-<digits>` anywhere in a string. Digits are ASCII only,
/// so extraction and title stripping always agree on what a key is.
///
/// The pattern has no left word boundary, so `XSCRUM-12` yields `SCRUM-12`.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    key_re: Regex,
    title_re: Regex,
}

impl IssuePattern {
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(Error::ConfigValidation(
                "project key must not be empty".to_string(),
            ));
        }
        let escaped = regex::escape(prefix);
        let key_re = Regex::new(&format!(r"{escaped}-[0-9]+"))
            .map_err(|e| Error::ConfigValidation(format!("invalid project key {prefix:?}: {e}")))?;
        let title_re = Regex::new(&format!(r"\s*{escaped}-[0-9]+"))
            .map_err(|e| Error::ConfigValidation(format!("invalid project key {prefix:?}: {e}")))?;
        Ok(Self {
            key_re,
            title_re,
        })
    }

    /// All non-overlapping keys in `text`, in order found, duplicates kept.
    pub fn extract(&self, text: &str) -> Vec<IssueKey> {
        let keys: Vec<IssueKey> = self
            .key_re
            .find_iter(text)
            .filter_map(|m| IssueKey::parse(m.as_str()))
            .collect();
        debug!(?keys, "extracted issue keys");
        keys
    }

    /// Union the keys of every text into one set ordered by ordinal.
    pub fn collect<'a, I>(&self, texts: I) -> BTreeSet<IssueKey>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.extract(text))
            .collect()
    }

    /// Remove every key, along with the whitespace before it.
    pub(crate) fn strip_keys(&self, text: &str) -> String {
        self.title_re.replace_all(text, "").into_owned()
    }
}
