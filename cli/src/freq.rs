//! Word frequency table accumulated over one fetch.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// Occurrence count per distinct word, ordered by word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        if let Some(count) = self.counts.get_mut(word) {
            *count = count.saturating_add(1);
        } else {
            self.counts.insert(word.to_owned(), 1);
        }
    }

    #[must_use]
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Write `word, count` lines in word order.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (word, count) in self.iter() {
            writeln!(out, "{word}, {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "freq_test.rs"]
mod tests;
