//! Frequency tables with deterministic ordering.
//!
//! [`Tally`] counts occurrences of keys and remembers the order in which each
//! key was first seen. [`Tally::most_common`] sorts by count (descending) and
//! breaks ties by first appearance, so reports are stable for a given input.
//!
//! # Example
//!
//! ```
//! use tootpack::core::tally::Tally;
//!
//! let mut tally = Tally::new();
//! for word in ["b", "a", "b", "c", "a"] {
//!     tally.add(word);
//! }
//!
//! assert_eq!(tally.most_common(2), vec![("b", 2), ("a", 2)]);
//! assert_eq!(tally.get(&"c"), 1);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Serialize, Serializer};

/// An insertion-ordered counter.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Counts `n` occurrences of `key`.
    pub fn add_n(&mut self, key: K, n: usize) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Returns the count for `key` (0 if never seen).
    pub fn get(&self, key: &K) -> usize {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// The `n` most frequent keys; ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut sorted = self.entries.clone();
        // sort_by is stable, so equal counts stay in insertion order
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    /// Every key, most frequent first.
    pub fn all_most_common(&self) -> Vec<(K, usize)> {
        self.most_common(self.entries.len())
    }
}

impl<K: Ord + Eq + Hash + Clone> Tally<K> {
    /// Keys sorted ascending, with their counts.
    pub fn sorted_by_key(&self) -> Vec<(K, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }

    /// Every key whose count reaches the count at `rank` (1-based).
    ///
    /// Ranking is by count, ties broken by key. All keys tied with the entry
    /// at `rank` are included, so the result may have more than `rank` rows.
    /// With fewer than `rank` keys, every key is returned.
    pub fn at_or_above_rank(&self, rank: usize) -> Vec<(K, usize)> {
        let mut ranked = self.sorted_by_key();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let Some(threshold) = ranked
            .get(rank.saturating_sub(1))
            .or(ranked.last())
            .map(|(_, n)| *n)
        else {
            return Vec::new();
        };

        ranked.retain(|(_, n)| *n >= threshold);
        ranked
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    /// Serializes as a list of `[key, count]` pairs in first-seen order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
