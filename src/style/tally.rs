//! Frequency tallies with a deterministic winner.

/// Counts observations of a key and picks the most frequent one.
///
/// Keys keep the order in which they were first observed, and ties go to
/// the key seen first. The result depends only on the sequence of
/// observations, never on hashing.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Tally<K> {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation.
    pub fn add(&mut self, key: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Most frequent key and its count.
    pub fn winner(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, count) in &self.entries {
            // Strictly greater: an equal count never displaces an earlier key
            if best.map_or(true, |(_, c)| *count > c) {
                best = Some((key, *count));
            }
        }
        best
    }

    /// Number of times `key` was observed.
    pub fn count(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, c)| *c)
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
