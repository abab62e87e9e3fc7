//! Whole-text word counts and most-frequent-word ranking.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::report::WordFrequency;

/// Occurrence counts keyed by lowercase word.
///
/// Iteration follows first-occurrence order, which is what breaks ties when
/// ranking words by count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: IndexMap<String, usize>,
}

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_owned(), 1);
        }
    }

    /// Occurrences of `word`, if it was ever seen.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no word has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(word, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// The `limit` most frequent words that are not in `stopwords`.
    ///
    /// Ranked by descending count; equal counts keep first-occurrence order.
    /// A ranked `"i"` is displayed as `"I"`.
    #[tracing::instrument(skip(self, stopwords), fields(distinct = self.len()))]
    pub fn top_frequent(&self, stopwords: &HashSet<String>, limit: usize) -> Vec<WordFrequency> {
        let mut ranked: Vec<(usize, &str)> = self
            .iter()
            .filter(|(word, _)| !stopwords.contains(*word))
            .map(|(word, count)| (count, word))
            .collect();

        // stable: ties stay in first-occurrence order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(limit);

        let mut top: Vec<WordFrequency> = ranked
            .into_iter()
            .map(|(count, word)| WordFrequency(count, word.to_owned()))
            .collect();

        if let Some(entry) = top.iter_mut().find(|entry| entry.1 == "i") {
            entry.1 = "I".to_owned();
        }

        top
    }
}

impl<'a> FromIterator<&'a str> for FrequencyMap {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut map = Self::new();
        for word in iter {
            map.record(word);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    fn pairs(top: &[WordFrequency]) -> Vec<(usize, &str)> {
        top.iter().map(|f| (f.0, f.1.as_str())).collect()
    }

    #[test]
    fn record_counts_and_preserves_first_seen_order() {
        let map: FrequencyMap = ["cats", "run", "dogs", "run", "fast"].into_iter().collect();
        let order: Vec<_> = map.iter().collect();
        assert_eq!(order, vec![("cats", 1), ("run", 2), ("dogs", 1), ("fast", 1)]);
        assert_eq!(map.len(), 4);
        assert!(!map.is_empty());
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn ranks_by_count_with_first_seen_tiebreak() {
        let map: FrequencyMap = ["cats", "run", "dogs", "run", "fast"].into_iter().collect();
        let top = map.top_frequent(&HashSet::new(), 3);
        assert_eq!(pairs(&top), vec![(2, "run"), (1, "cats"), (1, "dogs")]);
    }

    #[test]
    fn stopwords_are_excluded() {
        let map: FrequencyMap = ["the", "the", "the", "cat", "a", "cat", "mat"]
            .into_iter()
            .collect();
        let top = map.top_frequent(&stop(&["a", "an", "the"]), 5);
        assert_eq!(pairs(&top), vec![(2, "cat"), (1, "mat")]);
    }

    #[test]
    fn stopword_match_is_exact() {
        let map: FrequencyMap = ["the", "the"].into_iter().collect();
        let top = map.top_frequent(&stop(&["The"]), 3);
        assert_eq!(pairs(&top), vec![(2, "the")]);
    }

    #[test]
    fn fewer_words_than_limit() {
        let map: FrequencyMap = ["one"].into_iter().collect();
        assert_eq!(map.top_frequent(&HashSet::new(), 50).len(), 1);
        assert!(FrequencyMap::new().top_frequent(&HashSet::new(), 3).is_empty());
    }

    #[test]
    fn ranked_i_is_capitalized() {
        let map: FrequencyMap = ["i", "think", "i", "am"].into_iter().collect();
        let top = map.top_frequent(&HashSet::new(), 2);
        assert_eq!(pairs(&top), vec![(2, "I"), (1, "think")]);
    }

    #[test]
    fn unranked_i_is_left_alone() {
        let map: FrequencyMap = ["we", "we", "i"].into_iter().collect();
        let top = map.top_frequent(&HashSet::new(), 1);
        assert_eq!(pairs(&top), vec![(2, "we")]);
    }
}
