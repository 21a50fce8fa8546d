//! Candidate generation and ranking over a deletion dictionary.

use std::collections::VecDeque;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::{ContextDictionary, DeletionIndex};
use crate::spelling::levenshtein::trimmed_distance;

/// How many competing suggestions a lookup keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Only the single best suggestion.
    Top,
    /// Every suggestion tied at the smallest distance found.
    Closest,
    /// Every suggestion within the maximum distance.
    #[default]
    All,
}

/// A dictionary term proposed for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestItem {
    /// The suggested term.
    pub term: String,
    /// Frequency of the term in its context.
    pub count: u32,
    /// Edit distance between the query and the term.
    pub distance: usize,
}

impl ContextDictionary {
    /// Look up `query` allowing at most `max_distance` edits.
    ///
    /// Results are ordered by edit distance, then by frequency (highest first).
    /// An exact match therefore always comes first.
    pub fn lookup(&self, query: &str, max_distance: usize, verbosity: Verbosity) -> Vec<SuggestItem> {
        let query_chars: Vec<char> = query.chars().collect();
        let query_len = query_chars.len();

        if query_len.saturating_sub(max_distance) > self.max_length() {
            return Vec::new();
        }

        let mut suggestions = Suggestions::new(verbosity);
        let mut queue: VecDeque<String> = VecDeque::from([query.to_string()]);
        let mut queued: AHashSet<String> = AHashSet::new();
        let mut considered: AHashSet<String> = AHashSet::new();

        while let Some(candidate) = queue.pop_front() {
            let candidate_chars: Vec<char> = candidate.chars().collect();
            let candidate_len = candidate_chars.len();
            let gap = query_len - candidate_len;

            // Deeper candidates cannot beat what is already kept.
            if suggestions.exceeds_best(gap) {
                continue;
            }

            if let Some(entry) = self.entry(&candidate) {
                if entry.is_term() && considered.insert(candidate.clone()) {
                    suggestions.push(SuggestItem {
                        term: candidate.clone(),
                        count: entry.count(),
                        distance: gap,
                    });
                    if verbosity != Verbosity::All && gap == 0 {
                        continue;
                    }
                }

                for &id in entry.origins() {
                    let Some(origin) = self.word(id) else {
                        continue;
                    };
                    if !considered.insert(origin.to_string()) {
                        continue;
                    }

                    let origin_chars: Vec<char> = origin.chars().collect();
                    let distance = if origin == query {
                        0
                    } else if query_len == candidate_len {
                        // The query itself is a delete of the origin.
                        origin_chars.len() - candidate_len
                    } else {
                        trimmed_distance(&origin_chars, &query_chars)
                    };

                    if distance <= max_distance {
                        suggestions.push(SuggestItem {
                            term: origin.to_string(),
                            count: self.frequency(origin),
                            distance,
                        });
                    }
                }
            }

            if gap < max_distance {
                if suggestions.reaches_best(gap) {
                    continue;
                }
                for i in 0..candidate_len {
                    let delete: String = candidate_chars[..i]
                        .iter()
                        .chain(&candidate_chars[i + 1..])
                        .collect();
                    if queued.insert(delete.clone()) {
                        queue.push_back(delete);
                    }
                }
            }
        }

        suggestions.into_ranked()
    }
}

impl DeletionIndex {
    /// Look up `query` in `context`. Unknown contexts yield no suggestions.
    pub fn lookup(
        &self,
        query: &str,
        context: &str,
        max_distance: usize,
        verbosity: Verbosity,
    ) -> Vec<SuggestItem> {
        match self.context(context) {
            Some(dictionary) => dictionary.lookup(query, max_distance, verbosity),
            None => {
                log::debug!("Collection data was not found: {context}");
                Vec::new()
            }
        }
    }
}

/// Suggestion accumulator enforcing the verbosity mode.
struct Suggestions {
    verbosity: Verbosity,
    items: Vec<SuggestItem>,
    best: Option<usize>,
}

impl Suggestions {
    fn new(verbosity: Verbosity) -> Self {
        Suggestions {
            verbosity,
            items: Vec::new(),
            best: None,
        }
    }

    fn keeps_only_best(&self) -> bool {
        self.verbosity != Verbosity::All
    }

    fn exceeds_best(&self, distance: usize) -> bool {
        self.keeps_only_best() && self.best.is_some_and(|best| distance > best)
    }

    fn reaches_best(&self, distance: usize) -> bool {
        self.keeps_only_best() && self.best.is_some_and(|best| distance >= best)
    }

    fn push(&mut self, item: SuggestItem) {
        if self.keeps_only_best() {
            match self.best {
                Some(best) if item.distance > best => return,
                Some(best) if item.distance < best => self.items.clear(),
                _ => {}
            }
            self.best = Some(item.distance);
        } else {
            self.best = Some(self.best.map_or(item.distance, |best| best.min(item.distance)));
        }
        self.items.push(item);
    }

    fn into_ranked(self) -> Vec<SuggestItem> {
        let mut items = self.items;
        items.sort_by(|a, b| a.distance.cmp(&b.distance).then(b.count.cmp(&a.count)));
        if self.verbosity == Verbosity::Top {
            items.truncate(1);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::dictionary::{AdmissionPolicy, DictionarySettings};

    fn dictionary(terms: &[&str]) -> ContextDictionary {
        let mut dict = ContextDictionary::new(DictionarySettings::default());
        for term in terms {
            dict.insert(term);
        }
        dict
    }

    fn terms(items: &[SuggestItem]) -> Vec<&str> {
        items.iter().map(|item| item.term.as_str()).collect()
    }

    #[test]
    fn test_exact_match_comes_first() {
        let dict = dictionary(&["salta", "salto", "salt", "saltar"]);
        for max_distance in 0..=3 {
            let results = dict.lookup("salta", max_distance, Verbosity::All);
            assert_eq!(results[0].term, "salta");
            assert_eq!(results[0].distance, 0);
        }
    }

    #[test]
    fn test_zero_distance_only_exact() {
        let dict = dictionary(&["salta", "salto"]);
        let results = dict.lookup("salta", 0, Verbosity::All);
        assert_eq!(terms(&results), vec!["salta"]);
        assert!(dict.lookup("salte", 0, Verbosity::All).is_empty());
    }

    #[test]
    fn test_finds_single_deletion() {
        let dict = dictionary(&["cordoba", "corrientes"]);
        let results = dict.lookup("cordba", 2, Verbosity::All);
        assert_eq!(results[0].term, "cordoba");
        assert_eq!(results[0].distance, 1);
    }

    #[test]
    fn test_finds_insertion_substitution_transposition() {
        let dict = dictionary(&["rosario"]);

        let inserted = dict.lookup("rosarios", 2, Verbosity::All);
        assert_eq!(inserted[0].term, "rosario");
        assert_eq!(inserted[0].distance, 1);

        let substituted = dict.lookup("rozario", 2, Verbosity::All);
        assert_eq!(substituted[0].term, "rosario");
        assert_eq!(substituted[0].distance, 1);

        let transposed = dict.lookup("rosairo", 2, Verbosity::All);
        assert_eq!(transposed[0].term, "rosario");
        assert_eq!(transposed[0].distance, 1);
    }

    #[test]
    fn test_rejects_beyond_max_distance() {
        let dict = dictionary(&["buenos"]);
        assert!(dict.lookup("bxxxos", 2, Verbosity::All).is_empty());
        let results = dict.lookup("bxxnos", 2, Verbosity::All);
        assert_eq!(results[0].term, "buenos");
        assert_eq!(results[0].distance, 2);
    }

    #[test]
    fn test_ranking_distance_then_frequency() {
        let mut dict = dictionary(&["salta", "salto", "santa"]);
        dict.insert("salto");
        dict.insert("salto");
        dict.insert("santa");

        let results = dict.lookup("salte", 2, Verbosity::All);
        assert_eq!(terms(&results[..2]), vec!["salto", "salta"]);
        assert!(results[..2].iter().all(|item| item.distance == 1));
        assert_eq!(results[2].term, "santa");
        assert_eq!(results[2].distance, 2);
    }

    #[test]
    fn test_closest_keeps_smallest_distance_only() {
        let dict = dictionary(&["salta", "salto", "santa"]);
        let results = dict.lookup("salte", 2, Verbosity::Closest);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|item| item.distance == 1));
    }

    #[test]
    fn test_top_returns_single_best() {
        let mut dict = dictionary(&["salta", "salto", "santa"]);
        dict.insert("salta");
        let results = dict.lookup("salte", 2, Verbosity::Top);
        assert_eq!(terms(&results), vec!["salta"]);
    }

    #[test]
    fn test_prunes_long_queries() {
        let dict = dictionary(&["salta", "jujuy"]);
        assert_eq!(dict.max_length(), 5);
        // 8 - 2 > 5: nothing can match.
        assert!(dict.lookup("saltasal", 2, Verbosity::All).is_empty());
        assert!(dict.lookup("aaaaaaaaaaaa", 3, Verbosity::All).is_empty());
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = dictionary(&[]);
        assert!(dict.lookup("salta", 2, Verbosity::All).is_empty());
        assert!(dict.lookup("", 2, Verbosity::All).is_empty());
    }

    #[test]
    fn test_keep_best_dictionary_still_finds_closest() {
        let mut dict = ContextDictionary::new(DictionarySettings {
            admission: AdmissionPolicy::KeepBest,
            ..Default::default()
        });
        dict.insert("abcd");
        dict.insert("abc");

        let results = dict.lookup("abx", 2, Verbosity::Closest);
        assert_eq!(terms(&results), vec!["abc"]);
        assert_eq!(results[0].distance, 1);
    }

    #[test]
    fn test_index_lookup_unknown_context() {
        let mut index = DeletionIndex::new(DictionarySettings::default());
        index.insert("cordoba", "MLA");
        assert!(index.lookup("cordoba", "MLB", 2, Verbosity::All).is_empty());
        assert_eq!(index.lookup("cordoba", "MLA", 2, Verbosity::All)[0].term, "cordoba");
    }
}
