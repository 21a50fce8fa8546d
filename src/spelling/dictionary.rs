//! Deletion-indexed dictionary for spelling correction.
//!
//! Every term inserted into a [`ContextDictionary`] is expanded into its
//! deletion closure: all strings reachable by removing up to `K` characters.
//! Each of those strings becomes a key pointing back at the term, so a
//! misspelled query can be matched by generating *its* deletes and probing the
//! map, without ever enumerating insertions, substitutions or transpositions.
//!
//! A [`DeletionIndex`] holds one dictionary per context. Contexts never share
//! entries.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of a term in a context's word list.
pub type WordId = u32;

/// Controls which origin terms a delete key keeps when several terms share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// Keep every origin term regardless of its length gap to the key.
    #[default]
    KeepAll,
    /// Keep only the origin terms tied for the smallest length gap to the key.
    KeepBest,
}

/// Build-time settings shared by every context of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionarySettings {
    /// Maximum number of characters deleted from a term when indexing it.
    pub max_edit_distance: usize,
    /// Origin admission policy for shared delete keys.
    pub admission: AdmissionPolicy,
    /// Maximum number of distinct terms per context.
    pub max_terms: usize,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        DictionarySettings {
            max_edit_distance: 2,
            admission: AdmissionPolicy::KeepAll,
            max_terms: WordId::MAX as usize,
        }
    }
}

/// What happened to a term passed to [`ContextDictionary::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// First sighting: the term got a word id and its deletes were indexed.
    Added(WordId),
    /// The term was already known; only its frequency changed.
    Incremented,
    /// The context is full; the term was ignored.
    Rejected,
}

/// A single key of the dictionary.
///
/// The same key can be a real term (`count > 0`) and, at the same time, a
/// delete of other terms (`origins` non-empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    count: u32,
    origins: SmallVec<[WordId; 1]>,
}

impl DictionaryEntry {
    /// Number of times the key was inserted as a term. Zero for pure delete keys.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the key is itself a dictionary term.
    pub fn is_term(&self) -> bool {
        self.count > 0
    }

    /// Word ids of the terms whose deletion closure produced this key.
    pub fn origins(&self) -> &[WordId] {
        &self.origins
    }
}

/// Dictionary of a single context: word list, frequencies and delete keys.
#[derive(Debug, Clone)]
pub struct ContextDictionary {
    words: Vec<Box<str>>,
    entries: AHashMap<Box<str>, DictionaryEntry>,
    max_length: usize,
    settings: DictionarySettings,
}

impl ContextDictionary {
    /// Create an empty dictionary.
    pub fn new(settings: DictionarySettings) -> Self {
        ContextDictionary {
            words: Vec::new(),
            entries: AHashMap::new(),
            max_length: 0,
            settings,
        }
    }

    /// Insert one occurrence of `term`.
    ///
    /// The term is stored exactly as given. Its deletes are generated only the
    /// first time it is seen; later insertions just raise its frequency,
    /// saturating at `u32::MAX`.
    pub fn insert(&mut self, term: &str) -> Insertion {
        if let Some(entry) = self.entries.get_mut(term) {
            if entry.count > 0 {
                entry.count = entry.count.saturating_add(1);
                return Insertion::Incremented;
            }
        }

        if self.words.len() >= self.settings.max_terms {
            return Insertion::Rejected;
        }

        let id = self.words.len() as WordId;
        self.words.push(term.into());

        let term_len = term.chars().count();
        if term_len > self.max_length {
            self.max_length = term_len;
        }

        // A key may already exist as a delete of another term.
        self.entries.entry(term.into()).or_default().count = 1;

        for delete in delete_closure(term, self.settings.max_edit_distance) {
            match self.entries.get_mut(delete.as_str()) {
                Some(entry) => {
                    if !entry.origins.contains(&id) {
                        let delete_len = delete.chars().count();
                        admit(
                            &self.words,
                            self.settings.admission,
                            entry,
                            id,
                            term_len,
                            delete_len,
                        );
                    }
                }
                None => {
                    let mut entry = DictionaryEntry::default();
                    entry.origins.push(id);
                    self.entries.insert(delete.into_boxed_str(), entry);
                }
            }
        }

        Insertion::Added(id)
    }

    /// Frequency of `term`, zero if it is not a dictionary term.
    pub fn frequency(&self, term: &str) -> u32 {
        self.entries.get(term).map_or(0, |entry| entry.count)
    }

    /// Whether `term` was inserted as a term (not merely as a delete).
    pub fn contains(&self, term: &str) -> bool {
        self.frequency(term) > 0
    }

    /// The entry stored under `key`, if any.
    pub fn entry(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    /// The term with the given word id.
    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(id as usize).map(|word| word.as_ref())
    }

    /// All terms in insertion order; a term's position is its word id.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| word.as_ref())
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.words.len()
    }

    /// Number of keys (terms and deletes).
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Length in characters of the longest term.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Settings this dictionary was built with.
    pub fn settings(&self) -> DictionarySettings {
        self.settings
    }
}

/// Add `id` to a shared delete key according to the admission policy.
fn admit(
    words: &[Box<str>],
    policy: AdmissionPolicy,
    entry: &mut DictionaryEntry,
    id: WordId,
    term_len: usize,
    delete_len: usize,
) {
    if policy == AdmissionPolicy::KeepAll {
        entry.origins.push(id);
        return;
    }

    let gap = term_len - delete_len;
    let best_gap = entry
        .origins
        .first()
        .and_then(|&first| words.get(first as usize))
        .map(|word| word.chars().count() - delete_len);

    match best_gap {
        Some(best) if best > gap => {
            entry.origins.clear();
            entry.origins.push(id);
        }
        Some(best) if best < gap => {}
        _ => entry.origins.push(id),
    }
}

/// All strings obtained by deleting between 1 and `max_distance` characters
/// from `term`.
///
/// Single-character strings are never shortened further, so the empty string
/// is never produced.
pub fn delete_closure(term: &str, max_distance: usize) -> AHashSet<String> {
    let mut deletes = AHashSet::new();
    if max_distance == 0 {
        return deletes;
    }

    let mut stack: Vec<(String, usize)> = vec![(term.to_string(), 0)];
    while let Some((word, depth)) = stack.pop() {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 1 {
            continue;
        }
        for i in 0..chars.len() {
            let delete: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
            if deletes.insert(delete.clone()) && depth + 1 < max_distance {
                stack.push((delete, depth + 1));
            }
        }
    }

    deletes
}

/// Deletion dictionaries partitioned by context.
#[derive(Debug, Clone, Default)]
pub struct DeletionIndex {
    contexts: AHashMap<String, ContextDictionary>,
    settings: DictionarySettings,
    max_length: usize,
}

impl DeletionIndex {
    /// Create an empty index.
    pub fn new(settings: DictionarySettings) -> Self {
        DeletionIndex {
            contexts: AHashMap::new(),
            settings,
            max_length: 0,
        }
    }

    /// Insert one occurrence of `term` into `context`, creating the context on demand.
    pub fn insert(&mut self, term: &str, context: &str) -> Insertion {
        let settings = self.settings;
        let dictionary = self
            .contexts
            .entry(context.to_string())
            .or_insert_with(|| ContextDictionary::new(settings));
        let insertion = dictionary.insert(term);
        self.max_length = self.max_length.max(dictionary.max_length());
        insertion
    }

    /// Install a dictionary built elsewhere, replacing any previous one for the context.
    pub fn add_context(&mut self, context: String, dictionary: ContextDictionary) {
        self.max_length = self.max_length.max(dictionary.max_length());
        self.contexts.insert(context, dictionary);
    }

    /// The dictionary of `context`, if it was built.
    pub fn context(&self, context: &str) -> Option<&ContextDictionary> {
        self.contexts.get(context)
    }

    /// Names of all built contexts.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(|name| name.as_str())
    }

    /// Number of built contexts.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Length in characters of the longest term across all contexts.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Settings new contexts are created with.
    pub fn settings(&self) -> DictionarySettings {
        self.settings
    }
}
