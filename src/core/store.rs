/// Syllable store — the read-mostly inventory the generator draws from.

use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;
use thiserror::Error;

use crate::schema::syllable::Syllable;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("syllable must have a non-empty id")]
    EmptyId,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Holds syllables keyed by id, preserving insertion order.
///
/// Built once, then queried; concurrent mutation during reads must be
/// synchronized externally.
#[derive(Debug, Clone, Default)]
pub struct SyllableStore {
    entries: Vec<Syllable>,
    index: FxHashMap<String, usize>,
}

impl SyllableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a RON file containing a list of syllables.
    pub fn load_from_ron(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a store from a RON string containing a list of syllables.
    pub fn parse_ron(input: &str) -> Result<Self, StoreError> {
        let syllables: Vec<Syllable> = ron::from_str(input)?;
        let mut store = Self::new();
        for syllable in syllables {
            store.add(syllable)?;
        }
        Ok(store)
    }

    /// Insert a syllable, replacing any existing entry with the same id.
    pub fn add(&mut self, syllable: Syllable) -> Result<(), StoreError> {
        if syllable.id.is_empty() {
            return Err(StoreError::EmptyId);
        }
        match self.index.get(&syllable.id) {
            Some(&pos) => self.entries[pos] = syllable,
            None => {
                self.index.insert(syllable.id.clone(), self.entries.len());
                self.entries.push(syllable);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Syllable> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// All syllables in insertion order.
    pub fn all(&self) -> &[Syllable] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Syllables that may open a name.
    pub fn initial_candidates(&self) -> Vec<&Syllable> {
        self.entries
            .iter()
            .filter(|s| s.constraints.can_be_initial)
            .collect()
    }

    /// Syllables that may close a name.
    pub fn final_candidates(&self) -> Vec<&Syllable> {
        self.entries
            .iter()
            .filter(|s| s.constraints.can_be_final)
            .collect()
    }

    /// Syllables that may follow `previous`.
    ///
    /// A non-empty allow-list is authoritative: only listed ids present
    /// in the store qualify. Otherwise everything outside the deny-list
    /// qualifies.
    pub fn followers(&self, previous: &Syllable) -> Vec<&Syllable> {
        if !previous.constraints.can_follow.is_empty() {
            return previous
                .constraints
                .can_follow
                .iter()
                .filter_map(|id| self.get(id))
                .collect();
        }

        let denied: FxHashSet<&str> = previous
            .constraints
            .cannot_follow
            .iter()
            .map(String::as_str)
            .collect();
        self.entries
            .iter()
            .filter(|s| !denied.contains(s.id.as_str()))
            .collect()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
