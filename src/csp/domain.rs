//! Per-slot candidate word sets

use crate::crossword::{Crossword, Slot};
use std::collections::{BTreeMap, BTreeSet};

/// Candidate words still considered possible for each slot.
///
/// Domains only ever shrink. Restoring an earlier state means building a new
/// store from the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: BTreeMap<Slot, BTreeSet<String>>,
}

impl DomainStore {
    /// Seed every slot with the full vocabulary
    pub fn new(crossword: &Crossword) -> Self {
        let domains = crossword
            .slots()
            .iter()
            .map(|&slot| (slot, crossword.words().clone()))
            .collect();
        Self { domains }
    }

    /// Seed every slot and apply node consistency
    pub fn initialize(crossword: &Crossword) -> Self {
        let mut store = Self::new(crossword);
        store.enforce_node_consistency();
        store
    }

    /// Drop every word whose length differs from its slot's length.
    ///
    /// Returns the number of words removed.
    pub fn enforce_node_consistency(&mut self) -> usize {
        let mut removed = 0;
        for (slot, words) in self.domains.iter_mut() {
            let before = words.len();
            words.retain(|word| word.len() == slot.length);
            removed += before - words.len();
        }
        removed
    }

    /// Current candidates for `slot` (empty for unknown slots)
    pub fn domain(&self, slot: &Slot) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.domains.get(slot).unwrap_or(&EMPTY)
    }

    /// Remove one candidate, returning whether it was present
    pub fn remove(&mut self, slot: &Slot, word: &str) -> bool {
        self.domains
            .get_mut(slot)
            .map(|words| words.remove(word))
            .unwrap_or(false)
    }

    /// Keep only the candidates matching `keep`, returning how many were removed
    pub fn retain<F>(&mut self, slot: &Slot, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        match self.domains.get_mut(slot) {
            Some(words) => {
                let before = words.len();
                words.retain(|word| keep(word.as_str()));
                before - words.len()
            }
            None => 0,
        }
    }

    pub fn is_empty(&self, slot: &Slot) -> bool {
        self.domain(slot).is_empty()
    }

    pub fn size(&self, slot: &Slot) -> usize {
        self.domain(slot).len()
    }

    /// Sum of all domain sizes
    pub fn total_size(&self) -> usize {
        self.domains.values().map(BTreeSet::len).sum()
    }
}
