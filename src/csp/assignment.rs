//! Partial slot-to-word assignments built up during search

use crate::crossword::Slot;
use std::collections::BTreeMap;

/// A partial mapping from slots to chosen words.
///
/// Search grows and shrinks it only at the frontier: a word is assigned before
/// recursing and unassigned again when that branch fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<Slot, String>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the word for `slot`, returning the word it replaces
    pub fn assign(&mut self, slot: Slot, word: String) -> Option<String> {
        self.values.insert(slot, word)
    }

    /// Remove the word for `slot`
    pub fn unassign(&mut self, slot: &Slot) -> Option<String> {
        self.values.remove(slot)
    }

    pub fn get(&self, slot: &Slot) -> Option<&str> {
        self.values.get(slot).map(String::as_str)
    }

    pub fn contains(&self, slot: &Slot) -> bool {
        self.values.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True once every one of `slot_count` slots carries a word
    pub fn is_complete(&self, slot_count: usize) -> bool {
        self.values.len() == slot_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &String)> {
        self.values.iter()
    }
}

impl FromIterator<(Slot, String)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Slot, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
