//! The crossword problem model handed to the solver

use super::{find_slots, PuzzleError, Slot, Structure};
use crate::csp::Assignment;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A crossword structure together with its vocabulary.
///
/// Slots, overlaps and neighbor lists are derived from the structure once at
/// construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct Crossword {
    structure: Structure,
    slots: Vec<Slot>,
    overlaps: HashMap<(Slot, Slot), (usize, usize)>,
    neighbors: BTreeMap<Slot, Vec<Slot>>,
    words: BTreeSet<String>,
}

impl Crossword {
    /// Build the model from a structure and a word list.
    ///
    /// Words are trimmed and upper-cased; blank entries are skipped and
    /// anything that is not ASCII alphabetic is rejected.
    pub fn new<I, S>(structure: Structure, words: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = BTreeSet::new();
        for word in words {
            if let Some(word) = normalize_word(word.as_ref())? {
                vocabulary.insert(word);
            }
        }

        let slots = find_slots(&structure);
        let overlaps = compute_overlaps(&slots);

        let mut neighbors: BTreeMap<Slot, Vec<Slot>> =
            slots.iter().map(|&slot| (slot, Vec::new())).collect();
        for &(a, b) in overlaps.keys() {
            if let Some(list) = neighbors.get_mut(&a) {
                list.push(b);
            }
        }
        for list in neighbors.values_mut() {
            list.sort();
        }

        Ok(Self {
            structure,
            slots,
            overlaps,
            neighbors,
            words: vocabulary,
        })
    }

    /// Build the model from `_`/`#` structure rows
    pub fn from_rows<R, I, S>(rows: &[R], words: I) -> Result<Self, PuzzleError>
    where
        R: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Structure::from_rows(rows)?, words)
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn width(&self) -> usize {
        self.structure.width()
    }

    pub fn height(&self) -> usize {
        self.structure.height()
    }

    /// All slots in stable order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The vocabulary shared by every slot
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// Indices into `a`'s and `b`'s words that share a cell, if the slots cross
    pub fn overlap(&self, a: &Slot, b: &Slot) -> Option<(usize, usize)> {
        self.overlaps.get(&(*a, *b)).copied()
    }

    /// Slots crossing `slot`, in stable order
    pub fn neighbors(&self, slot: &Slot) -> &[Slot] {
        self.neighbors.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, slot: &Slot) -> usize {
        self.neighbors(slot).len()
    }

    /// Every ordered pair of distinct slots that cross
    pub fn arcs(&self) -> Vec<(Slot, Slot)> {
        self.neighbors
            .iter()
            .flat_map(|(&x, list)| list.iter().map(move |&y| (x, y)))
            .collect()
    }

    /// Number of crossing cells (unordered slot pairs)
    pub fn crossing_count(&self) -> usize {
        self.overlaps.len() / 2
    }

    /// Letters written into each cell by `assignment`.
    ///
    /// Where two assigned slots disagree on a cell the slot visited last wins;
    /// callers that care about conflicts check them separately.
    pub fn letter_grid(&self, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width()]; self.height()];
        for (slot, word) in assignment.iter() {
            for ((row, col), letter) in slot.cells().zip(word.chars()) {
                if row < self.height() && col < self.width() {
                    letters[row][col] = Some(letter);
                }
            }
        }
        letters
    }
}

fn normalize_word(raw: &str) -> Result<Option<String>, PuzzleError> {
    let word = raw.trim();
    if word.is_empty() {
        return Ok(None);
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PuzzleError::InvalidWord(word.to_string()));
    }
    Ok(Some(word.to_ascii_uppercase()))
}

fn compute_overlaps(slots: &[Slot]) -> HashMap<(Slot, Slot), (usize, usize)> {
    let mut occupants: HashMap<(usize, usize), Vec<(Slot, usize)>> = HashMap::new();
    for &slot in slots {
        for (k, cell) in slot.cells().enumerate() {
            occupants.entry(cell).or_default().push((slot, k));
        }
    }

    let mut overlaps = HashMap::new();
    for entries in occupants.values() {
        for (&(a, ka), &(b, kb)) in entries.iter().tuple_combinations() {
            overlaps.insert((a, b), (ka, kb));
            overlaps.insert((b, a), (kb, ka));
        }
    }
    overlaps
}
