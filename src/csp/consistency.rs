//! Consistency checks for partial assignments

use super::Assignment;
use crate::crossword::{Crossword, Slot};
use std::collections::HashMap;
use std::fmt;

/// A constraint broken by an assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The same word sits in two slots
    DuplicateWord { word: String, first: Slot, second: Slot },
    /// The word does not fit the slot's length
    LengthMismatch { slot: Slot, word: String },
    /// Two crossing slots disagree on their shared cell
    CrossingConflict {
        first: Slot,
        second: Slot,
        cell: (usize, usize),
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateWord { word, first, second } => {
                write!(f, "word {} used by both {} and {}", word, first, second)
            }
            Violation::LengthMismatch { slot, word } => {
                write!(f, "word {} ({} letters) does not fit {}", word, word.len(), slot)
            }
            Violation::CrossingConflict { first, second, cell } => {
                write!(f, "{} and {} disagree at cell {:?}", first, second, cell)
            }
        }
    }
}

/// Every violation in `assignment`. Unassigned slots never conflict.
pub fn find_violations(crossword: &Crossword, assignment: &Assignment) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashMap<&str, Slot> = HashMap::new();

    for (slot, word) in assignment.iter() {
        match seen.get(word.as_str()) {
            Some(&first) => violations.push(Violation::DuplicateWord {
                word: word.clone(),
                first,
                second: *slot,
            }),
            None => {
                seen.insert(word.as_str(), *slot);
            }
        }

        if word.len() != slot.length {
            violations.push(Violation::LengthMismatch {
                slot: *slot,
                word: word.clone(),
            });
        }

        for neighbor in crossword.neighbors(slot) {
            // each crossing is reported once, from its lower slot
            if neighbor < slot {
                continue;
            }
            let Some(other) = assignment.get(neighbor) else {
                continue;
            };
            let Some((k_slot, k_neighbor)) = crossword.overlap(slot, neighbor) else {
                continue;
            };
            if word.as_bytes().get(k_slot) != other.as_bytes().get(k_neighbor) {
                violations.push(Violation::CrossingConflict {
                    first: *slot,
                    second: *neighbor,
                    cell: slot.cell(k_slot),
                });
            }
        }
    }

    violations
}

/// The first violation in `assignment`, if any
pub fn find_violation(crossword: &Crossword, assignment: &Assignment) -> Option<Violation> {
    find_violations(crossword, assignment).into_iter().next()
}

/// Whether `assignment` keeps words unique, fits every slot, and agrees at
/// every crossing between assigned slots
pub fn is_consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    find_violation(crossword, assignment).is_none()
}
