//! Variable and value ordering strategies for backtracking search.
//!
//! Both orderings are advisory: they change how quickly a fill is found, never
//! whether one is found.

use super::{Assignment, DomainStore};
use crate::crossword::{Crossword, Slot};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// How the next slot to fill is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableOrdering {
    /// Fewest remaining candidates first, then most crossings, then slot order
    #[default]
    MinimumRemainingValues,
    /// First unassigned slot in slot order
    Static,
}

/// How a slot's candidates are ordered before they are tried
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrdering {
    /// Candidates that rule out the fewest neighbor words first
    #[default]
    LeastConstraining,
    /// Alphabetical order
    Lexicographic,
}

impl VariableOrdering {
    /// Pick the next unassigned slot, or `None` when every slot is assigned
    pub fn select(
        &self,
        crossword: &Crossword,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Slot> {
        let mut unassigned = crossword
            .slots()
            .iter()
            .copied()
            .filter(|slot| !assignment.contains(slot));

        match self {
            VariableOrdering::MinimumRemainingValues => unassigned
                .min_by_key(|slot| (domains.size(slot), Reverse(crossword.degree(slot)))),
            VariableOrdering::Static => unassigned.next(),
        }
    }
}

impl ValueOrdering {
    /// Candidates for `slot` in the order they should be tried.
    ///
    /// Reads the domain store without modifying it.
    pub fn order(&self, crossword: &Crossword, domains: &DomainStore, slot: &Slot) -> Vec<String> {
        match self {
            ValueOrdering::Lexicographic => domains.domain(slot).iter().cloned().collect(),
            ValueOrdering::LeastConstraining => {
                let scores = ruled_out_counts(crossword, domains, slot);
                domains
                    .domain(slot)
                    .iter()
                    .zip(scores)
                    .sorted_by_key(|(_, ruled_out)| *ruled_out)
                    .map(|(word, _)| word.clone())
                    .collect()
            }
        }
    }
}

/// For each candidate of `slot` (in domain order), how many words it would
/// rule out across all neighboring domains
pub fn ruled_out_counts(crossword: &Crossword, domains: &DomainStore, slot: &Slot) -> Vec<usize> {
    // (index into our word, letter histogram of the neighbor at the crossing, neighbor size)
    let crossings: Vec<(usize, HashMap<u8, usize>, usize)> = crossword
        .neighbors(slot)
        .iter()
        .filter_map(|neighbor| {
            let (k_slot, k_neighbor) = crossword.overlap(slot, neighbor)?;
            let candidates = domains.domain(neighbor);
            let histogram = candidates
                .iter()
                .filter_map(|word| word.as_bytes().get(k_neighbor).copied())
                .counts();
            Some((k_slot, histogram, candidates.len()))
        })
        .collect();

    domains
        .domain(slot)
        .iter()
        .map(|word| {
            crossings
                .iter()
                .map(|(k_slot, histogram, total)| {
                    let agreeing = word
                        .as_bytes()
                        .get(*k_slot)
                        .and_then(|letter| histogram.get(letter))
                        .copied()
                        .unwrap_or(0);
                    total - agreeing
                })
                .sum::<usize>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::Direction;

    fn plus(words: &[&str]) -> (Crossword, Slot, Slot) {
        let crossword = Crossword::from_rows(&["#_#", "___", "#_#"], words.iter().copied()).unwrap();
        (
            crossword,
            Slot::new(1, 0, Direction::Across, 3),
            Slot::new(0, 1, Direction::Down, 3),
        )
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let (crossword, across, down) = plus(&["one", "ant", "six"]);
        let mut domains = DomainStore::initialize(&crossword);
        domains.remove(&across, "SIX");

        let ordering = VariableOrdering::MinimumRemainingValues;
        assert_eq!(ordering.select(&crossword, &domains, &Assignment::new()), Some(across));

        let mut assignment = Assignment::new();
        assignment.assign(across, "ONE".to_string());
        assert_eq!(ordering.select(&crossword, &domains, &assignment), Some(down));

        assignment.assign(down, "ANT".to_string());
        assert_eq!(ordering.select(&crossword, &domains, &assignment), None);
    }

    #[test]
    fn test_mrv_breaks_ties_by_degree() {
        // every domain has two words; each across crosses three downs, each down two acrosses
        let crossword = Crossword::from_rows(&["___", "___"], ["ab", "cd", "abc", "def"]).unwrap();
        let domains = DomainStore::initialize(&crossword);
        let chosen = VariableOrdering::MinimumRemainingValues
            .select(&crossword, &domains, &Assignment::new())
            .unwrap();
        assert_eq!(chosen.direction, Direction::Across);
        assert_eq!(chosen, Slot::new(0, 0, Direction::Across, 3));
    }

    #[test]
    fn test_static_ordering() {
        let (crossword, _, down) = plus(&["one"]);
        let domains = DomainStore::initialize(&crossword);
        assert_eq!(
            VariableOrdering::Static.select(&crossword, &domains, &Assignment::new()),
            Some(down)
        );
    }

    #[test]
    fn test_least_constraining_value_order() {
        // down holds ANT, ONE, SIX: middle letters N, N, I
        let (crossword, across, _) = plus(&["one", "ant", "six"]);
        let domains = DomainStore::initialize(&crossword);

        assert_eq!(ruled_out_counts(&crossword, &domains, &across), vec![1, 1, 2]);
        assert_eq!(
            ValueOrdering::LeastConstraining.order(&crossword, &domains, &across),
            vec!["ANT", "ONE", "SIX"]
        );
    }

    #[test]
    fn test_ordering_does_not_touch_domains() {
        let (crossword, across, _) = plus(&["six", "one", "ant"]);
        let domains = DomainStore::initialize(&crossword);
        let before = domains.clone();

        let ordered = ValueOrdering::LeastConstraining.order(&crossword, &domains, &across);
        assert_eq!(ordered.len(), 3);
        assert_eq!(domains, before);

        assert_eq!(
            ValueOrdering::Lexicographic.order(&crossword, &domains, &across),
            vec!["ANT", "ONE", "SIX"]
        );
    }
}
