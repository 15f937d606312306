//! AC-3 style arc consistency over the crossing graph.
//!
//! An arc `(x, y)` is consistent when every word left in `x`'s domain agrees
//! with at least one word in `y`'s domain at their shared cell. Enforcement
//! works through a queue of arcs, revising `x` against `y` and re-queueing the
//! arcs that point at `x` whenever its domain shrinks, until nothing changes or
//! some domain runs dry.

use super::DomainStore;
use crate::crossword::{Crossword, Slot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Result of a propagation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Propagation {
    /// The queue drained and every domain still has candidates
    Consistent,
    /// This slot's domain became empty; the instance cannot be satisfied
    Wipeout(Slot),
}

impl Propagation {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Propagation::Consistent)
    }
}

/// Counters collected while enforcing arc consistency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationStats {
    pub arcs_processed: usize,
    pub revisions: usize,
    pub words_removed: usize,
}

/// Work queue of arcs that ignores arcs already waiting in it
#[derive(Debug, Default)]
struct ArcQueue {
    queue: VecDeque<(Slot, Slot)>,
    pending: HashSet<(Slot, Slot)>,
}

impl ArcQueue {
    fn with_arcs<I: IntoIterator<Item = (Slot, Slot)>>(arcs: I) -> Self {
        let mut queue = Self::default();
        for arc in arcs {
            queue.push(arc);
        }
        queue
    }

    fn push(&mut self, arc: (Slot, Slot)) {
        if self.pending.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    fn pop(&mut self) -> Option<(Slot, Slot)> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }
}

/// Enforces arc consistency on a [`DomainStore`] for one puzzle
pub struct ArcConsistency<'a> {
    crossword: &'a Crossword,
    stats: PropagationStats,
}

impl<'a> ArcConsistency<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        Self {
            crossword,
            stats: PropagationStats::default(),
        }
    }

    /// Make `x` arc consistent with `y`.
    ///
    /// Removes every word from `x`'s domain that has no supporting word in
    /// `y`'s domain at the overlap. Returns whether `x`'s domain changed; slots
    /// that do not cross are left alone.
    pub fn revise(&mut self, domains: &mut DomainStore, x: &Slot, y: &Slot) -> bool {
        let Some((kx, ky)) = self.crossword.overlap(x, y) else {
            return false;
        };

        let supported: BTreeSet<u8> = domains
            .domain(y)
            .iter()
            .filter_map(|word| word.as_bytes().get(ky).copied())
            .collect();

        let removed = domains.retain(x, |word| {
            word.as_bytes()
                .get(kx)
                .is_some_and(|letter| supported.contains(letter))
        });

        if removed > 0 {
            self.stats.revisions += 1;
            self.stats.words_removed += removed;
        }
        removed > 0
    }

    /// Run AC-3 starting from `initial_arcs`, or from every crossing arc when
    /// `None`.
    ///
    /// Stops at the first wiped-out domain without draining the rest of the
    /// queue.
    pub fn enforce(
        &mut self,
        domains: &mut DomainStore,
        initial_arcs: Option<Vec<(Slot, Slot)>>,
    ) -> Propagation {
        let arcs = initial_arcs.unwrap_or_else(|| self.crossword.arcs());
        let mut queue = ArcQueue::with_arcs(arcs);

        while let Some((x, y)) = queue.pop() {
            self.stats.arcs_processed += 1;

            if !self.revise(domains, &x, &y) {
                continue;
            }

            if domains.is_empty(&x) {
                return Propagation::Wipeout(x);
            }

            for &z in self.crossword.neighbors(&x) {
                if z != y {
                    queue.push((z, x));
                }
            }
        }

        Propagation::Consistent
    }

    pub fn stats(&self) -> &PropagationStats {
        &self.stats
    }

    pub fn into_stats(self) -> PropagationStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::Direction;

    fn plus(words: &[&str]) -> (Crossword, Slot, Slot) {
        let crossword = Crossword::from_rows(&["#_#", "___", "#_#"], words.iter().copied()).unwrap();
        let across = Slot::new(1, 0, Direction::Across, 3);
        let down = Slot::new(0, 1, Direction::Down, 3);
        (crossword, across, down)
    }

    fn is_arc_consistent(crossword: &Crossword, domains: &DomainStore) -> bool {
        crossword.arcs().iter().all(|(x, y)| {
            let (kx, ky) = crossword.overlap(x, y).unwrap();
            domains.domain(x).iter().all(|word| {
                domains
                    .domain(y)
                    .iter()
                    .any(|other| word.as_bytes()[kx] == other.as_bytes()[ky])
            })
        })
    }

    #[test]
    fn test_revise_removes_unsupported_words() {
        let (crossword, across, down) = plus(&["one", "ant", "six", "oxo"]);
        let mut domains = DomainStore::initialize(&crossword);
        let mut engine = ArcConsistency::new(&crossword);

        // middle letters: N, N, I, X; every one of them is supported by itself
        assert!(!engine.revise(&mut domains, &across, &down));

        domains.remove(&down, "SIX");
        domains.remove(&down, "OXO");
        assert!(engine.revise(&mut domains, &across, &down));
        assert_eq!(
            domains.domain(&across).iter().collect::<Vec<_>>(),
            vec!["ANT", "ONE"]
        );
        assert_eq!(engine.stats().words_removed, 2);
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let crossword = Crossword::from_rows(&["___", "###", "___"], ["abc", "xyz"]).unwrap();
        let top = Slot::new(0, 0, Direction::Across, 3);
        let bottom = Slot::new(2, 0, Direction::Across, 3);
        let mut domains = DomainStore::initialize(&crossword);
        let mut engine = ArcConsistency::new(&crossword);

        assert!(!engine.revise(&mut domains, &top, &bottom));
        assert_eq!(domains.size(&top), 2);
    }

    #[test]
    fn test_enforce_reaches_fixed_point() {
        let crossword = Crossword::from_rows(
            &["___", "_#_", "___"],
            ["cat", "cob", "ten", "bun", "dog", "ear", "sun", "tub"],
        )
        .unwrap();
        let mut domains = DomainStore::initialize(&crossword);
        let mut engine = ArcConsistency::new(&crossword);

        assert_eq!(engine.enforce(&mut domains, None), Propagation::Consistent);
        assert!(is_arc_consistent(&crossword, &domains));
        assert!(domains.total_size() < 4 * 8);
    }

    #[test]
    fn test_enforce_is_idempotent() {
        let crossword =
            Crossword::from_rows(&["___", "_#_", "___"], ["cat", "cob", "ten", "bun", "dog"]).unwrap();
        let mut domains = DomainStore::initialize(&crossword);
        ArcConsistency::new(&crossword).enforce(&mut domains, None);
        let settled = domains.clone();

        let mut second = ArcConsistency::new(&crossword);
        assert_eq!(second.enforce(&mut domains, None), Propagation::Consistent);
        assert_eq!(second.stats().words_removed, 0);
        assert_eq!(domains, settled);
    }

    #[test]
    fn test_enforce_detects_wipeout() {
        // each word supports itself while both slots keep both words
        let (crossword, _, _) = plus(&["abc", "xyz"]);
        let mut domains = DomainStore::initialize(&crossword);
        let mut engine = ArcConsistency::new(&crossword);
        assert!(engine.enforce(&mut domains, None).is_consistent());

        // ABC and XYZ never agree in the middle
        let (crossword, across, down) = plus(&["abc", "xyz"]);
        let mut domains = DomainStore::initialize(&crossword);
        domains.remove(&across, "XYZ");
        domains.remove(&down, "ABC");
        let mut engine = ArcConsistency::new(&crossword);
        assert!(matches!(
            engine.enforce(&mut domains, None),
            Propagation::Wipeout(slot) if slot == across || slot == down
        ));
    }

    #[test]
    fn test_enforce_with_explicit_arcs() {
        let (crossword, across, down) = plus(&["one", "ant", "six"]);
        let mut domains = DomainStore::initialize(&crossword);
        domains.remove(&down, "SIX");

        let mut engine = ArcConsistency::new(&crossword);
        let outcome = engine.enforce(&mut domains, Some(vec![(across, down)]));
        assert_eq!(outcome, Propagation::Consistent);
        assert!(!domains.domain(&across).contains("SIX"));
        assert_eq!(engine.stats().arcs_processed, 1);
    }
}
