//! Depth-first backtracking search over slot assignments

use super::{is_consistent, Assignment, DomainStore, ValueOrdering, VariableOrdering};
use crate::crossword::Crossword;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// When a tentative word is checked against the constraints.
///
/// Both modes only ever return sound fills; they differ in how much of the
/// search tree gets explored before a conflict is noticed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCheck {
    /// Place the word, then check the assignment including it; reject at once
    #[default]
    AfterInsertion,
    /// Check the assignment as it stands on entering each node, before any
    /// new word is placed; a bad word is only caught one level deeper
    BeforeInsertion,
}

/// Budget for a single search, polled once per node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// A timeout too large to represent as an instant leaves the deadline unset
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    TimeLimit,
    NodeLimit,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::TimeLimit => write!(f, "time limit reached"),
            AbortReason::NodeLimit => write!(f, "node limit reached"),
        }
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete assignment satisfying every constraint
    Solved(Assignment),
    /// Every branch failed; the instance has no fill
    Exhausted,
    /// A limit stopped the search before it could decide
    Aborted(AbortReason),
}

impl SearchOutcome {
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            SearchOutcome::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Strategy knobs for [`BacktrackingSearch`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    pub value_check: ValueCheck,
    pub limits: SearchLimits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    pub nodes: u64,
    pub backtracks: u64,
    pub consistency_checks: u64,
    pub max_depth: usize,
    pub elapsed: Duration,
}

enum Step {
    Solved,
    Failed,
    Aborted(AbortReason),
}

/// Backtracking search over the domains left by propagation.
///
/// Domains steer the slot and word orderings but are never narrowed during
/// the search itself.
pub struct BacktrackingSearch<'a> {
    crossword: &'a Crossword,
    domains: &'a DomainStore,
    options: SearchOptions,
    stats: SearchStatistics,
}

impl<'a> BacktrackingSearch<'a> {
    pub fn new(crossword: &'a Crossword, domains: &'a DomainStore, options: SearchOptions) -> Self {
        Self {
            crossword,
            domains,
            options,
            stats: SearchStatistics::default(),
        }
    }

    /// Search from the empty assignment; the first complete fill wins
    pub fn run(&mut self) -> SearchOutcome {
        let start = Instant::now();
        let mut assignment = Assignment::new();

        let outcome = match self.backtrack(&mut assignment, 0) {
            Step::Solved => SearchOutcome::Solved(assignment),
            Step::Failed => SearchOutcome::Exhausted,
            Step::Aborted(reason) => SearchOutcome::Aborted(reason),
        };

        self.stats.elapsed = start.elapsed();
        outcome
    }

    pub fn stats(&self) -> &SearchStatistics {
        &self.stats
    }

    pub fn into_stats(self) -> SearchStatistics {
        self.stats
    }

    fn check_limits(&self) -> Option<AbortReason> {
        let limits = &self.options.limits;
        if limits.node_limit.is_some_and(|limit| self.stats.nodes >= limit) {
            return Some(AbortReason::NodeLimit);
        }
        if limits.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(AbortReason::TimeLimit);
        }
        None
    }

    fn consistent(&mut self, assignment: &Assignment) -> bool {
        self.stats.consistency_checks += 1;
        is_consistent(self.crossword, assignment)
    }

    fn backtrack(&mut self, assignment: &mut Assignment, depth: usize) -> Step {
        if let Some(reason) = self.check_limits() {
            return Step::Aborted(reason);
        }
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if self.options.value_check == ValueCheck::BeforeInsertion && !self.consistent(assignment) {
            return Step::Failed;
        }

        if assignment.is_complete(self.crossword.slot_count()) {
            return Step::Solved;
        }

        let Some(slot) = self
            .options
            .variable_ordering
            .select(self.crossword, self.domains, assignment)
        else {
            return Step::Solved;
        };

        let candidates = self
            .options
            .value_ordering
            .order(self.crossword, self.domains, &slot);

        for word in candidates {
            assignment.assign(slot, word);

            if self.options.value_check == ValueCheck::AfterInsertion && !self.consistent(assignment) {
                assignment.unassign(&slot);
                continue;
            }

            match self.backtrack(assignment, depth + 1) {
                Step::Solved => return Step::Solved,
                Step::Aborted(reason) => return Step::Aborted(reason),
                Step::Failed => {
                    assignment.unassign(&slot);
                    self.stats.backtracks += 1;
                }
            }
        }

        Step::Failed
    }
}
