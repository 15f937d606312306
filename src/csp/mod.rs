//! Constraint satisfaction engine for crossword fills

pub mod arc_consistency;
pub mod assignment;
pub mod consistency;
pub mod domain;
pub mod heuristics;
pub mod search;

pub use arc_consistency::{ArcConsistency, Propagation, PropagationStats};
pub use assignment::Assignment;
pub use consistency::{find_violation, find_violations, is_consistent, Violation};
pub use domain::DomainStore;
pub use heuristics::{ValueOrdering, VariableOrdering};
pub use search::{
    AbortReason, BacktrackingSearch, SearchLimits, SearchOptions, SearchOutcome, SearchStatistics,
    ValueCheck,
};
