//! Crossword CSP Filler
//!
//! This library fills crossword grids from a word list by treating each slot
//! as a constraint satisfaction variable: node and arc consistency prune the
//! candidate words, then a backtracking search finds a fill.

pub mod config;
pub mod crossword;
pub mod csp;
pub mod fill;
pub mod utils;

pub use config::Settings;
pub use crossword::{Crossword, Direction, Slot, Structure};
pub use csp::Assignment;
pub use fill::{CrosswordCreator, Solution};

use anyhow::Result;

/// Main entry point: fill a crossword with the default strategies.
///
/// Returns `None` when no fill exists.
pub fn solve(crossword: &Crossword) -> Option<Assignment> {
    CrosswordCreator::with_crossword(crossword.clone(), config::SolverConfig::default()).solve()
}

/// Fill the puzzle named in the settings within the configured budget
pub fn solve_from_settings(settings: &Settings) -> Result<fill::FillReport> {
    let creator = CrosswordCreator::new(settings)?;
    Ok(creator.solve_with_limits())
}
