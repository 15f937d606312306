//! Independent validation of crossword fills

use super::Solution;
use crate::crossword::{Crossword, Slot};
use crate::csp::{find_violations, Assignment, Violation};
use std::collections::BTreeSet;
use std::time::Instant;

/// Checks that an assignment is a complete, sound fill of a crossword
pub struct SolutionValidator<'a> {
    crossword: &'a Crossword,
}

/// Result of solution validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub details: ValidationDetails,
}

/// Detailed validation information
#[derive(Debug, Clone, Default)]
pub struct ValidationDetails {
    pub slots_checked: usize,
    /// Slots of the puzzle without a word
    pub missing_slots: Vec<Slot>,
    /// Slots in the assignment that the puzzle does not have
    pub unknown_slots: Vec<Slot>,
    /// Words not in the puzzle's vocabulary
    pub foreign_words: Vec<String>,
    /// Length, uniqueness and crossing violations
    pub violations: Vec<Violation>,
    /// Cells where a slot's letter differs from the letter written to the grid
    pub conflicting_cells: Vec<(usize, usize)>,
    pub validation_time_ms: u64,
}

impl<'a> SolutionValidator<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        Self { crossword }
    }

    /// Validate an assignment as a final fill
    pub fn validate(&self, assignment: &Assignment) -> ValidationResult {
        let start_time = Instant::now();
        let known: BTreeSet<&Slot> = self.crossword.slots().iter().collect();

        let missing_slots: Vec<Slot> = self
            .crossword
            .slots()
            .iter()
            .filter(|slot| !assignment.contains(slot))
            .copied()
            .collect();

        let unknown_slots: Vec<Slot> = assignment
            .iter()
            .map(|(slot, _)| *slot)
            .filter(|slot| !known.contains(slot))
            .collect();

        let foreign_words: Vec<String> = assignment
            .iter()
            .filter(|(_, word)| !self.crossword.words().contains(*word))
            .map(|(_, word)| word.clone())
            .collect();

        let violations = find_violations(self.crossword, assignment);
        let conflicting_cells = self.conflicting_cells(assignment);

        let mut details = ValidationDetails {
            slots_checked: assignment.len(),
            missing_slots,
            unknown_slots,
            foreign_words,
            violations,
            conflicting_cells,
            validation_time_ms: 0,
        };
        details.validation_time_ms = start_time.elapsed().as_millis() as u64;

        let is_valid = details.missing_slots.is_empty()
            && details.unknown_slots.is_empty()
            && details.foreign_words.is_empty()
            && details.violations.is_empty()
            && details.conflicting_cells.is_empty();

        let error_message = if is_valid {
            None
        } else {
            Some(Self::generate_error_message(&details))
        };

        ValidationResult {
            is_valid,
            error_message,
            details,
        }
    }

    /// Validate a saved solution
    pub fn validate_solution(&self, solution: &Solution) -> ValidationResult {
        self.validate(&solution.to_assignment())
    }

    /// Re-read every assigned word off the letter grid
    fn conflicting_cells(&self, assignment: &Assignment) -> Vec<(usize, usize)> {
        let letters = self.crossword.letter_grid(assignment);
        let mut conflicts = BTreeSet::new();

        for (slot, word) in assignment.iter() {
            for ((row, col), expected) in slot.cells().zip(word.chars()) {
                let written = letters.get(row).and_then(|cells| cells.get(col)).copied().flatten();
                if written != Some(expected) {
                    conflicts.insert((row, col));
                }
            }
        }

        conflicts.into_iter().collect()
    }

    fn generate_error_message(details: &ValidationDetails) -> String {
        let mut message = String::new();

        if !details.missing_slots.is_empty() {
            message.push_str(&format!("{} slots have no word. ", details.missing_slots.len()));
        }
        if !details.unknown_slots.is_empty() {
            message.push_str(&format!(
                "{} entries name slots the puzzle does not have. ",
                details.unknown_slots.len()
            ));
        }
        if !details.foreign_words.is_empty() {
            message.push_str(&format!(
                "Words outside the vocabulary: {}. ",
                details.foreign_words.join(", ")
            ));
        }
        if !details.violations.is_empty() {
            message.push_str(&format!("Found {} constraint violations. ", details.violations.len()));

            for (i, violation) in details.violations.iter().take(3).enumerate() {
                if i == 0 {
                    message.push_str("Examples: ");
                }
                message.push_str(&format!("{}; ", violation));
            }

            if details.violations.len() > 3 {
                message.push_str(&format!("... and {} more", details.violations.len() - 3));
            }
        }

        message.trim_end().to_string()
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;

        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }

        let details = &self.details;
        writeln!(f, "Slots checked: {}", details.slots_checked)?;
        writeln!(f, "Missing slots: {}", details.missing_slots.len())?;
        writeln!(f, "Constraint violations: {}", details.violations.len())?;
        writeln!(f, "Conflicting cells: {}", details.conflicting_cells.len())?;
        writeln!(f, "Validation time: {}ms", details.validation_time_ms)?;

        Ok(())
    }
}
