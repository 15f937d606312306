//! Solution representation for filled crosswords

use crate::crossword::Slot;
use crate::csp::{Assignment, PropagationStats, SearchStatistics};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A complete fill of a crossword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Name of the puzzle this fill belongs to, if it had one
    #[serde(default)]
    pub puzzle_name: Option<String>,
    /// One entry per slot, in slot order
    pub entries: Vec<SolutionEntry>,
    /// Time taken to find this fill
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

/// A word placed in a slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolutionEntry {
    pub slot: Slot,
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Stable identifier derived from the entries
    pub id: String,
    pub slot_count: usize,
    /// Distinct cells covered by the entries
    pub filled_cells: usize,
    #[serde(default)]
    pub propagation: PropagationStats,
    #[serde(default)]
    pub search: SearchStatistics,
}

impl Solution {
    /// Create a solution from a complete assignment
    pub fn new(
        assignment: &Assignment,
        propagation: PropagationStats,
        search: SearchStatistics,
        solve_time: Duration,
    ) -> Self {
        let entries: Vec<SolutionEntry> = assignment
            .iter()
            .map(|(slot, word)| SolutionEntry {
                slot: *slot,
                word: word.clone(),
            })
            .collect();

        let metadata = SolutionMetadata {
            id: Self::generate_id(&entries),
            slot_count: entries.len(),
            filled_cells: Self::count_cells(&entries),
            propagation,
            search,
        };

        Self {
            puzzle_name: None,
            entries,
            solve_time,
            metadata,
        }
    }

    pub fn with_puzzle_name(mut self, name: Option<String>) -> Self {
        self.puzzle_name = name;
        self
    }

    /// Rebuild the assignment this solution records
    pub fn to_assignment(&self) -> Assignment {
        self.entries
            .iter()
            .map(|entry| (entry.slot, entry.word.clone()))
            .collect()
    }

    /// Word placed in `slot`, if any
    pub fn word_for(&self, slot: &Slot) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.slot == *slot)
            .map(|entry| entry.word.as_str())
    }

    /// Two solutions are the same fill when their entries match
    pub fn is_equivalent_to(&self, other: &Solution) -> bool {
        self.entries == other.entries
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = self.to_json().context("Failed to serialize solution")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write solution file: {}", path.display()))?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read solution file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse solution file: {}", path.display()))
    }

    fn generate_id(entries: &[SolutionEntry]) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        entries.hash(&mut hasher);

        format!("fill_{:x}", hasher.finish())
    }

    fn count_cells(entries: &[SolutionEntry]) -> usize {
        let cells: std::collections::HashSet<(usize, usize)> =
            entries.iter().flat_map(|entry| entry.slot.cells()).collect();
        cells.len()
    }
}
