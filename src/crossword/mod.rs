//! Crossword problem model: structure, slots, overlaps and vocabulary

pub mod grid;
pub mod io;
pub mod puzzle;
pub mod slot;

pub use grid::Structure;
pub use io::{create_example_puzzles, load_puzzle_from_file, PuzzleDefinition};
pub use puzzle::Crossword;
pub use slot::{find_slots, Direction, Slot};

use thiserror::Error;

/// Reasons a structure or word list cannot form a puzzle
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("structure has no cells")]
    EmptyStructure,

    #[error("row {row} has length {length}, expected {expected}")]
    RaggedRow {
        row: usize,
        length: usize,
        expected: usize,
    },

    #[error("invalid character '{ch}' at ({row}, {col}); only '_' and '#' are allowed")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error("word '{0}' contains characters other than ASCII letters")]
    InvalidWord(String),
}
