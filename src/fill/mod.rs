//! Crossword filling: solve orchestration, solutions and validation

pub mod creator;
pub mod solution;
pub mod validator;

pub use creator::{fill_puzzle_file, CrosswordCreator, FillReport, PuzzleAnalysis, SlotDomain};
pub use solution::{Solution, SolutionEntry, SolutionMetadata};
pub use validator::{SolutionValidator, ValidationDetails, ValidationResult};
