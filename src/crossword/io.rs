//! Loading and saving puzzle definitions

use super::{Crossword, Structure};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a puzzle: structure rows plus the word list.
///
/// Structure rows use `_` for white cells and `#` for black cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub structure: Vec<String>,
    pub words: Vec<String>,
}

impl PuzzleDefinition {
    /// Build the solver's problem model from this definition
    pub fn to_crossword(&self) -> Result<Crossword> {
        let structure = Structure::from_rows(&self.structure)
            .context("Invalid puzzle structure")?;
        let crossword = Crossword::new(structure, &self.words)
            .context("Invalid puzzle word list")?;
        Ok(crossword)
    }

    /// Parse a definition from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse puzzle definition")
    }

    /// Load a definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse puzzle file: {}", path.as_ref().display()))
    }

    /// Save the definition as YAML, creating parent directories as needed
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize puzzle definition")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write puzzle file: {}", path.as_ref().display()))?;

        Ok(())
    }
}

/// Load a puzzle file straight into a problem model
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<Crossword> {
    PuzzleDefinition::from_file(&path)?
        .to_crossword()
        .with_context(|| format!("Failed to build puzzle from file: {}", path.as_ref().display()))
}

fn define(name: &str, structure: &[&str], words: &[&str]) -> PuzzleDefinition {
    PuzzleDefinition {
        name: Some(name.to_string()),
        structure: structure.iter().map(|row| row.to_string()).collect(),
        words: words.iter().map(|word| word.to_string()).collect(),
    }
}

fn example_puzzles() -> Vec<(&'static str, PuzzleDefinition)> {
    vec![
        (
            "ring.yaml",
            define(
                "ring",
                &["___", "_#_", "___"],
                &["cat", "cob", "ten", "bun", "dog", "ear", "sun"],
            ),
        ),
        (
            "plus.yaml",
            define("plus", &["#_#", "___", "#_#"], &["one", "ant", "six", "owl"]),
        ),
        (
            "square.yaml",
            define("square", &["__", "__"], &["ab", "ba", "aa"]),
        ),
        (
            "block.yaml",
            define("block", &["__", "__"], &["ab", "cd", "ac", "bd"]),
        ),
    ]
}

/// Create example puzzle files for trying out the solver
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (filename, definition) in example_puzzles() {
        definition
            .to_file(dir.join(filename))
            .with_context(|| format!("Failed to write {}", filename))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_definition() {
        let yaml = "name: tiny\nstructure:\n  - \"__\"\n  - \"#_\"\nwords:\n  - ab\n  - bc\n";
        let definition = PuzzleDefinition::from_yaml(yaml).unwrap();
        assert_eq!(definition.name.as_deref(), Some("tiny"));

        let crossword = definition.to_crossword().unwrap();
        assert_eq!(crossword.width(), 2);
        assert_eq!(crossword.height(), 2);
        assert_eq!(crossword.slot_count(), 2);
        assert_eq!(crossword.words().len(), 2);
    }

    #[test]
    fn test_name_is_optional() {
        let yaml = "structure: [\"___\"]\nwords: [abc]\n";
        let definition = PuzzleDefinition::from_yaml(yaml).unwrap();
        assert!(definition.name.is_none());
    }

    #[test]
    fn test_invalid_definitions() {
        let bad_cell = PuzzleDefinition {
            name: None,
            structure: vec!["_?_".to_string()],
            words: vec!["abc".to_string()],
        };
        assert!(bad_cell.to_crossword().is_err());

        let bad_word = PuzzleDefinition {
            name: None,
            structure: vec!["___".to_string()],
            words: vec!["a-c".to_string()],
        };
        assert!(bad_word.to_crossword().is_err());

        assert!(PuzzleDefinition::from_yaml("structure: 3").is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/puzzle.yaml");

        let definition = PuzzleDefinition {
            name: Some("strip".to_string()),
            structure: vec!["____".to_string()],
            words: vec!["word".to_string(), "list".to_string()],
        };
        definition.to_file(&path).unwrap();

        let loaded = PuzzleDefinition::from_file(&path).unwrap();
        assert_eq!(loaded, definition);

        let crossword = load_puzzle_from_file(&path).unwrap();
        assert_eq!(crossword.slot_count(), 1);
    }

    #[test]
    fn test_create_example_puzzles() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("ring.yaml").exists());
        assert!(temp_dir.path().join("plus.yaml").exists());
        assert!(temp_dir.path().join("square.yaml").exists());
        assert!(temp_dir.path().join("block.yaml").exists());

        let ring = load_puzzle_from_file(temp_dir.path().join("ring.yaml")).unwrap();
        assert_eq!(ring.slot_count(), 4);
        assert_eq!(ring.crossing_count(), 4);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_puzzle_from_file("does/not/exist.yaml").is_err());
    }
}
