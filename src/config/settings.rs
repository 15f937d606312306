//! Configuration settings for the crossword filler

use crate::csp::{SearchLimits, SearchOptions, ValueCheck, ValueOrdering, VariableOrdering};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default)]
    pub value_check: ValueCheck,
    #[serde(default)]
    pub value_ordering: ValueOrdering,
    #[serde(default)]
    pub variable_ordering: VariableOrdering,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub node_limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub save_solution: bool,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                puzzle_file: PathBuf::from("puzzles/ring.yaml"),
            },
            solver: SolverConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/solutions"),
                save_solution: false,
                verbose: false,
            },
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            value_check: ValueCheck::AfterInsertion,
            value_ordering: ValueOrdering::LeastConstraining,
            variable_ordering: VariableOrdering::MinimumRemainingValues,
            timeout_seconds: Some(60),
            node_limit: None,
        }
    }
}

impl SolverConfig {
    /// Search options for a run starting now
    pub fn search_options(&self) -> SearchOptions {
        let mut limits = SearchLimits::unlimited();
        if let Some(seconds) = self.timeout_seconds {
            limits = limits.with_timeout(Duration::from_secs(seconds));
        }
        if let Some(nodes) = self.node_limit {
            limits = limits.with_node_limit(nodes);
        }

        SearchOptions {
            variable_ordering: self.variable_ordering,
            value_ordering: self.value_ordering,
            value_check: self.value_check,
            limits,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.timeout_seconds == Some(0) {
            anyhow::bail!("Timeout must be positive when set");
        }

        if self.solver.node_limit == Some(0) {
            anyhow::bail!("Node limit must be positive when set");
        }

        if !self.input.puzzle_file.exists() {
            anyhow::bail!("Puzzle file does not exist: {}", self.input.puzzle_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(timeout_seconds) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = Some(timeout_seconds);
        }
        if let Some(node_limit) = cli_overrides.node_limit {
            self.solver.node_limit = Some(node_limit);
        }
        if cli_overrides.verbose {
            self.output.verbose = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
    pub node_limit: Option<u64>,
    pub verbose: bool,
}
