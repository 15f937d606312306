//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::csp::{SearchOutcome, SearchStatistics};
use crate::fill::{FillReport, Solution};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format solutions and solve reports for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_stats: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        if let Some(ref name) = solution.puzzle_name {
            output.push_str(&format!("Puzzle: {}\n", name));
        }
        output.push_str(&format!(
            "Slots: {}, cells filled: {}\n",
            solution.metadata.slot_count, solution.metadata.filled_cells
        ));

        if show_stats {
            output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
            output.push_str(&Self::format_statistics(&solution.metadata.search));
        }

        output.push('\n');
        output.push_str(&Self::format_entries(
            solution.entries.iter().map(|entry| (entry.slot.to_string(), entry.word.as_str())),
        ));

        output
    }

    /// Format search counters
    pub fn format_statistics(stats: &SearchStatistics) -> String {
        format!(
            "Nodes: {}, backtracks: {}, consistency checks: {}, max depth: {}\n",
            stats.nodes, stats.backtracks, stats.consistency_checks, stats.max_depth
        )
    }

    /// One-line summary of how a solve ended
    pub fn format_report_summary(report: &FillReport) -> String {
        let status = match &report.outcome {
            SearchOutcome::Solved(_) => "solved".to_string(),
            SearchOutcome::Exhausted if !report.propagation.is_consistent() => {
                "no fill (ruled out by propagation)".to_string()
            }
            SearchOutcome::Exhausted => "no fill".to_string(),
            SearchOutcome::Aborted(reason) => format!("stopped: {}", reason),
        };

        format!(
            "{} in {:.3}s ({} candidates pruned, {} nodes, {} backtracks)",
            status,
            report.elapsed.as_secs_f64(),
            report.propagation_stats.words_removed,
            report.search_stats.nodes,
            report.search_stats.backtracks
        )
    }

    fn format_entries<'a, I>(entries: I) -> String
    where
        I: Iterator<Item = (String, &'a str)>,
    {
        let entries: Vec<(String, &str)> = entries.collect();
        let width = entries.iter().map(|(slot, _)| slot.len()).max().unwrap_or(0);

        let mut output = String::new();
        for (slot, word) in entries {
            output.push_str(&format!("{:<width$}  {}\n", slot, word, width = width));
        }
        output
    }

    /// Save a solution in the configured format, returning the file written
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let filepath = match format {
            OutputFormat::Text => {
                let filepath = output_dir.join(format!("{}.txt", solution.metadata.id));
                std::fs::write(&filepath, Self::format_solution(solution, true))
                    .with_context(|| format!("Failed to write {}", filepath.display()))?;
                filepath
            }
            OutputFormat::Json => {
                let filepath = output_dir.join(format!("{}.json", solution.metadata.id));
                solution.save_to_file(&filepath)?;
                filepath
            }
        };

        Ok(filepath)
    }
}

/// Status-line coloring for the CLI.
///
/// ANSI escapes are emitted unless `NO_COLOR` is set or `TERM` is `dumb`.
pub struct ColorOutput;

impl ColorOutput {
    pub fn colored(text: &str, color: Color) -> String {
        match Self::escape_for(color) {
            Some(code) => format!("\x1b[{}m{}\x1b[0m", code, text),
            None => text.to_owned(),
        }
    }

    fn escape_for(color: Color) -> Option<u8> {
        let plain = std::env::var_os("NO_COLOR").is_some()
            || std::env::var("TERM").is_ok_and(|term| term == "dumb");
        (!plain).then(|| color.code())
    }

    /// Fill found, solution valid
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// No fill, or search stopped early
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
