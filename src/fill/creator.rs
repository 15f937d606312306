//! Solve orchestration: node consistency, arc consistency, then search

use super::{Solution, SolutionValidator};
use crate::config::{Settings, SolverConfig};
use crate::crossword::{load_puzzle_from_file, Crossword, PuzzleDefinition, Slot};
use crate::csp::{
    ArcConsistency, Assignment, BacktrackingSearch, DomainStore, Propagation, PropagationStats,
    SearchLimits, SearchOptions, SearchOutcome, SearchStatistics,
};
use anyhow::{Context, Result};
use std::fmt;
use std::time::{Duration, Instant};

/// Fills a crossword from its word list
pub struct CrosswordCreator {
    crossword: Crossword,
    name: Option<String>,
    solver: SolverConfig,
    verbose: bool,
}

/// Everything a single solve produced
#[derive(Debug, Clone)]
pub struct FillReport {
    pub outcome: SearchOutcome,
    pub propagation: Propagation,
    pub propagation_stats: PropagationStats,
    /// Left at zero when propagation alone proved the puzzle unsatisfiable
    pub search_stats: SearchStatistics,
    pub elapsed: Duration,
}

impl FillReport {
    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.outcome {
            SearchOutcome::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.assignment().is_some()
    }
}

/// Domain sizes of one slot through the propagation stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDomain {
    pub slot: Slot,
    pub degree: usize,
    pub after_node_consistency: usize,
    pub after_arc_consistency: usize,
}

/// What propagation alone reveals about a puzzle
#[derive(Debug, Clone)]
pub struct PuzzleAnalysis {
    pub width: usize,
    pub height: usize,
    pub white_cells: usize,
    pub slot_count: usize,
    pub crossing_count: usize,
    pub vocabulary_size: usize,
    pub domains: Vec<SlotDomain>,
    pub propagation: Propagation,
    pub propagation_stats: PropagationStats,
    pub recommendations: Vec<String>,
}

impl PuzzleAnalysis {
    /// Some slot has no candidate left before any search
    pub fn proven_unsatisfiable(&self) -> bool {
        !self.propagation.is_consistent()
            || self.domains.iter().any(|d| d.after_arc_consistency == 0)
    }
}

impl CrosswordCreator {
    /// Create a creator for the puzzle named in the settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let path = &settings.input.puzzle_file;
        let definition = PuzzleDefinition::from_file(path)
            .with_context(|| format!("Failed to load puzzle file: {}", path.display()))?;
        let crossword = definition.to_crossword()?;

        Ok(Self {
            crossword,
            name: definition.name,
            solver: settings.solver.clone(),
            verbose: settings.output.verbose,
        })
    }

    /// Create a creator for an already built crossword
    pub fn with_crossword(crossword: Crossword, solver: SolverConfig) -> Self {
        Self {
            crossword,
            name: None,
            solver,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fill the crossword without any time or node budget.
    ///
    /// Returns `None` when the puzzle has no fill.
    pub fn solve(&self) -> Option<Assignment> {
        let options = SearchOptions {
            limits: SearchLimits::unlimited(),
            ..self.solver.search_options()
        };
        self.run(options).outcome.into_assignment()
    }

    /// Fill the crossword within the configured budget
    pub fn solve_with_limits(&self) -> FillReport {
        self.run(self.solver.search_options())
    }

    /// Run the full pipeline with explicit search options
    pub fn run(&self, options: SearchOptions) -> FillReport {
        let start_time = Instant::now();

        if self.verbose {
            println!("Filling crossword...");
            println!(
                "Grid: {}x{}, {} slots, {} crossings, {} words",
                self.crossword.width(),
                self.crossword.height(),
                self.crossword.slot_count(),
                self.crossword.crossing_count(),
                self.crossword.words().len()
            );
        }

        let mut domains = DomainStore::new(&self.crossword);
        let removed = domains.enforce_node_consistency();
        if self.verbose {
            println!("Node consistency removed {} candidates", removed);
        }

        let mut ac3 = ArcConsistency::new(&self.crossword);
        let propagation = ac3.enforce(&mut domains, None);
        let propagation_stats = ac3.into_stats();

        if self.verbose {
            println!(
                "Arc consistency: {} arcs processed, {} candidates removed, {} left",
                propagation_stats.arcs_processed,
                propagation_stats.words_removed,
                domains.total_size()
            );
        }

        if let Propagation::Wipeout(slot) = propagation {
            if self.verbose {
                println!("No candidates left for {}; puzzle has no fill", slot);
            }
            return FillReport {
                outcome: SearchOutcome::Exhausted,
                propagation,
                propagation_stats,
                search_stats: SearchStatistics::default(),
                elapsed: start_time.elapsed(),
            };
        }

        let mut search = BacktrackingSearch::new(&self.crossword, &domains, options);
        let outcome = search.run();
        let search_stats = search.into_stats();

        if self.verbose {
            match &outcome {
                SearchOutcome::Solved(_) => println!(
                    "Found a fill after {} nodes and {} backtracks",
                    search_stats.nodes, search_stats.backtracks
                ),
                SearchOutcome::Exhausted => println!(
                    "Search exhausted after {} nodes; puzzle has no fill",
                    search_stats.nodes
                ),
                SearchOutcome::Aborted(reason) => {
                    println!("Search stopped after {} nodes: {}", search_stats.nodes, reason)
                }
            }
        }

        FillReport {
            outcome,
            propagation,
            propagation_stats,
            search_stats,
            elapsed: start_time.elapsed(),
        }
    }

    /// Turn a solved report into a validated solution.
    ///
    /// Returns `Ok(None)` when the report holds no fill.
    pub fn to_solution(&self, report: &FillReport) -> Result<Option<Solution>> {
        let Some(assignment) = report.assignment() else {
            return Ok(None);
        };

        let validation = SolutionValidator::new(&self.crossword).validate(assignment);
        if !validation.is_valid {
            anyhow::bail!(
                "Search returned an invalid fill: {}",
                validation.error_message.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let solution = Solution::new(
            assignment,
            report.propagation_stats.clone(),
            report.search_stats.clone(),
            report.elapsed,
        )
        .with_puzzle_name(self.name.clone());

        Ok(Some(solution))
    }

    /// Report domain sizes after each propagation stage, without searching
    pub fn analyze(&self) -> PuzzleAnalysis {
        let mut domains = DomainStore::initialize(&self.crossword);
        let node_sizes: Vec<usize> = self
            .crossword
            .slots()
            .iter()
            .map(|slot| domains.size(slot))
            .collect();

        let mut ac3 = ArcConsistency::new(&self.crossword);
        let propagation = ac3.enforce(&mut domains, None);
        let propagation_stats = ac3.into_stats();

        let slot_domains: Vec<SlotDomain> = self
            .crossword
            .slots()
            .iter()
            .zip(node_sizes)
            .map(|(slot, after_node_consistency)| SlotDomain {
                slot: *slot,
                degree: self.crossword.degree(slot),
                after_node_consistency,
                after_arc_consistency: domains.size(slot),
            })
            .collect();

        let recommendations = Self::generate_recommendations(&slot_domains, &propagation);

        PuzzleAnalysis {
            width: self.crossword.width(),
            height: self.crossword.height(),
            white_cells: self.crossword.structure().white_count(),
            slot_count: self.crossword.slot_count(),
            crossing_count: self.crossword.crossing_count(),
            vocabulary_size: self.crossword.words().len(),
            domains: slot_domains,
            propagation,
            propagation_stats,
            recommendations,
        }
    }

    fn generate_recommendations(domains: &[SlotDomain], propagation: &Propagation) -> Vec<String> {
        let mut recommendations = Vec::new();

        for domain in domains.iter().filter(|d| d.after_node_consistency == 0) {
            recommendations.push(format!(
                "Add words of length {} for {}",
                domain.slot.length, domain.slot
            ));
        }

        if let Propagation::Wipeout(slot) = propagation {
            recommendations.push(format!(
                "No word fits {} once its crossings are considered; the puzzle has no fill",
                slot
            ));
        }

        if let Some(tightest) = domains
            .iter()
            .filter(|d| d.after_arc_consistency > 0)
            .min_by_key(|d| d.after_arc_consistency)
        {
            if tightest.after_arc_consistency == 1 && propagation.is_consistent() {
                recommendations.push(format!("{} is forced to a single word", tightest.slot));
            }
        }

        if recommendations.is_empty() {
            recommendations.push("Puzzle looks reasonable to fill".to_string());
        }

        recommendations
    }
}

/// Load a puzzle file and fill it with default solver settings
pub fn fill_puzzle_file<P: AsRef<std::path::Path>>(path: P) -> Result<Option<Assignment>> {
    let crossword = load_puzzle_from_file(path)?;
    Ok(CrosswordCreator::with_crossword(crossword, SolverConfig::default()).solve())
}

impl fmt::Display for PuzzleAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Puzzle Analysis:")?;
        writeln!(f, "  Grid: {}x{} ({} white cells)", self.width, self.height, self.white_cells)?;
        writeln!(f, "  Slots: {}", self.slot_count)?;
        writeln!(f, "  Crossings: {}", self.crossing_count)?;
        writeln!(f, "  Vocabulary: {} words", self.vocabulary_size)?;
        writeln!(
            f,
            "  Propagation: {} arcs processed, {} candidates removed",
            self.propagation_stats.arcs_processed, self.propagation_stats.words_removed
        )?;
        writeln!(
            f,
            "  Status: {}",
            if self.proven_unsatisfiable() { "UNSATISFIABLE" } else { "open" }
        )?;
        writeln!(f, "  Domains (node -> arc):")?;
        for domain in &self.domains {
            writeln!(
                f,
                "    {:<20} degree {}  {:>5} -> {:<5}",
                domain.slot.to_string(),
                domain.degree,
                domain.after_node_consistency,
                domain.after_arc_consistency
            )?;
        }
        writeln!(f, "  Recommendations:")?;
        for rec in &self.recommendations {
            writeln!(f, "    - {}", rec)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::Direction;
    use crate::csp::{find_violations, ValueCheck};
    use tempfile::tempdir;

    fn creator(rows: &[&str], words: &[&str]) -> CrosswordCreator {
        let crossword = Crossword::from_rows(rows, words.iter().copied()).unwrap();
        CrosswordCreator::with_crossword(crossword, SolverConfig::default())
    }

    fn assert_sound(crossword: &Crossword, assignment: &Assignment) {
        assert!(assignment.is_complete(crossword.slot_count()));
        for (slot, word) in assignment.iter() {
            assert_eq!(word.len(), slot.length);
        }
        for (x, y) in crossword.arcs() {
            let (kx, ky) = crossword.overlap(&x, &y).unwrap();
            let a = assignment.get(&x).unwrap().as_bytes()[kx];
            let b = assignment.get(&y).unwrap().as_bytes()[ky];
            assert_eq!(a, b, "{} and {} disagree", x, y);
        }
        let distinct: std::collections::BTreeSet<_> = assignment.iter().map(|(_, w)| w).collect();
        assert_eq!(distinct.len(), assignment.len());
    }

    #[test]
    fn test_solves_ring_soundly() {
        let creator = creator(
            &["___", "_#_", "___"],
            &["cat", "cob", "ten", "bun", "dog", "ear", "sun"],
        );
        let assignment = creator.solve().expect("ring has a fill");
        assert_sound(creator.crossword(), &assignment);
        // CAT/COB/TEN/BUN and its transpose are the only fills
        let top = assignment.get(&Slot::new(0, 0, Direction::Across, 3));
        assert!(matches!(top, Some("CAT") | Some("COB")));
    }

    #[test]
    fn test_single_slot_completeness() {
        let creator = creator(&["____"], &["tree", "cat"]);
        let assignment = creator.solve().unwrap();
        assert_eq!(assignment.len(), 1);

        let creator = creator_without_fit();
        assert!(creator.solve().is_none());
    }

    fn creator_without_fit() -> CrosswordCreator {
        creator(&["____"], &["cat", "dog", "trees"])
    }

    #[test]
    fn test_conflicting_crossing_is_unsatisfiable() {
        // across can only be ABC and down only XY; they share the first cell
        let creator = creator(&["___", "_##"], &["abc", "xy"]);
        let report = creator.solve_with_limits();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(matches!(report.propagation, Propagation::Wipeout(_)));
        assert_eq!(report.search_stats.nodes, 0);
        assert!(creator.solve().is_none());
    }

    #[test]
    fn test_crossing_that_only_agrees_with_itself() {
        // ABC and XYZ each support only themselves, so arc consistency keeps
        // both and the search rejects every pair for reusing a word
        let creator = creator(&["___", "_##", "_##"], &["abc", "xyz"]);
        let report = creator.solve_with_limits();
        assert!(report.propagation.is_consistent());
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(report.search_stats.nodes > 0);
    }

    #[test]
    fn test_two_by_two_square() {
        // four slots cannot hold three distinct words
        let creator = creator(&["__", "__"], &["ab", "ba", "aa"]);
        let report = creator.solve_with_limits();
        assert!(report.propagation.is_consistent());
        assert_eq!(report.outcome, SearchOutcome::Exhausted);

        let creator = self::creator(&["__", "__"], &["ab", "cd", "ac", "bd"]);
        let assignment = creator.solve().unwrap();
        assert_sound(creator.crossword(), &assignment);
        assert_eq!(assignment.get(&Slot::new(0, 0, Direction::Across, 2)), Some("AB"));
        assert_eq!(assignment.get(&Slot::new(1, 0, Direction::Across, 2)), Some("CD"));
        assert_eq!(assignment.get(&Slot::new(0, 0, Direction::Down, 2)), Some("AC"));
        assert_eq!(assignment.get(&Slot::new(0, 1, Direction::Down, 2)), Some("BD"));
    }

    #[test]
    fn test_deterministic() {
        let words = ["cat", "cob", "ten", "bun", "dog", "ear", "sun", "tub", "cod", "bat"];
        let first = creator(&["___", "_#_", "___"], &words).solve();
        let second = creator(&["___", "_#_", "___"], &words).solve();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_value_check_modes_agree_on_solvability() {
        let crossword = Crossword::from_rows(
            &["___", "_#_", "___"],
            ["cat", "cob", "ten", "bun", "dog", "ear", "sun", "tub"],
        )
        .unwrap();
        for value_check in [ValueCheck::AfterInsertion, ValueCheck::BeforeInsertion] {
            let solver = SolverConfig {
                value_check,
                ..SolverConfig::default()
            };
            let creator = CrosswordCreator::with_crossword(crossword.clone(), solver);
            let assignment = creator.solve().unwrap();
            assert!(find_violations(&crossword, &assignment).is_empty());
        }
    }

    #[test]
    fn test_node_limit_report() {
        let crossword = Crossword::from_rows(
            &["___", "_#_", "___"],
            ["cat", "cob", "ten", "bun"],
        )
        .unwrap();
        let solver = SolverConfig {
            node_limit: Some(1),
            ..SolverConfig::default()
        };
        let creator = CrosswordCreator::with_crossword(crossword, solver);

        let report = creator.solve_with_limits();
        assert!(matches!(report.outcome, SearchOutcome::Aborted(_)));
        assert!(!report.is_solved());
        assert!(creator.to_solution(&report).unwrap().is_none());

        // the unbudgeted entry point ignores the limit
        assert!(creator.solve().is_some());
    }

    #[test]
    fn test_to_solution() {
        let creator = creator(&["#_#", "___", "#_#"], &["one", "ant", "six", "owl"]);
        let report = creator.solve_with_limits();
        let solution = creator.to_solution(&report).unwrap().unwrap();
        assert_eq!(solution.entries.len(), 2);
        assert_eq!(solution.to_assignment(), report.assignment().cloned().unwrap());
    }

    #[test]
    fn test_analyze() {
        let creator = creator(&["___", "_#_", "___"], &["cat", "cob", "ten", "bun", "dog", "ab"]);
        let analysis = creator.analyze();

        assert_eq!(analysis.slot_count, 4);
        assert_eq!(analysis.crossing_count, 4);
        assert_eq!(analysis.white_cells, 8);
        assert_eq!(analysis.vocabulary_size, 6);
        assert!(!analysis.proven_unsatisfiable());
        assert!(analysis
            .domains
            .iter()
            .all(|d| d.after_node_consistency == 5 && d.after_arc_consistency <= 5));

        let text = analysis.to_string();
        assert!(text.contains("Slots: 4"));
    }

    #[test]
    fn test_analyze_reports_missing_lengths() {
        let creator = creator(&["____"], &["cat"]);
        let analysis = creator.analyze();
        assert!(analysis.proven_unsatisfiable());
        assert_eq!(analysis.domains[0].after_node_consistency, 0);
        assert!(analysis.recommendations[0].contains("length 4"));
    }

    #[test]
    fn test_new_from_settings() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("plus.yaml");
        std::fs::write(
            &puzzle,
            "name: plus\nstructure: [\"#_#\", \"___\", \"#_#\"]\nwords: [one, ant]\n",
        )
        .unwrap();

        let mut settings = Settings::default();
        settings.input.puzzle_file = puzzle.clone();
        let creator = CrosswordCreator::new(&settings).unwrap();
        assert_eq!(creator.name(), Some("plus"));
        assert_eq!(creator.crossword().slot_count(), 2);

        let assignment = fill_puzzle_file(&puzzle).unwrap().unwrap();
        assert_eq!(assignment.len(), 2);

        settings.input.puzzle_file = temp_dir.path().join("missing.yaml");
        assert!(CrosswordCreator::new(&settings).is_err());
    }
}
