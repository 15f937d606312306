//! Main CLI application for the crossword filler

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossword_csp::{
    config::{CliOverrides, OutputFormat, Settings, SolverConfig},
    crossword::{create_example_puzzles, load_puzzle_from_file, PuzzleDefinition},
    csp::{SearchOutcome, ValueCheck, ValueOrdering},
    fill::{CrosswordCreator, Solution, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crossword_csp")]
#[command(about = "Crossword CSP Filler")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a crossword puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Time budget in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Maximum search nodes (overrides config)
        #[arg(short, long)]
        node_limit: Option<u64>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a saved solution against its puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Solution file (JSON)
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Report what propagation alone reveals about a puzzle
    Analyze {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            output,
            timeout,
            node_limit,
            verbose,
        } => {
            let overrides = CliOverrides {
                puzzle_file: puzzle,
                output_dir: output,
                timeout_seconds: timeout,
                node_limit,
                verbose,
            };
            solve_command(config, overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { puzzle, solution } => validate_command(puzzle, solution),
        Commands::Analyze { puzzle } => analyze_command(puzzle),
    }
}

fn solve_command(config_path: PathBuf, cli_overrides: CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("🧩 Starting Crossword Filler"));

    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    settings.merge_with_cli(&cli_overrides);
    let verbose = settings.output.verbose;

    if verbose {
        println!("Configuration:");
        println!("  Puzzle file: {}", settings.input.puzzle_file.display());
        println!("  Value check: {:?}", settings.solver.value_check);
        println!("  Value ordering: {:?}", settings.solver.value_ordering);
        println!("  Variable ordering: {:?}", settings.solver.variable_ordering);
        println!("  Timeout: {:?}s", settings.solver.timeout_seconds);
        println!("  Node limit: {:?}", settings.solver.node_limit);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings.validate().context("Configuration validation failed")?;

    let creator = CrosswordCreator::new(&settings).context("Failed to load puzzle")?;

    if verbose {
        println!("{}", creator.analyze());
    }

    let report = creator.solve_with_limits();
    println!("{}", SolutionFormatter::format_report_summary(&report));

    let solution = match &report.outcome {
        SearchOutcome::Solved(_) => creator
            .to_solution(&report)?
            .context("Solved report carried no assignment")?,
        SearchOutcome::Exhausted => {
            println!("{}", ColorOutput::warning("❌ No fill exists for this puzzle"));
            return Ok(());
        }
        SearchOutcome::Aborted(reason) => {
            println!(
                "{}",
                ColorOutput::warning(&format!("⏱️  Search gave up before deciding: {}", reason))
            );
            return Ok(());
        }
    };

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Found a fill in {:.3}s",
            report.elapsed.as_secs_f64()
        ))
    );
    println!("\n{}", SolutionFormatter::format_solution(&solution, verbose));

    if settings.output.save_solution {
        let path = SolutionFormatter::save_solution(
            &solution,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save solution")?;
        println!("{}", ColorOutput::success(&format!("Solution saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Looser check, lexicographic values: slower but easy to follow
    let mut plain = Settings::default();
    plain.solver.value_check = ValueCheck::BeforeInsertion;
    plain.solver.value_ordering = ValueOrdering::Lexicographic;
    plain.input.puzzle_file = PathBuf::from("puzzles/plus.yaml");
    plain.to_file(&examples_dir.join("plain.yaml"))?;

    let mut bounded = Settings::default();
    bounded.solver.timeout_seconds = Some(5);
    bounded.solver.node_limit = Some(100_000);
    bounded.output.save_solution = true;
    bounded.output.format = OutputFormat::Json;
    bounded.input.puzzle_file = PathBuf::from("puzzles/block.yaml");
    bounded.to_file(&examples_dir.join("bounded.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzles to {}", puzzle_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating solution..."));

    let crossword = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let solution = Solution::load_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let result = SolutionValidator::new(&crossword).validate_solution(&solution);
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("❌ Solution is invalid"));
        for violation in &result.details.violations {
            println!("  - {}", violation);
        }
    }

    Ok(())
}

fn analyze_command(puzzle_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing puzzle..."));

    let definition = PuzzleDefinition::from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let crossword = definition.to_crossword()?;

    if let Some(ref name) = definition.name {
        println!("Puzzle: {}", name);
    }
    println!("{}", crossword.structure());

    let creator = CrosswordCreator::with_crossword(crossword, SolverConfig::default());
    let analysis = creator.analyze();
    println!("{}", analysis);

    if analysis.proven_unsatisfiable() {
        println!("{}", ColorOutput::warning("Propagation alone shows there is no fill"));
    }

    Ok(())
}
