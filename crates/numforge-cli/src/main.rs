//! Command-line front-end for the numforge puzzle engine.
//!
//! The binary is a thin shell over the engine crates: it maps flags onto
//! the typed [`GeneratorConfig`], fans batch generation out with one seed
//! per puzzle, and prints grids, ratings, and batch summaries as plain
//! text. No solving or rating logic lives here.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use numforge_core::{Board, Shape, validate_units};
use numforge_generator::{
    GeneratedPuzzle, Generator, GeneratorConfig, PuzzleRecord, Statistics, Variant,
};
use numforge_solver::{Difficulty, DifficultyRater, DifficultyRating, Solver, parse_difficulty_list};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "numforge", version, about = "Sudoku puzzle generator and rater")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate one or more puzzles.
    Generate(GenerateArgs),
    /// Rate a puzzle given in row-major text form.
    Rate(PuzzleArg),
    /// Solve a puzzle given in row-major text form.
    Solve(PuzzleArg),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Comma-separated difficulty classes (easy, medium, hard, expert,
    /// evil); unknown names are ignored.
    #[arg(short, long, default_value = "medium")]
    difficulty: String,

    /// Number of puzzles to generate.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Board side; box shape defaults to the classic partition per side.
    #[arg(short, long, default_value_t = 9)]
    size: u8,

    /// Box height; defaults to the classic partition for the side.
    #[arg(long)]
    box_rows: Option<u8>,

    /// Box width; defaults to the classic partition for the side.
    #[arg(long)]
    box_cols: Option<u8>,

    /// Variant tag for rendering (classic, diagonal, color).
    #[arg(long, default_value = "classic")]
    variant: String,

    /// Base seed for reproducible batches.
    #[arg(long)]
    seed: Option<u64>,

    /// Refine each puzzle's score into the target class's band.
    #[arg(long)]
    refine: bool,

    /// Print the solution under each puzzle.
    #[arg(long)]
    solutions: bool,
}

#[derive(Debug, Args)]
struct PuzzleArg {
    /// The puzzle as a size² string: digits, with '.' or '0' for empty.
    puzzle: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(&args),
        Command::Rate(arg) => rate(&arg.puzzle),
        Command::Solve(arg) => solve(&arg.puzzle),
    }
}

/// Default box partition for each supported side.
fn default_boxes(size: u8) -> (u8, u8) {
    match size {
        4 => (2, 2),
        6 => (2, 3),
        12 => (3, 4),
        16 => (4, 4),
        _ => (3, 3),
    }
}

fn parse_variant(name: &str) -> Variant {
    match name.to_ascii_lowercase().as_str() {
        "diagonal" => Variant::Diagonal,
        "color" | "color-constrained" => Variant::ColorConstrained,
        _ => Variant::Classic,
    }
}

fn generate(args: &GenerateArgs) -> ExitCode {
    let (default_rows, default_cols) = default_boxes(args.size);
    let shape = match Shape::new(
        args.size,
        args.box_rows.unwrap_or(default_rows),
        args.box_cols.unwrap_or(default_cols),
    ) {
        Ok(shape) => shape,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let config = GeneratorConfig {
        shape,
        difficulties: parse_difficulty_list(&args.difficulty),
        variant: parse_variant(&args.variant),
        count: args.count,
        seed: args.seed,
        use_refinement: args.refine,
        include_solution: args.solutions,
        include_solving_sheet: false,
    };

    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!("generating {} puzzle(s) from base seed {base_seed}", config.count);

    let stats = Statistics::new();
    let plan = config.plan();
    let mut results: Vec<(usize, Result<GeneratedPuzzle, _>)> = plan
        .par_iter()
        .enumerate()
        .map(|(i, &difficulty)| {
            let seed = base_seed.wrapping_add(i as u64);
            let result = Generator::with_seed(seed).generate(
                difficulty,
                config.variant,
                config.shape,
                config.use_refinement,
            );
            if let Ok(puzzle) = &result {
                stats.record(PuzzleRecord::from_generated(puzzle));
            }
            (i, result)
        })
        .collect();
    results.sort_by_key(|(i, _)| *i);

    let mut failed = false;
    for (i, result) in results {
        match result {
            Ok(mut puzzle) => {
                puzzle.number = i as u64 + 1;
                print_puzzle(&puzzle, config.include_solution);
            }
            Err(err) => {
                error!("puzzle {}: {err}", i + 1);
                failed = true;
            }
        }
    }

    print_summary(&stats, &config.difficulties);
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn print_puzzle(puzzle: &GeneratedPuzzle, include_solution: bool) {
    println!(
        "# Puzzle {} [{}] {} ({} clues, score {:.1}, est. {})",
        puzzle.number,
        &puzzle.fingerprint()[..12],
        puzzle.difficulty,
        puzzle.rating.clue_count,
        puzzle.rating.composite_score,
        puzzle.rating.estimated,
    );
    if let Some(seed) = puzzle.seed {
        println!("# seed {seed}, {}, variant {}", puzzle.solver_name, puzzle.variant.name());
    }
    println!("{:#}", puzzle.puzzle);
    if include_solution {
        println!("# solution");
        println!("{:#}", puzzle.solution);
    }
}

fn print_summary(stats: &Statistics, difficulties: &[Difficulty]) {
    if stats.is_empty() {
        return;
    }
    println!("# batch summary");
    for &difficulty in difficulties {
        let Some(summary) = stats.class_summary(difficulty) else {
            continue;
        };
        println!(
            "#   {difficulty}: {} puzzle(s), mean iterations {:.1} (sd {:.1}), mean score {:.1}, mean clues {:.1}, matched {:.0}%",
            summary.count,
            summary.mean_iterations,
            summary.stddev_iterations,
            summary.mean_score,
            summary.mean_clue_count,
            summary.success_rate * 100.0,
        );
    }
}

fn parse_board(text: &str) -> Option<Board> {
    let (board, report) = Board::from_text(Shape::CLASSIC, text);
    if !report.is_clean() {
        for offense in report.offenses() {
            error!("invalid character {:?} at cell {}", offense.ch, offense.index);
        }
        return None;
    }
    let validation = validate_units(&board);
    if !validation.is_valid() {
        for violation in validation.violations() {
            error!("duplicate {} in {:?}", violation.digit, violation.unit);
        }
        return None;
    }
    Some(board)
}

fn rate(text: &str) -> ExitCode {
    let Some(board) = parse_board(text) else {
        return ExitCode::FAILURE;
    };
    let rating = DifficultyRater::new().rate(&board);
    print_rating(&rating);
    ExitCode::SUCCESS
}

fn print_rating(rating: &DifficultyRating) {
    println!("clues:              {}", rating.clue_count);
    println!("empty cells:        {}", rating.empty_cells);
    println!("iterations:         {}", rating.iterations);
    println!("max depth:          {}", rating.max_backtrack_depth);
    println!("guesses:            {}", rating.guesses);
    println!("propagation cycles: {}", rating.propagation_cycles);
    println!("technique score:    {:.1}", rating.technique_score);
    println!("composite score:    {:.2}", rating.composite_score);
    println!("estimated class:    {}", rating.estimated);
    if let Some((min, max)) = rating.estimated_range {
        println!("estimated range:    {min}..{max}");
    }
    for technique in &rating.techniques {
        println!("  - [{}] {}", technique.kind.name(), technique.description);
    }
}

fn solve(text: &str) -> ExitCode {
    let Some(board) = parse_board(text) else {
        return ExitCode::FAILURE;
    };
    let solver = Solver::new();
    let result = solver.count_solutions_with_metrics(&board, 2);
    match result.solution_count() {
        0 => {
            println!("no solution");
            ExitCode::FAILURE
        }
        count => {
            if count > 1 {
                println!("# multiple solutions; showing the first");
            }
            println!("{:#}", result.solution().unwrap());
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boxes_cover_supported_sides() {
        for size in [4u8, 6, 9, 12, 16] {
            let (rows, cols) = default_boxes(size);
            assert!(Shape::new(size, rows, cols).is_ok());
        }
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!(parse_variant("classic"), Variant::Classic);
        assert_eq!(parse_variant("Diagonal"), Variant::Diagonal);
        assert_eq!(parse_variant("color"), Variant::ColorConstrained);
        assert_eq!(parse_variant("anything-else"), Variant::Classic);
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::parse_from([
            "numforge", "generate", "-d", "easy,hard", "-n", "4", "--seed", "7", "--refine",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.count, 4);
        assert_eq!(args.seed, Some(7));
        assert!(args.refine);
        assert_eq!(
            parse_difficulty_list(&args.difficulty),
            vec![Difficulty::Easy, Difficulty::Hard]
        );
    }
}
