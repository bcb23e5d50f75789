//! Example demonstrating puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` at a chosen difficulty
//! - Generate a classic or killer puzzle, optionally from a fixed seed
//! - Display the puzzle, solution, cages, and seed
//! - Sample many puzzles in parallel and keep the one with the fewest hints
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Pick a difficulty and variant:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --difficulty expert --killer
//! ```
//!
//! Reproduce a puzzle from its seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed <64-hex-chars>
//! ```
//!
//! Sample puzzles and keep the one with the fewest hints:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --min-hints --max-tries 1000
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use sumgrid_core::Difficulty;
use sumgrid_generator::{GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
            DifficultyArg::Expert => Self::Expert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty to generate at.
    #[arg(long, value_name = "LEVEL", default_value = "medium")]
    difficulty: DifficultyArg,

    /// Generate a killer puzzle with sum cages.
    #[arg(long)]
    killer: bool,

    /// Seed to reproduce a puzzle (64 hex characters).
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Sample puzzles and keep the one with the fewest hints.
    #[arg(long)]
    min_hints: bool,

    /// Maximum puzzles to sample when filtering.
    #[arg(long, value_name = "COUNT", default_value_t = 1_000)]
    max_tries: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let generator = PuzzleGenerator::new(args.difficulty.into());

    if let Some(seed) = args.seed {
        let puzzle = generate(&generator, args.killer, Some(seed));
        print_puzzle(&puzzle, None);
        return;
    }

    if !args.min_hints {
        let puzzle = generate(&generator, args.killer, None);
        print_puzzle(&puzzle, None);
        return;
    }

    if args.max_tries == 0 {
        eprintln!("--max-tries must be at least 1.");
        process::exit(1);
    }

    let best = (0..args.max_tries)
        .into_par_iter()
        .map(|_| generate(&generator, args.killer, None))
        .min_by_key(|puzzle| puzzle.board.filled_count());

    if let Some(puzzle) = best {
        print_puzzle(&puzzle, Some(args.max_tries));
        return;
    }

    eprintln!("No puzzle generated.");
    process::exit(1);
}

fn generate(
    generator: &PuzzleGenerator,
    killer: bool,
    seed: Option<PuzzleSeed>,
) -> GeneratedPuzzle {
    match (killer, seed) {
        (false, None) => generator.generate(),
        (false, Some(seed)) => generator.generate_with_seed(seed),
        (true, None) => generator.generate_killer(),
        (true, Some(seed)) => generator.generate_killer_with_seed(seed),
    }
}

fn print_puzzle(puzzle: &GeneratedPuzzle, sampled: Option<usize>) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    println!("Difficulty:");
    println!("  {}", puzzle.difficulty);
    println!();

    if let Some(max_tries) = sampled {
        println!("Selection:");
        println!("  Sampled: {max_tries}");
        println!();
    }

    println!("Problem ({} hints):", puzzle.board.filled_count());
    println!("  {}", puzzle.board.to_partial_grid());
    println!();
    println!("Solution:");
    println!("  {}", puzzle.solution);

    if !puzzle.cages.is_empty() {
        println!();
        println!("Cages ({}):", puzzle.cages.len());
        for cage in &puzzle.cages {
            let cells = cage
                .cells
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            println!("  sum {:2}: {cells}", cage.sum);
        }
    }
}
