//! Puzzle generation for classic and killer sudoku.
//!
//! The pipeline is: generate a complete solution grid, then carve a playable
//! board out of it. Classic puzzles remove cells under a difficulty-shaped
//! priority; killer puzzles first partition the grid into sum cages and then
//! remove cells under per-cage keep quotas.
//!
//! All randomness flows through a caller-supplied [`rand::Rng`]. The
//! [`PuzzleGenerator`] front end wraps that in a [`PuzzleSeed`], so any
//! generated puzzle can be reproduced from its seed string.
//!
//! # Examples
//!
//! ```
//! use sumgrid_core::Difficulty;
//! use sumgrid_generator::{PuzzleGenerator, PuzzleSeed};
//!
//! let generator = PuzzleGenerator::new(Difficulty::Medium);
//! let seed: PuzzleSeed = "42".repeat(32).parse().unwrap();
//! let puzzle = generator.generate_with_seed(seed);
//! assert!(puzzle.board.agrees_with(&puzzle.solution));
//! assert!(puzzle.cages.is_empty());
//!
//! let killer = generator.generate_killer_with_seed(seed);
//! assert!(!killer.cages.is_empty());
//! ```

mod cage;
mod killer_removal;
mod removal;
mod seed;
mod solution;

pub use self::{
    cage::generate_cages,
    killer_removal::remove_killer_cells,
    removal::generate_board,
    seed::{ParseSeedError, PuzzleSeed},
    solution::{base_grid, generate_solution, random_complete_grid},
};

use rand::Rng;
use sumgrid_core::{Board, Cage, Difficulty, Grid};

/// Generates a killer board and its cage layout from a solved grid.
///
/// Convenience wrapper around [`generate_cages`] and [`remove_killer_cells`].
pub fn generate_killer_board<R: Rng + ?Sized>(
    solution: &Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> (Board, Vec<Cage>) {
    let cages = generate_cages(solution, difficulty, rng);
    let board = remove_killer_cells(solution, &cages, difficulty, rng);
    (board, cages)
}

/// A generated puzzle together with everything needed to play and verify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The playable board, with hint cells marked initial.
    pub board: Board,
    /// The complete solution the board was carved from.
    pub solution: Grid,
    /// The cage layout. Empty for classic puzzles.
    pub cages: Vec<Cage>,
    /// The difficulty the puzzle was generated at.
    pub difficulty: Difficulty,
    /// The seed that reproduces this puzzle.
    pub seed: PuzzleSeed,
}

/// Seed-driven puzzle generator for a fixed difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleGenerator {
    difficulty: Difficulty,
}

impl PuzzleGenerator {
    /// Creates a generator for the given difficulty.
    #[must_use]
    pub const fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Returns the generator's difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generates a classic puzzle from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedPuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates the classic puzzle determined by a seed.
    ///
    /// The same seed and difficulty always produce the same puzzle.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> GeneratedPuzzle {
        let mut rng = seed.rng();
        let solution = generate_solution(&mut rng);
        let board = generate_board(&solution, self.difficulty, &mut rng);
        GeneratedPuzzle {
            board,
            solution,
            cages: Vec::new(),
            difficulty: self.difficulty,
            seed,
        }
    }

    /// Generates a killer puzzle from a fresh random seed.
    #[must_use]
    pub fn generate_killer(&self) -> GeneratedPuzzle {
        self.generate_killer_with_seed(PuzzleSeed::random())
    }

    /// Generates the killer puzzle determined by a seed.
    #[must_use]
    pub fn generate_killer_with_seed(&self, seed: PuzzleSeed) -> GeneratedPuzzle {
        let mut rng = seed.rng();
        let solution = generate_solution(&mut rng);
        let (board, cages) = generate_killer_board(&solution, self.difficulty, &mut rng);
        GeneratedPuzzle {
            board,
            solution,
            cages,
            difficulty: self.difficulty,
            seed,
        }
    }
}
