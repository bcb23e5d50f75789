//! Core data structures for the Sumgrid puzzle engine.
//!
//! This crate provides the fundamental types shared by the solver, generator,
//! and game crates:
//!
//! 1. **Geometry** - [`position`]: board coordinates, 3×3 block arithmetic, and
//!    neighbor/symmetry helpers.
//! 2. **Digit sets** - [`digit_set`]: a compact bitset of the digits 1-9, used
//!    for candidate tracking, notes, and duplicate detection.
//! 3. **Grids** - [`grid`]: [`Grid`] (a complete solution) and [`PartialGrid`]
//!    (a grid with holes, the input to the uniqueness solver).
//! 4. **Boards** - [`board`]: the player-facing [`Board`] of [`Cell`]s carrying
//!    notes, conflict flags, and selection state.
//! 5. **Cages** - [`cage`]: sum-constrained regions for the killer variant.
//! 6. **Difficulty** - [`difficulty`]: the closed difficulty enum and its fixed
//!    numeric tables.
//!
//! All types are plain in-memory values: no caches, no global state, no I/O.
//!
//! # Examples
//!
//! ```
//! use sumgrid_core::{Board, Grid};
//!
//! let solution: Grid =
//!     "123456789456789123789123456231564897564897231897231564312645978645978312978312645"
//!         .parse()
//!         .unwrap();
//! assert!(solution.is_valid());
//!
//! let board = Board::from_solution(&solution);
//! assert_eq!(board.filled_count(), 81);
//! ```

pub mod board;
pub mod cage;
pub mod difficulty;
pub mod digit_set;
pub mod grid;
pub mod position;

pub use self::{
    board::{Board, Cell},
    cage::{Cage, cage_index, cages_are_valid},
    difficulty::{Difficulty, RemovalStrategy},
    digit_set::DigitSet,
    grid::{Grid, ParseGridError, PartialGrid},
    position::Position,
};
