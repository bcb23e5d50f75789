//! Board validation and the uniqueness solver.
//!
//! This crate is the rule-checking half of the engine. It runs in two very
//! different regimes:
//!
//! - **Per-keystroke validation** ([`conflict`], [`killer`]): called on every
//!   player move, so conflict detection is a fixed number of O(81) grouping
//!   passes rather than per-cell scans.
//! - **Uniqueness search** ([`uniqueness`]): exhaustive backtracking used by
//!   the generator to prove a puzzle has exactly one solution. Potentially
//!   slow (tens of milliseconds on deep searches) and bounded by an iteration
//!   budget.
//!
//! All functions are pure over their explicit arguments; nothing is cached
//! between calls.

pub mod conflict;
pub mod killer;
pub mod uniqueness;

pub use self::{
    conflict::{check_conflicts, is_board_complete, is_board_correct},
    killer::{is_killer_board_complete, validate_killer_cages},
    uniqueness::{SearchOutcome, count_solutions_capped, has_unique_solution},
};
