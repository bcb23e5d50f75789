//! Interactive game sessions over generated puzzles.
//!
//! [`Game`] wraps a generated puzzle and mediates all player input: placing
//! and clearing digits, toggling pencil notes, and asking for hints. Initial
//! (hint) cells are immutable, every mutation re-validates the board so
//! conflict flags are always current, and killer games validate cage sums as
//! well as the classic row/column/block rules.

mod error;
mod game;

pub use self::{
    error::GameError,
    game::{Game, Hint},
};
