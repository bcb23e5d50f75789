use sumgrid_core::{Board, Cage, Difficulty, DigitSet, Grid, Position};
use sumgrid_generator::GeneratedPuzzle;
use sumgrid_solver::{
    check_conflicts, is_board_complete, is_killer_board_complete, validate_killer_cages,
};

use crate::GameError;

/// A suggested placement for a stuck player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// The cell to fill or fix.
    pub position: Position,
    /// The solution digit for that cell.
    pub value: u8,
}

/// A playable game session.
///
/// Wraps a generated puzzle's board, solution, and (for killer games) cages.
/// All player input goes through the session, which refuses to touch initial
/// cells and re-validates conflict flags after every mutation.
///
/// # Examples
///
/// ```
/// use sumgrid_core::{Difficulty, Position};
/// use sumgrid_game::Game;
/// use sumgrid_generator::PuzzleGenerator;
///
/// let puzzle = PuzzleGenerator::new(Difficulty::Easy).generate();
/// let solution = puzzle.solution;
/// let mut game = Game::new(puzzle);
/// assert!(!game.is_solved());
///
/// // Fill every empty cell from the solution
/// for pos in Position::ALL {
///     if game.board().value(pos).is_none() {
///         game.set_digit(pos, solution.get(pos)).unwrap();
///     }
/// }
/// assert!(game.is_solved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    solution: Grid,
    cages: Vec<Cage>,
    difficulty: Difficulty,
}

impl Game {
    /// Creates a game session from a generated puzzle.
    #[must_use]
    pub fn new(puzzle: GeneratedPuzzle) -> Self {
        let GeneratedPuzzle {
            board,
            solution,
            cages,
            difficulty,
            seed: _,
        } = puzzle;
        Self {
            board,
            solution,
            cages,
            difficulty,
        }
    }

    /// Returns the current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the puzzle's solution grid.
    #[must_use]
    pub const fn solution(&self) -> &Grid {
        &self.solution
    }

    /// Returns the cage layout. Empty for classic games.
    #[must_use]
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// Returns the puzzle's difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns `true` if this is a killer game with sum cages.
    #[must_use]
    pub fn is_killer(&self) -> bool {
        !self.cages.is_empty()
    }

    /// Places a digit in a cell, replacing any previous player digit and
    /// clearing the cell's notes.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyInitialCell`] if the cell is an
    /// initial hint cell.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is outside `1..=9`.
    pub fn set_digit(&mut self, pos: Position, digit: u8) -> Result<(), GameError> {
        assert!((1..=9).contains(&digit), "digit must be between 1 and 9");
        if self.board.cell(pos).is_initial {
            return Err(GameError::CannotModifyInitialCell);
        }
        let cell = self.board.cell_mut(pos);
        cell.value = Some(digit);
        cell.notes = DigitSet::EMPTY;
        self.revalidate();
        Ok(())
    }

    /// Empties a cell's digit and notes.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyInitialCell`] if the cell is an
    /// initial hint cell.
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), GameError> {
        if self.board.cell(pos).is_initial {
            return Err(GameError::CannotModifyInitialCell);
        }
        self.board.clear(pos);
        self.revalidate();
        Ok(())
    }

    /// Toggles a pencil note on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyInitialCell`] if the cell is an
    /// initial hint cell, or [`GameError::CannotAddNoteToFilledCell`] if the
    /// cell holds a digit.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is outside `1..=9`.
    pub fn toggle_note(&mut self, pos: Position, digit: u8) -> Result<(), GameError> {
        let cell = self.board.cell(pos);
        if cell.is_initial {
            return Err(GameError::CannotModifyInitialCell);
        }
        if cell.is_filled() {
            return Err(GameError::CannotAddNoteToFilledCell);
        }
        let notes = &mut self.board.cell_mut(pos).notes;
        if notes.contains(digit) {
            notes.remove(digit);
        } else {
            notes.insert(digit);
        }
        Ok(())
    }

    /// Returns `true` if the board is completely and correctly filled.
    ///
    /// Killer games additionally require every cage sum to be satisfied.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        if self.is_killer() {
            is_killer_board_complete(&self.board, &self.cages)
        } else {
            is_board_complete(&self.board)
        }
    }

    /// Returns `true` if every filled cell matches the solution.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.board.agrees_with(&self.solution)
    }

    /// Suggests the next placement: the first empty cell in scan order, or
    /// failing that the first cell whose digit disagrees with the solution.
    /// Returns `None` when the board is already solved.
    #[must_use]
    pub fn get_hint(&self) -> Option<Hint> {
        for pos in Position::ALL {
            if self.board.value(pos).is_none() {
                return Some(Hint {
                    position: pos,
                    value: self.solution.get(pos),
                });
            }
        }
        for pos in Position::ALL {
            let expected = self.solution.get(pos);
            if self.board.value(pos) != Some(expected) {
                return Some(Hint {
                    position: pos,
                    value: expected,
                });
            }
        }
        None
    }

    /// Applies a hint directly to the board.
    ///
    /// Returns the applied hint, or `None` when the board is solved.
    pub fn apply_hint(&mut self) -> Option<Hint> {
        let hint = self.get_hint()?;
        let cell = self.board.cell_mut(hint.position);
        cell.value = Some(hint.value);
        cell.notes = DigitSet::EMPTY;
        self.revalidate();
        Some(hint)
    }

    fn revalidate(&mut self) {
        if self.is_killer() {
            validate_killer_cages(&mut self.board, &self.cages);
        } else {
            check_conflicts(&mut self.board);
        }
    }
}
