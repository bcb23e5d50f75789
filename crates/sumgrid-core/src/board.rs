//! The player-facing board of cells.

use crate::{DigitSet, Grid, PartialGrid, Position};

/// A single board cell.
///
/// A cell is either filled with a digit or empty with optional pencil notes.
/// `is_initial` marks hint cells placed by the generator, which the game layer
/// treats as immutable. `is_conflict` and `is_selected` are validator/UI
/// state recomputed from the outside; they never feed back into generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// The digit in the cell, or `None` if empty.
    pub value: Option<u8>,
    /// `true` if the cell was pre-filled by the puzzle generator.
    pub is_initial: bool,
    /// Pencil notes for an empty cell.
    pub notes: DigitSet,
    /// `true` if the cell currently violates a rule.
    pub is_conflict: bool,
    /// `true` if the cell is selected in the UI.
    pub is_selected: bool,
}

impl Cell {
    /// Creates an initial (hint) cell holding a digit.
    #[must_use]
    pub fn initial(digit: u8) -> Self {
        Self {
            value: Some(digit),
            is_initial: true,
            ..Self::default()
        }
    }

    /// Returns `true` if the cell holds a digit.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}

/// A 9×9 board of [`Cell`]s.
///
/// Boards are created by the generation pipeline as fully filled copies of a
/// solution [`Grid`]; the removal engines then empty cells, and the game layer
/// mutates the remainder through player input.
///
/// # Examples
///
/// ```
/// use sumgrid_core::{Board, Grid, Position};
///
/// let solution: Grid =
///     "123456789456789123789123456231564897564897231897231564312645978645978312978312645"
///         .parse()
///         .unwrap();
/// let mut board = Board::from_solution(&solution);
/// assert!(board.agrees_with(&solution));
///
/// board.clear(Position::new(0, 0));
/// assert_eq!(board.filled_count(), 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board([[Cell; 9]; 9]);

impl Board {
    /// Creates a fully filled board from a solution grid, with every cell
    /// marked as initial.
    #[must_use]
    pub fn from_solution(solution: &Grid) -> Self {
        let mut cells = [[Cell::default(); 9]; 9];
        for pos in Position::ALL {
            cells[pos.row() as usize][pos.col() as usize] = Cell::initial(solution.get(pos));
        }
        Self(cells)
    }

    /// Creates an all-empty board.
    #[must_use]
    pub fn empty() -> Self {
        Self([[Cell::default(); 9]; 9])
    }

    /// Returns the cell at a position.
    #[must_use]
    pub const fn cell(&self, pos: Position) -> &Cell {
        &self.0[pos.row() as usize][pos.col() as usize]
    }

    /// Returns a mutable reference to the cell at a position.
    pub const fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.0[pos.row() as usize][pos.col() as usize]
    }

    /// Returns the value at a position.
    #[must_use]
    pub const fn value(&self, pos: Position) -> Option<u8> {
        self.cell(pos).value
    }

    /// Empties a cell, clearing its value, initial flag, and notes.
    pub fn clear(&mut self, pos: Position) {
        *self.cell_mut(pos) = Cell::default();
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.cell(pos).is_filled())
            .count()
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled_count() == 81
    }

    /// Returns `true` if every filled cell matches the solution grid.
    #[must_use]
    pub fn agrees_with(&self, solution: &Grid) -> bool {
        Position::ALL.into_iter().all(|pos| {
            self.value(pos).is_none_or(|digit| digit == solution.get(pos))
        })
    }

    /// Converts the board's filled cells into a [`PartialGrid`] for the
    /// uniqueness solver.
    #[must_use]
    pub fn to_partial_grid(&self) -> PartialGrid {
        let mut grid = PartialGrid::new();
        for pos in Position::ALL {
            grid.set(pos, self.value(pos));
        }
        grid
    }
}
