//! Complete and partial 9×9 digit grids.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

use crate::{DigitSet, Position};

/// Error returned when parsing a grid from a string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseGridError {
    /// The string does not contain exactly 81 cell characters.
    #[display("expected 81 cells, found {found}")]
    WrongLength {
        /// Number of cell characters found.
        found: usize,
    },
    /// A character is neither a digit 1-9 nor an empty-cell marker.
    #[display("invalid cell character {found:?}")]
    InvalidCharacter {
        /// The offending character.
        found: char,
    },
    /// A complete [`Grid`] was requested but the string contains empty cells.
    #[display("grid is not complete")]
    Incomplete,
}

/// A complete 9×9 solution grid.
///
/// Every cell holds a digit 1-9. Completeness is structural; whether the grid
/// satisfies the sudoku constraints is checked by [`Grid::is_valid`].
///
/// # Examples
///
/// ```
/// use sumgrid_core::Grid;
///
/// let grid: Grid =
///     "123456789456789123789123456231564897564897231897231564312645978645978312978312645"
///         .parse()
///         .unwrap();
/// assert!(grid.is_valid());
/// assert_eq!(grid.get(sumgrid_core::Position::new(0, 0)), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid([[u8; 9]; 9]);

impl Grid {
    /// Creates a grid from raw rows.
    ///
    /// # Panics
    ///
    /// Panics if any cell is not in the range 1-9.
    #[must_use]
    pub fn from_rows(rows: [[u8; 9]; 9]) -> Self {
        for row in &rows {
            for &digit in row {
                assert!((1..=9).contains(&digit), "grid cell out of range");
            }
        }
        Self(rows)
    }

    /// Returns the digit at a position.
    #[must_use]
    pub const fn get(&self, pos: Position) -> u8 {
        self.0[pos.row() as usize][pos.col() as usize]
    }

    /// Sets the digit at a position.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    pub fn set(&mut self, pos: Position, digit: u8) {
        assert!((1..=9).contains(&digit), "grid cell out of range");
        self.0[pos.row() as usize][pos.col() as usize] = digit;
    }

    /// Returns the raw rows of the grid.
    #[must_use]
    pub const fn rows(&self) -> &[[u8; 9]; 9] {
        &self.0
    }

    /// Returns the set of digits in a row.
    #[must_use]
    pub fn row_set(&self, row: u8) -> DigitSet {
        (0..9).map(|col| self.get(Position::new(row, col))).collect()
    }

    /// Returns the set of digits in a column.
    #[must_use]
    pub fn col_set(&self, col: u8) -> DigitSet {
        (0..9).map(|row| self.get(Position::new(row, col))).collect()
    }

    /// Returns the set of digits in a 3×3 block.
    #[must_use]
    pub fn block_set(&self, block: u8) -> DigitSet {
        (0..9).map(|i| self.get(Position::from_block(block, i))).collect()
    }

    /// Checks that every row, column, and block contains exactly the digits
    /// 1-9.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (0..9).all(|i| {
            self.row_set(i) == DigitSet::FULL
                && self.col_set(i) == DigitSet::FULL
                && self.block_set(i) == DigitSet::FULL
        })
    }

    /// Converts this grid into a fully filled [`PartialGrid`].
    #[must_use]
    pub fn to_partial(&self) -> PartialGrid {
        let mut partial = PartialGrid::new();
        for pos in Position::ALL {
            partial.set(pos, Some(self.get(pos)));
        }
        partial
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for digit in row {
                write!(f, "{digit}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let partial: PartialGrid = s.parse()?;
        let mut rows = [[0; 9]; 9];
        for pos in Position::ALL {
            let digit = partial.get(pos).ok_or(ParseGridError::Incomplete)?;
            rows[pos.row() as usize][pos.col() as usize] = digit;
        }
        Ok(Self(rows))
    }
}

/// A 9×9 grid with optional cells.
///
/// This is the input shape of the uniqueness solver: filled cells constrain
/// their row, column, and block; empty cells are search variables.
///
/// The string form uses `.` (or `0` or `_`) for empty cells; whitespace is
/// ignored.
///
/// # Examples
///
/// ```
/// use sumgrid_core::{PartialGrid, Position};
///
/// let grid: PartialGrid = format!("17{}", ".".repeat(79)).parse().unwrap();
/// assert_eq!(grid.get(Position::new(0, 0)), Some(1));
/// assert_eq!(grid.get(Position::new(0, 2)), None);
/// assert_eq!(grid.empty_positions().len(), 79);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialGrid([[Option<u8>; 9]; 9]);

impl PartialGrid {
    /// Creates an empty partial grid.
    #[must_use]
    pub const fn new() -> Self {
        Self([[None; 9]; 9])
    }

    /// Returns the digit at a position, if any.
    #[must_use]
    pub const fn get(&self, pos: Position) -> Option<u8> {
        self.0[pos.row() as usize][pos.col() as usize]
    }

    /// Sets or clears the digit at a position.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is `Some` but not in the range 1-9.
    pub fn set(&mut self, pos: Position, digit: Option<u8>) {
        if let Some(digit) = digit {
            assert!((1..=9).contains(&digit), "grid cell out of range");
        }
        self.0[pos.row() as usize][pos.col() as usize] = digit;
    }

    /// Returns all empty positions in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.get(pos).is_none())
            .collect()
    }

    /// Returns the digits that can legally be placed at a position, i.e.
    /// those not already present in its row, column, or block.
    ///
    /// Filled cells have no candidates.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        if self.get(pos).is_some() {
            return DigitSet::EMPTY;
        }
        let mut used = DigitSet::new();
        for i in 0..9 {
            if let Some(digit) = self.get(Position::new(pos.row(), i)) {
                used.insert(digit);
            }
            if let Some(digit) = self.get(Position::new(i, pos.col())) {
                used.insert(digit);
            }
            if let Some(digit) = self.get(Position::from_block(pos.block_index(), i)) {
                used.insert(digit);
            }
        }
        !used
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Position::ALL.into_iter().all(|pos| self.get(pos).is_some())
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.get(pos).is_some())
            .count()
    }
}

impl fmt::Display for PartialGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in Position::ALL {
            match self.get(pos) {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

impl FromStr for PartialGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<Option<u8>> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '1'..='9' => Ok(Some(c as u8 - b'0')),
                '.' | '0' | '_' => Ok(None),
                found => Err(ParseGridError::InvalidCharacter { found }),
            })
            .collect::<Result<_, _>>()?;
        if cells.len() != 81 {
            return Err(ParseGridError::WrongLength { found: cells.len() });
        }
        let mut grid = Self::new();
        for (pos, digit) in Position::ALL.into_iter().zip(cells) {
            grid.set(pos, digit);
        }
        Ok(grid)
    }
}

impl From<&Grid> for PartialGrid {
    fn from(grid: &Grid) -> Self {
        grid.to_partial()
    }
}
