//! Sum-constrained cages for the killer variant.

use crate::{DigitSet, Grid, Position};

/// A killer cage: a region of cells with a target sum.
///
/// Cages carry an implicit no-duplicate constraint: no two cells of a cage may
/// hold the same digit. A valid cage set partitions all 81 cells exactly once,
/// and each cage's `sum` equals the sum of the solution digits at its cells.
/// Cages are immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cage {
    /// Identifier, unique within a cage set.
    pub id: usize,
    /// The member cells. Never empty, never containing duplicates.
    pub cells: Vec<Position>,
    /// The target sum of the member cells' digits.
    pub sum: u32,
}

impl Cage {
    /// Builds a cage over `cells` with its sum computed from the solution.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    #[must_use]
    pub fn from_cells(id: usize, cells: Vec<Position>, solution: &Grid) -> Self {
        assert!(!cells.is_empty(), "cage must contain at least one cell");
        let sum = cells.iter().map(|&pos| u32::from(solution.get(pos))).sum();
        Self { id, cells, sum }
    }

    /// Returns `true` if the cage contains the position.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Returns the number of cells in the cage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the cage has no cells.
    ///
    /// A well-formed cage is never empty; this exists for the slice-like API.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks this cage against the solution: the declared sum must match the
    /// actual digits and no digit may repeat.
    #[must_use]
    pub fn is_consistent_with(&self, solution: &Grid) -> bool {
        let mut seen = DigitSet::new();
        let mut sum = 0;
        for &pos in &self.cells {
            let digit = solution.get(pos);
            if seen.contains(digit) {
                return false;
            }
            seen.insert(digit);
            sum += u32::from(digit);
        }
        sum == self.sum
    }
}

/// Checks a whole cage set: every cage consistent with the solution and the
/// cages together covering all 81 cells exactly once.
#[must_use]
pub fn cages_are_valid(cages: &[Cage], solution: &Grid) -> bool {
    let mut covered = [false; 81];
    for cage in cages {
        if cage.cells.is_empty() || !cage.is_consistent_with(solution) {
            return false;
        }
        for &pos in &cage.cells {
            if covered[pos.index()] {
                return false;
            }
            covered[pos.index()] = true;
        }
    }
    covered.iter().all(|&c| c)
}

/// Returns a lookup table mapping each cell to the id of its containing cage.
///
/// Cells not covered by any cage map to `None`.
#[must_use]
pub fn cage_index(cages: &[Cage]) -> [Option<usize>; 81] {
    let mut index = [None; 81];
    for cage in cages {
        for &pos in &cage.cells {
            index[pos.index()] = Some(cage.id);
        }
    }
    index
}
