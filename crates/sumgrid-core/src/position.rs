//! Board coordinates and 3×3 block arithmetic.

use std::fmt::{self, Display};

/// A cell coordinate on the 9×9 board.
///
/// `row` and `col` are both in the range 0-8. Row 0 is the top row and
/// column 0 is the leftmost column.
///
/// # Examples
///
/// ```
/// use sumgrid_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.block_index(), 5);
///
/// // Iterate over every cell on the board
/// assert_eq!(Position::ALL.len(), 81);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// All 81 positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { row: 0, col: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self {
                row: (i / 9) as u8,
                col: (i % 9) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a position from row and column indices.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range 0-8.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "position out of range");
        Self { row, col }
    }

    /// Returns the row index (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column index (0-8).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the index of the 3×3 block containing this position.
    ///
    /// Blocks are numbered 0-8, left to right, top to bottom.
    #[must_use]
    pub const fn block_index(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Converts a cell index within a block (0-8, row-major) into a position.
    ///
    /// # Panics
    ///
    /// Panics if `block` or `i` is not in the range 0-8.
    #[must_use]
    pub const fn from_block(block: u8, i: u8) -> Self {
        assert!(block < 9 && i < 9);
        Self::new((block / 3) * 3 + i / 3, (block % 3) * 3 + i % 3)
    }

    /// Returns the orthogonal (edge-sharing) neighbors of this position.
    ///
    /// Corner cells have two neighbors, edge cells three, interior cells four.
    #[must_use]
    pub fn orthogonal_neighbors(self) -> Vec<Self> {
        let mut neighbors = Vec::with_capacity(4);
        if self.row > 0 {
            neighbors.push(Self::new(self.row - 1, self.col));
        }
        if self.row < 8 {
            neighbors.push(Self::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            neighbors.push(Self::new(self.row, self.col - 1));
        }
        if self.col < 8 {
            neighbors.push(Self::new(self.row, self.col + 1));
        }
        neighbors
    }

    /// Returns the position obtained by rotating the board 180°.
    ///
    /// The board center (4, 4) is its own partner.
    #[must_use]
    pub const fn rotational_partner(self) -> Self {
        Self::new(8 - self.row, 8 - self.col)
    }

    /// Returns `true` if the two positions share a row, column, or block
    /// and are distinct.
    #[must_use]
    pub fn sees(self, other: Self) -> bool {
        self != other
            && (self.row == other.row
                || self.col == other.col
                || self.block_index() == other.block_index())
    }

    /// Returns the linear index (0-80, row-major) of this position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_board_in_row_major_order() {
        assert_eq!(Position::ALL[0], Position::new(0, 0));
        assert_eq!(Position::ALL[8], Position::new(0, 8));
        assert_eq!(Position::ALL[9], Position::new(1, 0));
        assert_eq!(Position::ALL[80], Position::new(8, 8));
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
    }

    #[test]
    fn test_block_round_trip() {
        for block in 0..9 {
            for i in 0..9 {
                let pos = Position::from_block(block, i);
                assert_eq!(pos.block_index(), block);
            }
        }
        // Each block contains exactly 9 distinct cells
        for block in 0..9 {
            let cells: Vec<_> = (0..9).map(|i| Position::from_block(block, i)).collect();
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_orthogonal_neighbors() {
        assert_eq!(Position::new(0, 0).orthogonal_neighbors().len(), 2);
        assert_eq!(Position::new(0, 4).orthogonal_neighbors().len(), 3);
        assert_eq!(Position::new(4, 4).orthogonal_neighbors().len(), 4);
    }

    #[test]
    fn test_rotational_partner() {
        assert_eq!(
            Position::new(0, 0).rotational_partner(),
            Position::new(8, 8)
        );
        assert_eq!(
            Position::new(4, 4).rotational_partner(),
            Position::new(4, 4)
        );
        for pos in Position::ALL {
            assert_eq!(pos.rotational_partner().rotational_partner(), pos);
        }
    }

    #[test]
    fn test_sees() {
        let pos = Position::new(4, 4);
        assert!(pos.sees(Position::new(4, 0))); // same row
        assert!(pos.sees(Position::new(0, 4))); // same column
        assert!(pos.sees(Position::new(3, 3))); // same block
        assert!(!pos.sees(pos)); // not itself
        assert!(!pos.sees(Position::new(0, 0)));
    }

    #[test]
    #[should_panic(expected = "position out of range")]
    fn test_out_of_range_panics() {
        let _ = Position::new(9, 0);
    }
}
