//! Cage-aware validation for the killer variant.

use sumgrid_core::{Board, Cage, DigitSet};

use crate::conflict::{check_conflicts, is_board_complete};

/// Recomputes conflict flags for a killer board.
///
/// Classic row/column/block conflicts are detected first, then cage
/// constraints are layered on top. Per cage:
///
/// - cells sharing a filled digit are flagged;
/// - if the running sum of filled digits exceeds the cage target, or the cage
///   is fully filled with the wrong sum, every filled cell of the cage is
///   flagged.
///
/// # Examples
///
/// ```
/// use sumgrid_core::{Board, Cage, Position};
/// use sumgrid_solver::validate_killer_cages;
///
/// let mut board = Board::empty();
/// let a = Position::new(0, 0);
/// let b = Position::new(0, 1);
/// board.cell_mut(a).value = Some(6);
/// board.cell_mut(b).value = Some(6);
///
/// let cage = Cage { id: 0, cells: vec![a, b], sum: 10 };
/// validate_killer_cages(&mut board, &[cage]);
/// assert!(board.cell(a).is_conflict);
/// assert!(board.cell(b).is_conflict);
/// ```
pub fn validate_killer_cages(board: &mut Board, cages: &[Cage]) {
    check_conflicts(board);

    for cage in cages {
        let mut sum = 0u32;
        let mut seen = DigitSet::new();
        let mut duplicates = DigitSet::new();
        let mut filled = 0usize;
        for &pos in &cage.cells {
            if let Some(digit) = board.value(pos) {
                filled += 1;
                sum += u32::from(digit);
                if seen.contains(digit) {
                    duplicates.insert(digit);
                }
                seen.insert(digit);
            }
        }

        let sum_violated = sum > cage.sum || (filled == cage.cells.len() && sum != cage.sum);
        for &pos in &cage.cells {
            let Some(digit) = board.value(pos) else {
                continue;
            };
            if sum_violated || duplicates.contains(digit) {
                board.cell_mut(pos).is_conflict = true;
            }
        }
    }
}

/// Returns `true` if the board is complete and every cage is exactly
/// satisfied: fully filled, matching sum, no duplicate digits.
#[must_use]
pub fn is_killer_board_complete(board: &Board, cages: &[Cage]) -> bool {
    if !is_board_complete(board) {
        return false;
    }
    cages.iter().all(|cage| cage_exactly_satisfied(board, cage))
}

fn cage_exactly_satisfied(board: &Board, cage: &Cage) -> bool {
    let mut sum = 0u32;
    let mut seen = DigitSet::new();
    for &pos in &cage.cells {
        let Some(digit) = board.value(pos) else {
            return false;
        };
        if seen.contains(digit) {
            return false;
        }
        seen.insert(digit);
        sum += u32::from(digit);
    }
    sum == cage.sum
}

#[cfg(test)]
mod tests {
    use sumgrid_core::{Grid, Position};

    use super::*;

    const SOLUTION: &str =
        "123456789456789123789123456231564897564897231897231564312645978645978312978312645";

    fn solution() -> Grid {
        SOLUTION.parse().unwrap()
    }

    fn row_triple_cages(solution: &Grid) -> Vec<Cage> {
        let mut cages = Vec::new();
        for row in 0..9 {
            for third in 0..3 {
                let cells: Vec<Position> = (0..3)
                    .map(|i| Position::new(row, third * 3 + i))
                    .collect();
                cages.push(Cage::from_cells(cages.len(), cells, solution));
            }
        }
        cages
    }

    #[test]
    fn test_duplicate_and_oversum_flags_both_cells() {
        // Cage declares sum 10 but holds 6 and 6: duplicate, and 12 > 10
        let mut board = Board::empty();
        let a = Position::new(3, 0);
        let b = Position::new(3, 1);
        board.cell_mut(a).value = Some(6);
        board.cell_mut(b).value = Some(6);
        let cage = Cage {
            id: 0,
            cells: vec![a, b],
            sum: 10,
        };

        validate_killer_cages(&mut board, &[cage]);

        assert!(board.cell(a).is_conflict);
        assert!(board.cell(b).is_conflict);
    }

    #[test]
    fn test_partial_sum_within_target_is_fine() {
        let mut board = Board::empty();
        let cells = vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];
        board.cell_mut(cells[0]).value = Some(4);
        let cage = Cage {
            id: 0,
            cells,
            sum: 12,
        };

        validate_killer_cages(&mut board, &[cage.clone()]);
        assert!(!board.cell(Position::new(0, 0)).is_conflict);

        // Partial sum exceeding the target flags the filled cells
        board.cell_mut(Position::new(1, 0)).value = Some(9);
        validate_killer_cages(&mut board, &[cage]);
        assert!(board.cell(Position::new(0, 0)).is_conflict);
        assert!(board.cell(Position::new(1, 0)).is_conflict);
        // The empty cage cell carries no flag
        assert!(!board.cell(Position::new(2, 0)).is_conflict);
    }

    #[test]
    fn test_full_cage_with_wrong_sum_is_flagged() {
        let mut board = Board::empty();
        let cells = vec![Position::new(0, 0), Position::new(0, 1)];
        board.cell_mut(cells[0]).value = Some(1);
        board.cell_mut(cells[1]).value = Some(2);
        let cage = Cage {
            id: 0,
            cells,
            sum: 5,
        };

        validate_killer_cages(&mut board, &[cage]);
        assert!(board.cell(Position::new(0, 0)).is_conflict);
        assert!(board.cell(Position::new(0, 1)).is_conflict);
    }

    #[test]
    fn test_classic_conflicts_still_detected() {
        // Cage constraints satisfied, but a row duplicate exists outside the
        // cage pair's block
        let mut board = Board::empty();
        let a = Position::new(0, 0);
        let b = Position::new(0, 8);
        board.cell_mut(a).value = Some(5);
        board.cell_mut(b).value = Some(5);
        let cages = vec![
            Cage {
                id: 0,
                cells: vec![a],
                sum: 5,
            },
            Cage {
                id: 1,
                cells: vec![b],
                sum: 5,
            },
        ];

        validate_killer_cages(&mut board, &cages);
        assert!(board.cell(a).is_conflict);
        assert!(board.cell(b).is_conflict);
    }

    #[test]
    fn test_solution_with_true_cages_is_complete() {
        let sol = solution();
        let cages = row_triple_cages(&sol);
        let mut board = Board::from_solution(&sol);
        validate_killer_cages(&mut board, &cages);

        for pos in Position::ALL {
            assert!(!board.cell(pos).is_conflict);
        }
        assert!(is_killer_board_complete(&board, &cages));
    }

    #[test]
    fn test_incomplete_cage_is_not_complete() {
        let sol = solution();
        let cages = row_triple_cages(&sol);
        let mut board = Board::from_solution(&sol);
        board.clear(Position::new(0, 0));
        assert!(!is_killer_board_complete(&board, &cages));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut board = Board::empty();
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        board.cell_mut(a).value = Some(6);
        board.cell_mut(b).value = Some(6);
        let cages = vec![Cage {
            id: 0,
            cells: vec![a, b],
            sum: 10,
        }];

        validate_killer_cages(&mut board, &cages);
        let once = board.clone();
        validate_killer_cages(&mut board, &cages);
        assert_eq!(board, once);
    }
}
