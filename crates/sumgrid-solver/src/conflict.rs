//! Classic rule-conflict detection and completion checks.

use sumgrid_core::{Board, Grid, Position};

/// Recomputes the conflict flag of every cell on the board.
///
/// Filled cells are grouped by digit within each of the 9 rows, 9 columns,
/// and 9 blocks in one pass per house family; every member of a group with
/// more than one entry is marked conflicted. Stale flags from previous runs
/// are cleared first, which makes the function idempotent.
///
/// This runs on every player keystroke, so the cost is a fixed three O(81)
/// sweeps rather than a per-cell peer scan.
///
/// # Examples
///
/// ```
/// use sumgrid_core::{Board, Position};
/// use sumgrid_solver::check_conflicts;
///
/// let mut board = Board::empty();
/// board.cell_mut(Position::new(0, 0)).value = Some(7);
/// board.cell_mut(Position::new(0, 5)).value = Some(7);
///
/// check_conflicts(&mut board);
/// assert!(board.cell(Position::new(0, 0)).is_conflict);
/// assert!(board.cell(Position::new(0, 5)).is_conflict);
/// ```
pub fn check_conflicts(board: &mut Board) {
    for pos in Position::ALL {
        board.cell_mut(pos).is_conflict = false;
    }

    for house in 0..9 {
        mark_house(board, |i| Position::new(house, i));
        mark_house(board, |i| Position::new(i, house));
        mark_house(board, |i| Position::from_block(house, i));
    }
}

/// Marks duplicates within one house, given its cell-index-to-position map.
fn mark_house(board: &mut Board, pos_at: impl Fn(u8) -> Position) {
    // members[d - 1] collects the house cells holding digit d
    let mut members: [[Option<Position>; 9]; 9] = [[None; 9]; 9];
    let mut counts = [0usize; 9];
    for i in 0..9 {
        let pos = pos_at(i);
        if let Some(digit) = board.value(pos) {
            let d = usize::from(digit) - 1;
            members[d][counts[d]] = Some(pos);
            counts[d] += 1;
        }
    }
    for d in 0..9 {
        if counts[d] > 1 {
            for pos in members[d].iter().flatten() {
                board.cell_mut(*pos).is_conflict = true;
            }
        }
    }
}

/// Returns `true` if every cell is filled and no cell is conflicted.
///
/// Conflict flags are not recomputed here; call [`check_conflicts`] first if
/// the board may carry stale state.
#[must_use]
pub fn is_board_complete(board: &Board) -> bool {
    Position::ALL.into_iter().all(|pos| {
        let cell = board.cell(pos);
        cell.is_filled() && !cell.is_conflict
    })
}

/// Returns `true` if every filled cell agrees with the solution grid.
#[must_use]
pub fn is_board_correct(board: &Board, solution: &Grid) -> bool {
    board.agrees_with(solution)
}
