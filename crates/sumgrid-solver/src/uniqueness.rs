//! Backtracking uniqueness search.

use sumgrid_core::{PartialGrid, Position};
use tinyvec::ArrayVec;

/// Ceiling on recursive search calls before the search gives up.
///
/// Exceeding the budget is reported as [`SearchOutcome::BudgetExceeded`] and
/// treated by [`has_unique_solution`] as "not unique". That is a safe false
/// negative: it can only block a cell removal, never corrupt a puzzle.
pub const SEARCH_BUDGET: usize = 100_000;

/// Result of a capped solution-counting search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The grid has no completion.
    NoSolution,
    /// Exactly one completion exists.
    Unique,
    /// At least two completions exist.
    Multiple,
    /// The call budget ran out before the count was settled.
    BudgetExceeded,
}

/// Returns `true` if the partial grid has exactly one completion.
///
/// The search backtracks over the empty cells, ordered once up front by
/// ascending candidate count (the most-constraining-variable heuristic), and
/// stops as soon as a second complete assignment is found. If the search
/// exceeds [`SEARCH_BUDGET`] recursive calls it conservatively reports
/// `false` rather than continuing unbounded.
///
/// # Examples
///
/// ```
/// use sumgrid_core::PartialGrid;
/// use sumgrid_solver::has_unique_solution;
///
/// let solved: PartialGrid =
///     "123456789456789123789123456231564897564897231897231564312645978645978312978312645"
///         .parse()
///         .unwrap();
/// assert!(has_unique_solution(&solved));
///
/// let empty = PartialGrid::new();
/// assert!(!has_unique_solution(&empty));
/// ```
#[must_use]
pub fn has_unique_solution(grid: &PartialGrid) -> bool {
    count_solutions_capped(grid) == SearchOutcome::Unique
}

/// Counts completions of the partial grid, stopping at two.
///
/// This is the observable form of the search behind
/// [`has_unique_solution`]; it distinguishes budget exhaustion from a proven
/// second solution.
#[must_use]
pub fn count_solutions_capped(grid: &PartialGrid) -> SearchOutcome {
    // Order empty cells once by ascending candidate count to shrink the
    // branching factor near the root. The ordering is not re-derived during
    // the search.
    let mut empty: Vec<Position> = grid.empty_positions();
    empty.sort_by_key(|&pos| grid.candidates_at(pos).len());

    let mut search = Search {
        grid: *grid,
        cells: empty,
        calls: 0,
        solutions: 0,
    };
    let exhausted = search.run(0);

    match (search.solutions, exhausted) {
        (n, _) if n >= 2 => SearchOutcome::Multiple,
        (_, true) => SearchOutcome::BudgetExceeded,
        (1, false) => SearchOutcome::Unique,
        _ => SearchOutcome::NoSolution,
    }
}

struct Search {
    grid: PartialGrid,
    cells: Vec<Position>,
    calls: usize,
    solutions: usize,
}

impl Search {
    /// Recursive backtracking over `cells[depth..]`. Returns `true` if the
    /// budget ran out.
    fn run(&mut self, depth: usize) -> bool {
        self.calls += 1;
        if self.calls > SEARCH_BUDGET {
            return true;
        }
        if self.solutions >= 2 {
            return false;
        }
        let Some(&pos) = self.cells.get(depth) else {
            self.solutions += 1;
            return false;
        };

        let candidates: ArrayVec<[u8; 9]> = self.grid.candidates_at(pos).iter().collect();
        for digit in candidates {
            self.grid.set(pos, Some(digit));
            let exhausted = self.run(depth + 1);
            self.grid.set(pos, None);
            if exhausted {
                return true;
            }
            if self.solutions >= 2 {
                return false;
            }
        }
        false
    }
}
