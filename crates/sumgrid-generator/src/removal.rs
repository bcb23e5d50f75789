//! Cell removal for classic puzzles.
//!
//! Starting from a complete solution, cells are removed one at a time in a
//! priority order shaped by the difficulty's [`RemovalStrategy`]: positional
//! weights (center, corners, edges), a symmetry bonus for 180°-rotational
//! pairs, per-block distribution pressure, and random jitter so no two
//! puzzles remove the same pattern.
//!
//! Removal runs in two phases. Phase 1 removes up to 70% of the target
//! without any solver involvement. Phase 2 removes the remainder, and on
//! difficulties that verify uniqueness it re-checks the puzzle with the
//! uniqueness solver every 5th removal, restoring the most recent batch when
//! the check fails.

use log::debug;
use rand::Rng;
use sumgrid_core::{Board, Cell, Difficulty, Grid, Position, RemovalStrategy};
use sumgrid_solver::has_unique_solution;

/// How often phase 2 re-runs the uniqueness solver.
const VERIFY_EVERY: usize = 5;

/// Fraction of the removal target handled by the unchecked first phase.
const PHASE_ONE_FRACTION: f64 = 0.7;

/// Removal-intensity threshold above which central cells get an extra bonus.
const INTENSITY_THRESHOLD: f64 = 0.6;

/// Candidate window size as a multiple of the remaining target.
const WINDOW_FACTOR: f64 = 1.5;

/// Failed uniqueness batches tolerated before removal gives up.
const MAX_FAILED_BATCHES: usize = 10;

/// Removes cells from a solved board to produce a playable puzzle.
///
/// The number of retained hints falls inside the difficulty's
/// [`classic_hint_range`](Difficulty::classic_hint_range). On difficulties
/// that verify uniqueness, the result is guaranteed to have exactly one
/// solution; on the rest the target count is honored without solver checks.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use sumgrid_core::Difficulty;
///
/// let mut rng = rand_pcg::Pcg64::seed_from_u64(3);
/// let solution = sumgrid_generator::generate_solution(&mut rng);
/// let board = sumgrid_generator::generate_board(&solution, Difficulty::Easy, &mut rng);
/// let hints = board.filled_count();
/// assert!(Difficulty::Easy.classic_hint_range().contains(&hints));
/// ```
pub fn generate_board<R: Rng + ?Sized>(
    solution: &Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> Board {
    let range = difficulty.classic_hint_range();
    let hints = rng.random_range(range.clone());
    let target = 81 - hints;

    let mut board = Board::from_solution(solution);
    let removed = remove_cells(&mut board, target, difficulty, rng);

    // Uniqueness checks can stop phase 2 short of the target. Top up with
    // unchecked removals only while still above the difficulty's minimum
    // hint count, preferring uniqueness over an exact count.
    let max_removed = 81 - range.start();
    if removed < target && !difficulty.verifies_uniqueness() {
        force_remove_additional_cells(&mut board, target - removed, rng);
    } else if removed < target {
        debug!(
            "uniqueness checks stopped removal at {removed} of {target} \
             ({max_removed} max) for {difficulty}"
        );
    }
    board
}

/// Runs the two-phase removal loop. Returns the number of cells removed.
fn remove_cells<R: Rng + ?Sized>(
    board: &mut Board,
    target: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> usize {
    let strategy = difficulty.removal_strategy();
    let intensity = target as f64 / 81.0;
    let verify = difficulty.verifies_uniqueness();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "phase split of a count below 81"
    )]
    let phase_one_target = (target as f64 * PHASE_ONE_FRACTION).floor() as usize;

    let mut block_removed = [0usize; 9];
    let mut removed = 0;
    let mut since_verify = 0;
    let mut failed_batches = 0;
    let mut batch: Vec<(Position, u8)> = Vec::with_capacity(VERIFY_EVERY);

    while removed < target {
        let remaining = target - removed;
        let window = candidate_window(board, &strategy, intensity, remaining, rng);
        let Some(pos) = pick_from_window(&window, &block_removed, &strategy, rng) else {
            break;
        };
        let Some(value) = board.value(pos) else {
            break;
        };

        board.clear(pos);
        block_removed[pos.block_index() as usize] += 1;
        removed += 1;
        batch.push((pos, value));

        if verify && removed > phase_one_target {
            since_verify += 1;
            if since_verify >= VERIFY_EVERY || removed == target {
                if has_unique_solution(&board.to_partial_grid()) {
                    batch.clear();
                } else {
                    // Put the batch back and try again with freshly jittered
                    // candidates, up to a bounded number of failures.
                    debug!("removal batch broke uniqueness, restoring {} cells", batch.len());
                    for &(p, v) in &batch {
                        *board.cell_mut(p) = Cell::initial(v);
                        block_removed[p.block_index() as usize] -= 1;
                        removed -= 1;
                    }
                    batch.clear();
                    failed_batches += 1;
                    if failed_batches >= MAX_FAILED_BATCHES {
                        break;
                    }
                }
                since_verify = 0;
            }
        } else {
            batch.clear();
        }
    }
    removed
}

/// Scores every filled cell and keeps the best `WINDOW_FACTOR * remaining`
/// of them, then folds the symmetry bonus into pairs that both made the cut.
fn candidate_window<R: Rng + ?Sized>(
    board: &Board,
    strategy: &RemovalStrategy,
    intensity: f64,
    remaining: usize,
    rng: &mut R,
) -> Vec<(Position, f64)> {
    let mut scored: Vec<(Position, f64)> = Position::ALL
        .iter()
        .filter(|&&pos| board.value(pos).is_some())
        .map(|&pos| (pos, base_score(pos, strategy, intensity, rng)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "window size derived from a count below 81"
    )]
    let window_len = ((remaining as f64 * WINDOW_FACTOR).ceil() as usize).min(scored.len());
    scored.truncate(window_len.max(1));

    // Reward cells whose 180°-rotational partner is also in the window, so
    // removals tend toward symmetric patterns without forcing them.
    if strategy.symmetry_bonus > 0.0 {
        let in_window: Vec<Position> = scored.iter().map(|&(p, _)| p).collect();
        for (pos, score) in &mut scored {
            if in_window.contains(&pos.rotational_partner()) {
                *score += strategy.symmetry_bonus;
            }
        }
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    }
    scored
}

/// Positional score before symmetry and distribution adjustments.
fn base_score<R: Rng + ?Sized>(
    pos: Position,
    strategy: &RemovalStrategy,
    intensity: f64,
    rng: &mut R,
) -> f64 {
    let mut score: f64 = rng.random_range(0.0..1.0);

    let row = pos.row();
    let col = pos.col();
    let center_dist = f64::from(row.abs_diff(4).max(col.abs_diff(4)));
    score += strategy.prefer_center * (4.0 - center_dist) / 4.0;

    let is_corner_region = (row <= 2 || row >= 6) && (col <= 2 || col >= 6);
    if is_corner_region {
        score += strategy.prefer_corners;
    }
    let on_edge = row == 0 || row == 8 || col == 0 || col == 8;
    if on_edge {
        score += strategy.prefer_edges;
    }

    // Heavy removal targets spread outward from the middle of the grid.
    if intensity > INTENSITY_THRESHOLD && center_dist <= 2.0 {
        score += intensity - INTENSITY_THRESHOLD;
    }
    score
}

/// Picks the best window entry after penalizing over-mined blocks.
fn pick_from_window<R: Rng + ?Sized>(
    window: &[(Position, f64)],
    block_removed: &[usize; 9],
    strategy: &RemovalStrategy,
    rng: &mut R,
) -> Option<Position> {
    window
        .iter()
        .map(|&(pos, score)| {
            let mined = block_removed[pos.block_index() as usize] as f64;
            let adjusted =
                score - strategy.block_distribution * mined + rng.random_range(0.0..0.1);
            (pos, adjusted)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| pos)
}

/// Removes `count` more cells uniformly at random, without solver checks.
fn force_remove_additional_cells<R: Rng + ?Sized>(board: &mut Board, count: usize, rng: &mut R) {
    use rand::seq::SliceRandom as _;

    let mut filled: Vec<Position> = Position::ALL
        .iter()
        .copied()
        .filter(|&pos| board.value(pos).is_some())
        .collect();
    filled.shuffle(rng);
    for pos in filled.into_iter().take(count) {
        board.clear(pos);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;
    use sumgrid_solver::is_board_correct;

    use super::*;
    use crate::generate_solution;

    #[test]
    fn test_hint_count_lands_in_difficulty_range() {
        let mut rng = Pcg64::seed_from_u64(11);
        let solution = generate_solution(&mut rng);
        for difficulty in Difficulty::ALL {
            let board = generate_board(&solution, difficulty, &mut rng);
            let hints = board.filled_count();
            assert!(
                difficulty.classic_hint_range().contains(&hints),
                "{difficulty}: {hints} hints outside {:?}",
                difficulty.classic_hint_range()
            );
        }
    }

    #[test]
    fn test_remaining_cells_match_the_solution() {
        let mut rng = Pcg64::seed_from_u64(12);
        let solution = generate_solution(&mut rng);
        let board = generate_board(&solution, Difficulty::Medium, &mut rng);
        assert!(is_board_correct(&board, &solution));
        for pos in Position::ALL {
            if let Some(value) = board.value(pos) {
                assert_eq!(value, solution.get(pos));
                assert!(board.cell(pos).is_initial);
            }
        }
    }

    #[test]
    fn test_easy_and_medium_boards_are_unique() {
        let mut rng = Pcg64::seed_from_u64(13);
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            for _ in 0..3 {
                let solution = generate_solution(&mut rng);
                let board = generate_board(&solution, difficulty, &mut rng);
                assert!(
                    has_unique_solution(&board.to_partial_grid()),
                    "{difficulty} board has multiple solutions"
                );
            }
        }
    }

    #[test]
    fn test_unverified_boards_hit_the_exact_target() {
        // Without uniqueness checks nothing can stop removal short, so the
        // hint count is always exactly the value drawn from the range.
        let mut rng = Pcg64::seed_from_u64(14);
        let solution = generate_solution(&mut rng);
        for _ in 0..5 {
            let board = generate_board(&solution, Difficulty::Expert, &mut rng);
            assert!(
                Difficulty::Expert
                    .classic_hint_range()
                    .contains(&board.filled_count())
            );
        }
    }

    #[test]
    fn test_easy_removes_28_to_35_cells_from_the_base_grid() {
        let mut rng = Pcg64::seed_from_u64(16);
        let solution = crate::base_grid();
        let board = generate_board(&solution, Difficulty::Easy, &mut rng);
        let removed = 81 - board.filled_count();
        assert!((28..=35).contains(&removed), "removed {removed} cells");
        assert!(has_unique_solution(&board.to_partial_grid()));
    }

    #[test]
    fn test_force_remove_respects_count() {
        let mut rng = Pcg64::seed_from_u64(15);
        let solution = generate_solution(&mut rng);
        let mut board = Board::from_solution(&solution);
        force_remove_additional_cells(&mut board, 10, &mut rng);
        assert_eq!(board.filled_count(), 71);
    }
}
