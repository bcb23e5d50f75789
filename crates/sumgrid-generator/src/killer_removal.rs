//! Cell removal for killer puzzles.
//!
//! Killer puzzles keep far fewer hints than classic ones because cage sums
//! carry most of the information. Each cage anchors a must-keep quota derived
//! from the difficulty's keep fraction; the removal loop then strips the
//! remaining removable cells in priority order, in batches of at most
//! [`BATCH_LIMIT`] cells, validating after each batch.
//!
//! Validation is structural: every cage must keep at least one filled cell so
//! its sum reads as a constraint rather than a riddle. Expert relaxes that to
//! allow fully emptied cages. A failed batch is restored and the loop retries
//! with the next candidates, up to the difficulty's attempt ceiling.

use log::debug;
use rand::Rng;
use sumgrid_core::{Board, Cage, Cell, Difficulty, DigitSet, Grid, Position, cage_index};

/// Largest number of cells removed between validation passes.
const BATCH_LIMIT: usize = 10;

/// Strips cells from a solved board using its cage layout.
///
/// At least the difficulty's
/// [`killer_hint_keep`](Difficulty::killer_hint_keep) quota of cells
/// survives, anchored per cage by the difficulty's keep fraction.
pub fn remove_killer_cells<R: Rng + ?Sized>(
    solution: &Grid,
    cages: &[Cage],
    difficulty: Difficulty,
    rng: &mut R,
) -> Board {
    let mut board = Board::from_solution(solution);
    let must_keep = must_keep_cells(cages, difficulty, rng);

    let mut removable: Vec<Position> = Position::ALL
        .into_iter()
        .filter(|pos| !must_keep[pos.index()])
        .collect();
    sort_by_priority(&mut removable, cages, rng);

    let target = 81 - difficulty.killer_hint_keep();
    let mut removed = 0;
    let mut attempts = 0;
    let mut cursor = 0;

    while removed < target && cursor < removable.len() {
        let batch_len = BATCH_LIMIT.min(target - removed).min(removable.len() - cursor);
        let mut batch: Vec<(Position, u8)> = Vec::with_capacity(batch_len);
        for &pos in &removable[cursor..cursor + batch_len] {
            if let Some(value) = board.value(pos) {
                board.clear(pos);
                batch.push((pos, value));
            }
        }
        cursor += batch_len;
        if batch.is_empty() {
            break;
        }

        if is_killer_removal_valid(&board, cages, difficulty) {
            removed += batch.len();
        } else {
            debug!("killer batch failed validation, restoring {} cells", batch.len());
            for (pos, value) in batch {
                *board.cell_mut(pos) = Cell::initial(value);
            }
            attempts += 1;
            if attempts >= difficulty.killer_removal_attempts() {
                break;
            }
        }
    }
    board
}

/// Marks the cells each cage must keep filled.
///
/// The quota per cage is `round(len * keep_fraction)` with a floor of one
/// cell, except on difficulties whose fraction rounds a small cage to zero.
fn must_keep_cells<R: Rng + ?Sized>(
    cages: &[Cage],
    difficulty: Difficulty,
    rng: &mut R,
) -> [bool; 81] {
    use rand::seq::SliceRandom as _;

    let fraction = difficulty.killer_keep_fraction();
    let mut keep = [false; 81];
    for cage in cages {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "rounded fraction of a cage size, at most 9"
        )]
        let mut quota = (cage.len() as f64 * fraction).round() as usize;
        if quota == 0 && fraction >= 0.25 {
            quota = 1;
        }
        let mut cells = cage.cells.clone();
        cells.shuffle(rng);
        for pos in cells.into_iter().take(quota) {
            keep[pos.index()] = true;
        }
    }
    keep
}

/// Orders removal candidates: cells in big cages go first (their sums retain
/// the most information), a cage's last removable cell goes last, and jitter
/// varies the order between runs.
fn sort_by_priority<R: Rng + ?Sized>(cells: &mut [Position], cages: &[Cage], rng: &mut R) {
    let index = cage_index(cages);
    let mut is_candidate = [false; 81];
    for &pos in cells.iter() {
        is_candidate[pos.index()] = true;
    }

    #[expect(clippy::cast_precision_loss, reason = "cage sizes are at most 9")]
    let mut scored: Vec<(Position, f64)> = cells
        .iter()
        .map(|&pos| {
            let cage_len = index[pos.index()].map_or(1, |c| cages[c].len());
            let mut score = cage_len as f64 + rng.random_range(0.0..1.0);
            // Removing a cage's only removable cell risks emptying the
            // cage entirely; make those cells go last.
            let siblings = index[pos.index()].map_or(0, |c| {
                cages[c]
                    .cells
                    .iter()
                    .filter(|&&p| p != pos && is_candidate[p.index()])
                    .count()
            });
            if siblings == 0 {
                score -= 5.0;
            }
            (pos, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (slot, (pos, _)) in cells.iter_mut().zip(scored) {
        *slot = pos;
    }
}

/// Validates the board against its cages after a removal batch.
///
/// Remaining cells always agree with the solution, so sums and duplicates
/// can only be violated by bugs; the checks are kept as guards. The binding
/// constraint is that every cage keeps at least one filled cell, which
/// Expert alone relaxes.
fn is_killer_removal_valid(board: &Board, cages: &[Cage], difficulty: Difficulty) -> bool {
    let lenient = difficulty == Difficulty::Expert;
    for cage in cages {
        let mut sum = 0u32;
        let mut seen = DigitSet::new();
        let mut filled = 0usize;
        for &pos in &cage.cells {
            if let Some(digit) = board.value(pos) {
                if seen.contains(digit) {
                    return false;
                }
                seen.insert(digit);
                sum += u32::from(digit);
                filled += 1;
            }
        }
        if sum > cage.sum {
            return false;
        }
        if filled == 0 && !lenient {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{generate_cages, generate_solution};

    #[test]
    fn test_keeps_at_least_the_difficulty_quota() {
        let mut rng = Pcg64::seed_from_u64(31);
        for difficulty in Difficulty::ALL {
            let solution = generate_solution(&mut rng);
            let cages = generate_cages(&solution, difficulty, &mut rng);
            let board = remove_killer_cells(&solution, &cages, difficulty, &mut rng);
            assert!(
                board.filled_count() >= difficulty.killer_hint_keep(),
                "{difficulty}: {} hints below quota {}",
                board.filled_count(),
                difficulty.killer_hint_keep()
            );
        }
    }

    #[test]
    fn test_remaining_hints_match_the_solution() {
        let mut rng = Pcg64::seed_from_u64(32);
        let solution = generate_solution(&mut rng);
        let cages = generate_cages(&solution, Difficulty::Medium, &mut rng);
        let board = remove_killer_cells(&solution, &cages, Difficulty::Medium, &mut rng);
        assert!(board.agrees_with(&solution));
        for pos in Position::ALL {
            if board.value(pos).is_some() {
                assert!(board.cell(pos).is_initial);
            }
        }
    }

    #[test]
    fn test_every_cage_keeps_a_cell_below_expert() {
        let mut rng = Pcg64::seed_from_u64(33);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let solution = generate_solution(&mut rng);
            let cages = generate_cages(&solution, difficulty, &mut rng);
            let board = remove_killer_cells(&solution, &cages, difficulty, &mut rng);
            for cage in &cages {
                assert!(
                    cage.cells.iter().any(|&pos| board.value(pos).is_some()),
                    "{difficulty}: cage {} lost all of its cells",
                    cage.id
                );
            }
        }
    }

    #[test]
    fn test_must_keep_quota_follows_the_fraction() {
        let mut rng = Pcg64::seed_from_u64(35);
        let solution = crate::base_grid();
        let cages = generate_cages(&solution, Difficulty::Easy, &mut rng);
        let keep = must_keep_cells(&cages, Difficulty::Easy, &mut rng);
        for cage in &cages {
            let kept = cage.cells.iter().filter(|&&p| keep[p.index()]).count();
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss,
                reason = "rounded fraction of a cage size, at most 9"
            )]
            let expected = ((cage.len() as f64 * 0.5).round() as usize).max(1);
            assert_eq!(kept, expected, "cage {} kept {kept} cells", cage.id);
        }
    }

    #[test]
    fn test_validation_rejects_an_emptied_cage_when_strict() {
        let solution = crate::base_grid();
        let mut rng = Pcg64::seed_from_u64(36);
        let cages = generate_cages(&solution, Difficulty::Hard, &mut rng);
        let mut board = Board::from_solution(&solution);
        for &pos in &cages[0].cells {
            board.clear(pos);
        }
        assert!(!is_killer_removal_valid(&board, &cages, Difficulty::Hard));
        assert!(is_killer_removal_valid(&board, &cages, Difficulty::Expert));
    }
}
