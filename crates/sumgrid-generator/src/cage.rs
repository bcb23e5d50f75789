//! Killer cage layout generation.
//!
//! Cages are grown over the solved grid in three passes:
//!
//! 1. **Seeding** drops 2-3 seed cells into every block so cages spread
//!    across the whole grid instead of clustering.
//! 2. **Growth** expands each seed best-first toward a random target size,
//!    scoring candidate neighbors by connectivity, squareness, and block
//!    affinity. A cage never absorbs a cell whose solution digit it already
//!    contains.
//! 3. **Filling** sweeps up leftover cells, merging single orphans into an
//!    adjacent cage with spare capacity and flood-filling larger gaps into
//!    new cages.
//!
//! The finished layout is validated as a whole (exact partition, true sums,
//! no duplicate solution digits, size cap) and regenerated from scratch on
//! failure, up to a fixed attempt ceiling with a deterministic row-triple
//! fallback behind it.

use log::{debug, warn};
use rand::{
    Rng,
    seq::{IndexedRandom as _, SliceRandom as _},
};
use sumgrid_core::{Cage, Difficulty, Grid, Position, cages_are_valid};

/// Whole-layout regeneration ceiling before the fallback layout is used.
const MAX_CAGE_ATTEMPTS: usize = 20;

/// Generates a complete cage layout for a solved grid.
///
/// Every cell belongs to exactly one cage, every cage sum is the true sum of
/// its solution digits, no cage contains a duplicate solution digit, and no
/// cage exceeds the difficulty's
/// [`max_cage_size`](Difficulty::max_cage_size).
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use sumgrid_core::{Difficulty, cages_are_valid};
///
/// let mut rng = rand_pcg::Pcg64::seed_from_u64(4);
/// let solution = sumgrid_generator::generate_solution(&mut rng);
/// let cages = sumgrid_generator::generate_cages(&solution, Difficulty::Medium, &mut rng);
/// assert!(cages_are_valid(&cages, &solution));
/// ```
pub fn generate_cages<R: Rng + ?Sized>(
    solution: &Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> Vec<Cage> {
    let max_size = difficulty.max_cage_size();
    for attempt in 0..MAX_CAGE_ATTEMPTS {
        let cages = grow_layout(solution, max_size, rng);
        if cages_are_valid(&cages, solution) && cages.iter().all(|c| c.len() <= max_size) {
            return cages;
        }
        debug!("cage layout attempt {attempt} failed validation, regenerating");
    }
    warn!("cage generation exhausted {MAX_CAGE_ATTEMPTS} attempts, using row-triple layout");
    row_triple_layout(solution)
}

/// One full seeding/growth/filling pass. The result may still fail whole-set
/// validation, in which case the caller regenerates.
fn grow_layout<R: Rng + ?Sized>(solution: &Grid, max_size: usize, rng: &mut R) -> Vec<Cage> {
    let mut assignment: [Option<usize>; 81] = [None; 81];
    let mut groups: Vec<Vec<Position>> = Vec::new();

    seed_blocks(&mut assignment, &mut groups, rng);
    grow_seeds(solution, &mut assignment, &mut groups, max_size, rng);
    fill_gaps(solution, &mut assignment, &mut groups, max_size, rng);

    groups
        .into_iter()
        .filter(|cells| !cells.is_empty())
        .enumerate()
        .map(|(id, cells)| Cage::from_cells(id, cells, solution))
        .collect()
}

/// Drops 2-3 seed cells into every block, each starting its own group.
fn seed_blocks<R: Rng + ?Sized>(
    assignment: &mut [Option<usize>; 81],
    groups: &mut Vec<Vec<Position>>,
    rng: &mut R,
) {
    for block in 0..9 {
        let mut offsets: Vec<u8> = (0..9).collect();
        offsets.shuffle(rng);
        let seeds = rng.random_range(2..=3);
        for &offset in offsets.iter().take(seeds) {
            let pos = Position::from_block(block, offset);
            assignment[pos.index()] = Some(groups.len());
            groups.push(vec![pos]);
        }
    }
}

/// Expands each group best-first toward a random target size.
fn grow_seeds<R: Rng + ?Sized>(
    solution: &Grid,
    assignment: &mut [Option<usize>; 81],
    groups: &mut [Vec<Position>],
    max_size: usize,
    rng: &mut R,
) {
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.shuffle(rng);

    for &group in &order {
        let target = rng.random_range(2..=max_size);
        while groups[group].len() < target {
            let Some(next) = best_expansion(solution, assignment, &groups[group], rng) else {
                break;
            };
            assignment[next.index()] = Some(group);
            groups[group].push(next);
        }
    }
}

/// Picks the next cell to absorb, choosing randomly among the top 3 scored
/// candidates so growth stays compact without being deterministic.
fn best_expansion<R: Rng + ?Sized>(
    solution: &Grid,
    assignment: &[Option<usize>; 81],
    cells: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let mut candidates: Vec<(Position, f64)> = Vec::new();
    for &cell in cells {
        for neighbor in cell.orthogonal_neighbors() {
            if assignment[neighbor.index()].is_some() {
                continue;
            }
            if candidates.iter().any(|&(p, _)| p == neighbor) {
                continue;
            }
            // A cage cannot hold the same solution digit twice.
            let digit = solution.get(neighbor);
            if cells.iter().any(|&p| solution.get(p) == digit) {
                continue;
            }
            candidates.push((neighbor, expansion_score(neighbor, cells, rng)));
        }
    }
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top = candidates.len().min(3);
    candidates[..top].choose(rng).map(|&(pos, _)| pos)
}

/// Scores a candidate neighbor: more shared edges keep the cage compact,
/// small bounding boxes keep it squarish, staying inside the seed's block is
/// a mild plus, and jitter breaks ties.
fn expansion_score<R: Rng + ?Sized>(candidate: Position, cells: &[Position], rng: &mut R) -> f64 {
    let shared_edges = candidate
        .orthogonal_neighbors()
        .into_iter()
        .filter(|n| cells.contains(n))
        .count();

    let (mut min_r, mut max_r) = (candidate.row(), candidate.row());
    let (mut min_c, mut max_c) = (candidate.col(), candidate.col());
    for &cell in cells {
        min_r = min_r.min(cell.row());
        max_r = max_r.max(cell.row());
        min_c = min_c.min(cell.col());
        max_c = max_c.max(cell.col());
    }
    let spread = f64::from(max_r - min_r) + f64::from(max_c - min_c);

    let same_block = cells
        .first()
        .is_some_and(|&first| first.block_index() == candidate.block_index());

    shared_edges as f64 * 1.5 - spread * 0.5
        + if same_block { 0.5 } else { 0.0 }
        + rng.random_range(0.0..0.25)
}

/// Assigns every leftover cell, preferring to merge single orphans into an
/// adjacent cage with spare capacity and a compatible digit.
fn fill_gaps<R: Rng + ?Sized>(
    solution: &Grid,
    assignment: &mut [Option<usize>; 81],
    groups: &mut Vec<Vec<Position>>,
    max_size: usize,
    rng: &mut R,
) {
    let mut leftovers: Vec<Position> = Position::ALL
        .into_iter()
        .filter(|pos| assignment[pos.index()].is_none())
        .collect();
    leftovers.shuffle(rng);

    for pos in leftovers {
        if assignment[pos.index()].is_some() {
            continue;
        }
        if let Some(group) = best_merge_target(solution, assignment, groups, pos, max_size) {
            assignment[pos.index()] = Some(group);
            groups[group].push(pos);
        } else {
            // Flood-fill a fresh cage out of the unassigned region.
            let group = groups.len();
            groups.push(Vec::new());
            flood_chunk(solution, assignment, groups, pos, group, max_size);
        }
    }
}

/// Picks the adjacent cage best able to absorb an orphan cell: must have
/// spare capacity and no clashing digit, ranked by capacity then by how many
/// edges it already shares with the orphan.
fn best_merge_target(
    solution: &Grid,
    assignment: &[Option<usize>; 81],
    groups: &[Vec<Position>],
    pos: Position,
    max_size: usize,
) -> Option<usize> {
    let digit = solution.get(pos);
    pos.orthogonal_neighbors()
        .into_iter()
        .filter_map(|n| assignment[n.index()])
        .filter(|&g| {
            groups[g].len() < max_size && groups[g].iter().all(|&p| solution.get(p) != digit)
        })
        .max_by_key(|&g| {
            let capacity = max_size - groups[g].len();
            let shared = pos
                .orthogonal_neighbors()
                .into_iter()
                .filter(|n| groups[g].contains(n))
                .count();
            capacity * 10 + shared
        })
}

/// Grows a new cage through the unassigned region around `start`, skipping
/// neighbors whose digit the chunk already holds.
fn flood_chunk(
    solution: &Grid,
    assignment: &mut [Option<usize>; 81],
    groups: &mut [Vec<Position>],
    start: Position,
    group: usize,
    max_size: usize,
) {
    let mut frontier = vec![start];
    while let Some(pos) = frontier.pop() {
        if groups[group].len() >= max_size || assignment[pos.index()].is_some() {
            continue;
        }
        let digit = solution.get(pos);
        if groups[group].iter().any(|&p| solution.get(p) == digit) {
            continue;
        }
        assignment[pos.index()] = Some(group);
        groups[group].push(pos);
        for neighbor in pos.orthogonal_neighbors() {
            if assignment[neighbor.index()].is_none() {
                frontier.push(neighbor);
            }
        }
    }
}

/// Deterministic fallback layout: 27 cages of 3, one per row triple. Always
/// valid because every row holds each digit once.
fn row_triple_layout(solution: &Grid) -> Vec<Cage> {
    (0..27)
        .map(|id| {
            let row = id / 3;
            let start = (id % 3) * 3;
            let cells = (start..start + 3)
                .map(|col| Position::new(row as u8, col as u8))
                .collect();
            Cage::from_cells(id, cells, solution)
        })
        .collect()
}
