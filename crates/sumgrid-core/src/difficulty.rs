//! Difficulty levels and their fixed numeric tables.
//!
//! Difficulty is configuration, not logic: each level maps to closed tables
//! of hint counts, cage limits, and removal weights that the engines consume
//! without interpreting.

use std::{fmt, ops::RangeInclusive};

/// Puzzle difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Difficulty {
    /// The easiest level.
    #[default]
    Easy,
    /// Medium difficulty.
    Medium,
    /// Hard difficulty.
    Hard,
    /// The hardest level.
    Expert,
}

/// Positional removal weights for a difficulty level.
///
/// Each weight biases cell-removal priority scoring toward a region of the
/// board. The weights are additive with a random jitter term, so no single
/// weight dominates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovalStrategy {
    /// Weight for cells near the board center.
    pub prefer_center: f64,
    /// Weight for cells in the four corner blocks' corners.
    pub prefer_corners: f64,
    /// Weight for cells on the outer edge.
    pub prefer_edges: f64,
    /// Bonus for removing both cells of a 180°-symmetric pair.
    pub symmetry_bonus: f64,
    /// Weight encouraging removals spread evenly across blocks.
    pub block_distribution: f64,
}

impl Difficulty {
    /// All difficulty levels, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// The range of hint (pre-filled) cells a classic puzzle keeps.
    ///
    /// The removal target is `81 - hints` for a hint count drawn from this
    /// range.
    #[must_use]
    pub const fn classic_hint_range(self) -> RangeInclusive<usize> {
        match self {
            Self::Easy => 46..=53,
            Self::Medium => 36..=44,
            Self::Hard => 28..=35,
            Self::Expert => 22..=27,
        }
    }

    /// The number of hint cells a killer puzzle keeps.
    #[must_use]
    pub const fn killer_hint_keep(self) -> usize {
        match self {
            Self::Easy => 38,
            Self::Medium => 30,
            Self::Hard => 24,
            Self::Expert => 16,
        }
    }

    /// The maximum cage size for killer cage generation.
    #[must_use]
    pub const fn max_cage_size(self) -> usize {
        match self {
            Self::Easy => 4,
            Self::Medium => 5,
            Self::Hard => 6,
            Self::Expert => 7,
        }
    }

    /// The fraction of each cage's cells kept filled by killer removal.
    #[must_use]
    pub const fn killer_keep_fraction(self) -> f64 {
        match self {
            Self::Easy => 0.5,
            Self::Medium => 0.4,
            Self::Hard => 0.3,
            Self::Expert => 0.15,
        }
    }

    /// The number of removal batch attempts killer removal may make.
    #[must_use]
    pub const fn killer_removal_attempts(self) -> usize {
        match self {
            Self::Easy | Self::Medium => 12,
            Self::Hard => 16,
            Self::Expert => 24,
        }
    }

    /// Whether phase-2 classic removal verifies uniqueness.
    ///
    /// Hard and Expert skip verification for speed, accepting a weaker
    /// uniqueness guarantee.
    #[must_use]
    pub const fn verifies_uniqueness(self) -> bool {
        matches!(self, Self::Easy | Self::Medium)
    }

    /// The positional removal weights for this level.
    #[must_use]
    pub const fn removal_strategy(self) -> RemovalStrategy {
        match self {
            Self::Easy => RemovalStrategy {
                prefer_center: 0.2,
                prefer_corners: 0.1,
                prefer_edges: 0.4,
                symmetry_bonus: 0.5,
                block_distribution: 0.3,
            },
            Self::Medium => RemovalStrategy {
                prefer_center: 0.4,
                prefer_corners: 0.3,
                prefer_edges: 0.3,
                symmetry_bonus: 0.4,
                block_distribution: 0.4,
            },
            Self::Hard => RemovalStrategy {
                prefer_center: 0.6,
                prefer_corners: 0.5,
                prefer_edges: 0.2,
                symmetry_bonus: 0.2,
                block_distribution: 0.5,
            },
            Self::Expert => RemovalStrategy {
                prefer_center: 0.8,
                prefer_corners: 0.6,
                prefer_edges: 0.1,
                symmetry_bonus: 0.0,
                block_distribution: 0.6,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_ranges_are_ordered_and_disjoint() {
        // Harder levels keep strictly fewer hints
        for pair in Difficulty::ALL.windows(2) {
            let easier = pair[0].classic_hint_range();
            let harder = pair[1].classic_hint_range();
            assert!(harder.end() < easier.start());
        }
    }

    #[test]
    fn test_easy_removal_target_matches_contract() {
        // Easy removes between 28 and 35 cells inclusive
        let hints = Difficulty::Easy.classic_hint_range();
        assert_eq!(81 - hints.end(), 28);
        assert_eq!(81 - hints.start(), 35);
    }

    #[test]
    fn test_killer_tables_scale_with_difficulty() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[1].killer_hint_keep() < pair[0].killer_hint_keep());
            assert!(pair[1].max_cage_size() >= pair[0].max_cage_size());
            assert!(pair[1].killer_keep_fraction() < pair[0].killer_keep_fraction());
            assert!(pair[1].killer_removal_attempts() >= pair[0].killer_removal_attempts());
        }
    }

    #[test]
    fn test_uniqueness_verification_policy() {
        assert!(Difficulty::Easy.verifies_uniqueness());
        assert!(Difficulty::Medium.verifies_uniqueness());
        assert!(!Difficulty::Hard.verifies_uniqueness());
        assert!(!Difficulty::Expert.verifies_uniqueness());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Expert.to_string(), "expert");
    }
}
