//! A set of digits from 1 to 9, stored as a bitset.

use std::{
    fmt::{self, Debug},
    ops::{BitAnd, BitOr, Not},
};

/// A set of digits in the range 1-9.
///
/// Bits 0-8 of the backing `u16` represent digits 1-9 respectively. Used for
/// cell notes, candidate tracking in the uniqueness solver, and duplicate
/// detection in cages.
///
/// # Examples
///
/// ```
/// use sumgrid_core::DigitSet;
///
/// let mut candidates = DigitSet::FULL;
/// candidates.remove(5);
/// candidates.remove(7);
///
/// assert_eq!(candidates.len(), 7);
/// assert!(!candidates.contains(5));
/// assert!(candidates.contains(1));
///
/// let collected: Vec<u8> = candidates.iter().collect();
/// assert_eq!(collected, vec![1, 2, 3, 4, 6, 8, 9]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u16);

const MASK: u16 = 0x1ff;

const fn bit(digit: u8) -> u16 {
    assert!(digit >= 1 && digit <= 9, "digit must be between 1 and 9");
    1 << (digit - 1)
}

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The set containing all digits 1-9.
    pub const FULL: Self = Self(MASK);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Inserts a digit into the set.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    pub const fn insert(&mut self, digit: u8) {
        self.0 |= bit(digit);
    }

    /// Removes a digit from the set.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    pub const fn remove(&mut self, digit: u8) {
        self.0 &= !bit(digit);
    }

    /// Returns `true` if the set contains the digit.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    #[must_use]
    pub const fn contains(self, digit: u8) -> bool {
        self.0 & bit(digit) != 0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the single digit in the set, or `None` if the set does not
    /// contain exactly one digit.
    #[must_use]
    pub fn as_single(self) -> Option<u8> {
        if self.len() == 1 { self.iter().next() } else { None }
    }

    /// Iterates over the digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&digit| self.contains(digit))
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = u8;
    type IntoIter = Box<dyn Iterator<Item = u8>>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for DigitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for DigitSet {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & MASK)
    }
}

impl Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = DigitSet::new();
        set.insert(1);
        set.insert(9);
        assert!(set.contains(1));
        assert!(set.contains(9));
        assert!(!set.contains(5));
        assert_eq!(set.len(), 2);

        set.remove(1);
        assert!(!set.contains(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    #[should_panic(expected = "digit must be between 1 and 9")]
    fn test_rejects_zero() {
        let mut set = DigitSet::new();
        set.insert(0);
    }

    #[test]
    #[should_panic(expected = "digit must be between 1 and 9")]
    fn test_rejects_ten() {
        let mut set = DigitSet::new();
        set.insert(10);
    }

    #[test]
    fn test_constants() {
        assert_eq!(DigitSet::EMPTY.len(), 0);
        assert_eq!(DigitSet::FULL.len(), 9);
        for digit in 1..=9 {
            assert!(DigitSet::FULL.contains(digit));
        }
    }

    #[test]
    fn test_iteration_order() {
        let set: DigitSet = [9, 1, 5, 3].into_iter().collect();
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, vec![1, 3, 5, 9]);
    }

    #[test]
    fn test_set_operations() {
        let a: DigitSet = [1, 2, 3].into_iter().collect();
        let b: DigitSet = [2, 3, 4].into_iter().collect();

        assert_eq!((a | b).len(), 4);
        assert_eq!((a & b).len(), 2);
        assert_eq!((!a).len(), 6);
        assert_eq!(!(!a), a);
    }

    #[test]
    fn test_as_single() {
        assert_eq!(DigitSet::EMPTY.as_single(), None);
        assert_eq!(DigitSet::FULL.as_single(), None);

        let mut set = DigitSet::new();
        set.insert(7);
        assert_eq!(set.as_single(), Some(7));
    }
}
