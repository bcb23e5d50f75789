//! Reproducible puzzle seeds.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 256-bit puzzle seed.
///
/// Every puzzle is fully determined by its seed and difficulty, so a seed is
/// enough to reproduce a puzzle for bug reports, benchmarks, or sharing.
/// Seeds round-trip through a 64-character hex string and can also be derived
/// from an arbitrary phrase.
///
/// # Examples
///
/// ```
/// use sumgrid_generator::PuzzleSeed;
///
/// let seed: PuzzleSeed =
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
///         .parse()
///         .unwrap();
/// assert_eq!(seed.to_string().len(), 64);
///
/// let phrase_seed = PuzzleSeed::from_phrase("daily puzzle 2026-08-29");
/// assert_eq!(phrase_seed, PuzzleSeed::from_phrase("daily puzzle 2026-08-29"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

/// Error returned when parsing a [`PuzzleSeed`] from a hex string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseSeedError {
    /// The string is not exactly 64 characters long.
    #[display("expected 64 hex characters, found {found}")]
    WrongLength {
        /// Number of characters found.
        found: usize,
    },
    /// The string contains a non-hex character.
    #[display("invalid hex character {found:?}")]
    InvalidCharacter {
        /// The offending character.
        found: char,
    },
}

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a seed from fresh OS entropy.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::rng().random())
    }

    /// Derives a seed from an arbitrary phrase via SHA-256.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Builds the deterministic RNG driving generation for this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != 64 {
            return Err(ParseSeedError::WrongLength {
                found: s.chars().count(),
            });
        }
        if let Some(found) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidCharacter { found });
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .expect("validated hex digits");
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let seed = PuzzleSeed::from_bytes([0xab; 32]);
        let hex = seed.to_string();
        assert_eq!(hex, "ab".repeat(32));
        assert_eq!(hex.parse::<PuzzleSeed>().unwrap(), seed);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "ab".parse::<PuzzleSeed>(),
            Err(ParseSeedError::WrongLength { found: 2 })
        );
        let s = format!("g{}", "0".repeat(63));
        assert_eq!(
            s.parse::<PuzzleSeed>(),
            Err(ParseSeedError::InvalidCharacter { found: 'g' })
        );
    }

    #[test]
    fn test_phrase_is_deterministic() {
        let a = PuzzleSeed::from_phrase("hello");
        let b = PuzzleSeed::from_phrase("hello");
        let c = PuzzleSeed::from_phrase("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rng_is_deterministic() {
        use rand::Rng as _;
        let seed = PuzzleSeed::from_phrase("rng");
        let a: u64 = seed.rng().random();
        let b: u64 = seed.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(PuzzleSeed::random(), PuzzleSeed::random());
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn any_seed_round_trips_through_hex(bytes in proptest::array::uniform32(any::<u8>())) {
                let seed = PuzzleSeed::from_bytes(bytes);
                prop_assert_eq!(seed.to_string().parse::<PuzzleSeed>().unwrap(), seed);
            }
        }
    }
}
