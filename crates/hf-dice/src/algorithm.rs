//! Pinned pseudo-random algorithms.
//!
//! Every [`RngAlgorithm`] has a stable string ID that is recorded next to
//! each seed. Once an ID has been published, the values it produces for a
//! given seed must never change, so replays stored by callers keep working.
//! A different stream means a new variant with a new ID.
//!
//! For the same reason the seed expansion and the mapping from raw output to
//! die faces live here rather than in helpers whose output may change
//! between `rand` releases. Only the ChaCha keystream itself comes from
//! `rand_chacha`, which guarantees it is value-stable.

use std::fmt;
use std::str::FromStr;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DiceError, DiceResult};

/// A versioned random number algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RngAlgorithm {
    /// ChaCha with 8 rounds, keyed by the seed's little-endian bytes,
    /// faces drawn by rejection sampling over 32-bit outputs.
    #[default]
    ChaCha8V1,
}

impl RngAlgorithm {
    /// Every algorithm this engine can replay.
    pub const ALL: &'static [RngAlgorithm] = &[Self::ChaCha8V1];

    /// The stable identifier recorded alongside seeds.
    pub fn id(self) -> &'static str {
        match self {
            Self::ChaCha8V1 => "chacha8-v1",
        }
    }

    /// Look up an algorithm by its identifier.
    pub fn from_id(id: &str) -> DiceResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|alg| alg.id() == id.trim())
            .ok_or_else(|| DiceError::UnknownRngAlgorithm(id.to_string()))
    }

    /// Create a fresh generator for `seed`.
    pub fn seeded(self, seed: i64) -> DiceRng {
        match self {
            Self::ChaCha8V1 => {
                let mut key = [0u8; 32];
                key[..8].copy_from_slice(&seed.to_le_bytes());
                DiceRng {
                    inner: ChaCha8Rng::from_seed(key),
                }
            }
        }
    }
}

impl fmt::Display for RngAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for RngAlgorithm {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

impl Serialize for RngAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for RngAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Self::from_id(&id).map_err(serde::de::Error::custom)
    }
}

/// A generator instance for a single roll request.
///
/// Created per call from a resolved seed and never shared.
#[derive(Debug, Clone)]
pub struct DiceRng {
    inner: ChaCha8Rng,
}

impl DiceRng {
    /// Draw one face uniformly from `1..=sides`.
    ///
    /// `sides` must be positive; callers validate specs before rolling.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        debug_assert!(sides > 0);
        let sides = u64::from(sides.max(1));
        // Largest multiple of `sides` that fits the 32-bit output range.
        let zone = (1u64 << 32) / sides * sides;
        loop {
            let value = u64::from(self.inner.next_u32());
            if value < zone {
                // `value % sides` < sides <= u32::MAX, so the cast is lossless.
                return (value % sides) as u32 + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for alg in RngAlgorithm::ALL {
            assert_eq!(RngAlgorithm::from_id(alg.id()).unwrap(), *alg);
        }
        assert_eq!(RngAlgorithm::default().id(), "chacha8-v1");
    }

    #[test]
    fn unknown_id() {
        let err = RngAlgorithm::from_id("xorshift-v9").unwrap_err();
        assert!(matches!(err, DiceError::UnknownRngAlgorithm(id) if id == "xorshift-v9"));
    }

    #[test]
    fn serializes_as_id() {
        let json = serde_json::to_string(&RngAlgorithm::ChaCha8V1).unwrap();
        assert_eq!(json, "\"chacha8-v1\"");
        let back: RngAlgorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RngAlgorithm::ChaCha8V1);
        assert!(serde_json::from_str::<RngAlgorithm>("\"nope\"").is_err());
    }

    #[test]
    fn faces_stay_in_range() {
        let mut rng = RngAlgorithm::ChaCha8V1.seeded(7);
        for sides in [1, 2, 6, 12, 20, 100, u32::MAX] {
            for _ in 0..200 {
                let face = rng.roll_die(sides);
                assert!((1..=sides).contains(&face));
            }
        }
    }

    // Recorded replays depend on these exact values. A failure here means
    // the published stream changed and needs a new algorithm ID instead.
    #[test]
    fn chacha8_v1_stream_is_frozen() {
        let mut rng = RngAlgorithm::ChaCha8V1.seeded(42);
        let d20: Vec<u32> = (0..10).map(|_| rng.roll_die(20)).collect();
        assert_eq!(d20, vec![12, 14, 20, 1, 3, 16, 19, 15, 3, 6]);

        let mut rng = RngAlgorithm::ChaCha8V1.seeded(-9000);
        let d100: Vec<u32> = (0..6).map(|_| rng.roll_die(100)).collect();
        assert_eq!(d100, vec![82, 46, 37, 90, 91, 31]);

        let mut rng = RngAlgorithm::ChaCha8V1.seeded(123_456_789);
        assert_eq!((rng.roll_die(12), rng.roll_die(12)), (9, 3));
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngAlgorithm::ChaCha8V1.seeded(-42);
        let mut b = RngAlgorithm::ChaCha8V1.seeded(-42);
        let xs: Vec<u32> = (0..32).map(|_| a.roll_die(12)).collect();
        let ys: Vec<u32> = (0..32).map(|_| b.roll_die(12)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RngAlgorithm::ChaCha8V1.seeded(1);
        let mut b = RngAlgorithm::ChaCha8V1.seeded(2);
        let xs: Vec<u32> = (0..32).map(|_| a.roll_die(100)).collect();
        let ys: Vec<u32> = (0..32).map(|_| b.roll_die(100)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn every_face_of_a_d12_shows_up() {
        let mut rng = RngAlgorithm::ChaCha8V1.seeded(2024);
        let mut seen = [false; 12];
        for _ in 0..1_000 {
            seen[(rng.roll_die(12) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
