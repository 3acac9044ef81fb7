//! Seed resolution.
//!
//! Each roll either replays a seed the caller supplied or asks an injected
//! [`SeedSource`] for a fresh one. The resulting [`ResolvedSeed`] records
//! where the seed came from and which algorithm it is meant for, so a roll
//! can be reproduced later.

use std::error::Error;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithm::RngAlgorithm;
use crate::error::{DiceError, DiceResult};

/// Error type returned by seed sources.
pub type SeedSourceError = Box<dyn Error + Send + Sync>;

/// How the caller wants the seed chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollMode {
    /// No mode given; treated like [`RollMode::Random`].
    #[default]
    Unspecified,
    /// Draw a fresh seed.
    Random,
    /// Reuse the seed supplied by the caller.
    Replay,
}

impl RollMode {
    /// Returns true for [`RollMode::Replay`].
    pub fn is_replay(self) -> bool {
        self == Self::Replay
    }
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            Self::Random => write!(f, "random"),
            Self::Replay => write!(f, "replay"),
        }
    }
}

/// Where a resolved seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeedSourceKind {
    /// Supplied by the caller for a replay.
    ClientSupplied,
    /// Drawn from the configured seed source.
    ServerGenerated,
}

impl fmt::Display for SeedSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientSupplied => write!(f, "client"),
            Self::ServerGenerated => write!(f, "server"),
        }
    }
}

/// The caller's seed instructions for one roll.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeedDirective {
    /// Seed to replay, in its wire width.
    pub explicit_seed: Option<u64>,
    /// Requested roll mode.
    #[serde(default)]
    pub roll_mode: RollMode,
    /// Algorithm ID recorded with the original roll, if replaying one.
    #[serde(default)]
    pub rng_algorithm: Option<String>,
}

impl SeedDirective {
    /// A directive asking for a fresh seed.
    pub fn random() -> Self {
        Self {
            roll_mode: RollMode::Random,
            ..Self::default()
        }
    }

    /// A directive replaying `seed`.
    pub fn replay(seed: u64) -> Self {
        Self {
            explicit_seed: Some(seed),
            roll_mode: RollMode::Replay,
            rng_algorithm: None,
        }
    }

    /// Pin the algorithm by ID.
    pub fn with_algorithm(mut self, id: impl Into<String>) -> Self {
        self.rng_algorithm = Some(id.into());
        self
    }
}

/// A seed ready to drive a roll, with enough metadata to replay it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSeed {
    /// The seed value.
    pub seed: i64,
    /// Where the seed came from.
    pub seed_source: SeedSourceKind,
    /// Mode the caller asked for.
    pub roll_mode: RollMode,
    /// Algorithm the seed is meant for.
    pub rng_algorithm: RngAlgorithm,
}

impl ResolvedSeed {
    /// A directive that replays this seed with the same algorithm.
    ///
    /// Returns `None` for negative seeds, which cannot be carried in the
    /// unsigned wire field; callers replay those through
    /// [`ResolvedSeed`] directly.
    pub fn replay_directive(&self) -> Option<SeedDirective> {
        let seed = u64::try_from(self.seed).ok()?;
        Some(SeedDirective::replay(seed).with_algorithm(self.rng_algorithm.id()))
    }
}

/// A capability that produces fresh seeds.
///
/// Thread safety of the underlying source is the implementor's concern.
pub trait SeedSource: Send + Sync {
    /// Produce a new seed.
    fn next_seed(&self) -> Result<i64, SeedSourceError>;
}

impl<F> SeedSource for F
where
    F: Fn() -> Result<i64, SeedSourceError> + Send + Sync,
{
    fn next_seed(&self) -> Result<i64, SeedSourceError> {
        self()
    }
}

/// Always yields the same seed. Useful in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeedSource(pub i64);

impl SeedSource for FixedSeedSource {
    fn next_seed(&self) -> Result<i64, SeedSourceError> {
        Ok(self.0)
    }
}

/// Draws non-negative seeds from the operating system's entropy via the
/// thread-local generator.
///
/// Seeds stay non-negative so that they fit the unsigned replay field.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn next_seed(&self) -> Result<i64, SeedSourceError> {
        Ok(rand::rng().random_range(0..=i64::MAX))
    }
}

/// Decides which seed a roll uses.
pub struct SeedResolver {
    source: Option<Box<dyn SeedSource>>,
    is_replay: fn(RollMode) -> bool,
    algorithm: RngAlgorithm,
}

impl fmt::Debug for SeedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedResolver")
            .field("has_source", &self.source.is_some())
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Default for SeedResolver {
    fn default() -> Self {
        Self {
            source: None,
            is_replay: RollMode::is_replay,
            algorithm: RngAlgorithm::default(),
        }
    }
}

impl SeedResolver {
    /// Create a resolver with no seed source; only replays will resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver drawing fresh seeds from `source`.
    pub fn with_source(source: impl SeedSource + 'static) -> Self {
        Self::default().source(source)
    }

    /// Set the seed source.
    pub fn source(mut self, source: impl SeedSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Override the predicate that decides whether a mode is a replay.
    pub fn replay_predicate(mut self, is_replay: fn(RollMode) -> bool) -> Self {
        self.is_replay = is_replay;
        self
    }

    /// Set the algorithm used when a directive does not name one.
    pub fn algorithm(mut self, algorithm: RngAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// The algorithm used when a directive does not name one.
    pub fn default_algorithm(&self) -> RngAlgorithm {
        self.algorithm
    }

    /// Resolve the seed for one roll.
    pub fn resolve(&self, directive: &SeedDirective) -> DiceResult<ResolvedSeed> {
        let rng_algorithm = match &directive.rng_algorithm {
            Some(id) => RngAlgorithm::from_id(id)?,
            None => self.algorithm,
        };

        let (seed, seed_source) = if (self.is_replay)(directive.roll_mode) {
            let seed = directive
                .explicit_seed
                .and_then(|seed| i64::try_from(seed).ok())
                .ok_or_else(|| DiceError::SeedOutOfRange(directive.explicit_seed))?;
            (seed, SeedSourceKind::ClientSupplied)
        } else {
            let Some(source) = &self.source else {
                tracing::error!("fresh seed requested but no seed source is configured");
                return Err(DiceError::SeedGeneratorUnavailable);
            };
            let seed = source.next_seed().map_err(|e| {
                tracing::warn!(error = %e, "seed source failed");
                DiceError::SeedSource(e)
            })?;
            (seed, SeedSourceKind::ServerGenerated)
        };

        tracing::debug!(
            seed,
            source = %seed_source,
            mode = %directive.roll_mode,
            algorithm = %rng_algorithm,
            "resolved seed"
        );

        Ok(ResolvedSeed {
            seed,
            seed_source,
            roll_mode: directive.roll_mode,
            rng_algorithm,
        })
    }
}
