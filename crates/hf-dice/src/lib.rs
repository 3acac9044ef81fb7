//! Seeded dice rolling for the Hope/Fear engine.
//!
//! Provides die specifications, a deterministic roller driven by pinned
//! RNG algorithms, and the seed resolution protocol that decides whether a
//! roll replays a caller-supplied seed or draws a fresh one from an
//! injected [`SeedSource`].

pub mod algorithm;
pub mod error;
pub mod roll;
pub mod seed;
pub mod spec;

pub use algorithm::{DiceRng, RngAlgorithm};
pub use error::{DiceError, DiceResult, ErrorKind};
pub use roll::{DiceRollRequest, DiceRollResult, Roll, roll_dice};
pub use seed::{
    FixedSeedSource, OsSeedSource, ResolvedSeed, RollMode, SeedDirective, SeedResolver,
    SeedSource, SeedSourceError, SeedSourceKind,
};
pub use spec::DieSpec;
