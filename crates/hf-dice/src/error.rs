//! Error types for dice rolling and seed resolution.

use crate::seed::SeedSourceError;

/// How an error should be reported to whoever made the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request itself was wrong; safe to show the caller verbatim.
    Validation,
    /// The host wired the engine incorrectly.
    Configuration,
    /// Something failed inside the engine or one of its collaborators.
    Internal,
}

impl ErrorKind {
    /// Returns true if the caller can correct the request and try again.
    pub fn is_client_error(self) -> bool {
        self == Self::Validation
    }
}

/// Errors that can occur while rolling dice or resolving seeds.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// A roll request did not name any dice.
    #[error("at least one die specification is required")]
    MissingDice,

    /// A die specification has zero sides or a zero count.
    #[error("invalid die specification at position {index}: {count}d{sides}")]
    InvalidDiceSpec {
        /// Position of the offending spec in the request.
        index: usize,
        /// Number of sides requested.
        sides: u32,
        /// Number of dice requested.
        count: u32,
    },

    /// Dice notation could not be parsed.
    #[error("invalid dice notation: {0}")]
    InvalidNotation(String),

    /// A replay was requested without a seed that fits a signed 64-bit integer.
    #[error("replay seed {} is out of range", describe_seed(.0))]
    SeedOutOfRange(Option<u64>),

    /// The named RNG algorithm is not known to this engine.
    #[error("unknown rng algorithm: {0}")]
    UnknownRngAlgorithm(String),

    /// A fresh seed was needed but no seed source is configured.
    #[error("seed generator is not configured")]
    SeedGeneratorUnavailable,

    /// The configured seed source failed.
    #[error("seed source failed: {0}")]
    SeedSource(#[source] SeedSourceError),
}

impl DiceError {
    /// Classify this error for status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDice
            | Self::InvalidDiceSpec { .. }
            | Self::InvalidNotation(_)
            | Self::SeedOutOfRange(_)
            | Self::UnknownRngAlgorithm(_) => ErrorKind::Validation,
            Self::SeedGeneratorUnavailable => ErrorKind::Configuration,
            Self::SeedSource(_) => ErrorKind::Internal,
        }
    }

    /// Returns true if the caller can correct the request and try again.
    pub fn is_client_error(&self) -> bool {
        self.kind().is_client_error()
    }
}

fn describe_seed(seed: &Option<u64>) -> String {
    match seed {
        Some(seed) => seed.to_string(),
        None => "(missing)".to_string(),
    }
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        assert!(DiceError::MissingDice.is_client_error());
        assert!(
            DiceError::InvalidDiceSpec {
                index: 0,
                sides: 0,
                count: 1
            }
            .is_client_error()
        );
        assert!(DiceError::SeedOutOfRange(None).is_client_error());
        assert!(DiceError::UnknownRngAlgorithm("mt19937".into()).is_client_error());
    }

    #[test]
    fn wiring_faults_are_server_errors() {
        assert_eq!(
            DiceError::SeedGeneratorUnavailable.kind(),
            ErrorKind::Configuration
        );
        let err = DiceError::SeedSource("entropy exhausted".into());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_client_error());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            DiceError::InvalidDiceSpec {
                index: 1,
                sides: 0,
                count: 2
            }
            .to_string(),
            "invalid die specification at position 1: 2d0"
        );
        assert_eq!(
            DiceError::SeedOutOfRange(Some(u64::MAX)).to_string(),
            "replay seed 18446744073709551615 is out of range"
        );
        assert_eq!(
            DiceError::SeedOutOfRange(None).to_string(),
            "replay seed (missing) is out of range"
        );
    }
}
