//! Error types for duality resolution.

use std::fmt;

use hf_dice::{DiceError, ErrorKind};

use crate::outcome::DualityDie;

/// Errors that can occur while resolving duality rolls.
#[derive(Debug, thiserror::Error)]
pub enum DualityError {
    /// A Hope or Fear value lies outside 1-12.
    #[error("{die} die must be between 1 and 12, got {value}")]
    InvalidDualityDie {
        /// Which die was out of range.
        die: DualityDie,
        /// The value supplied.
        value: i32,
    },

    /// A difficulty lies outside the configured bounds.
    #[error("difficulty {difficulty} must be {}", Bounds(.min, .max))]
    InvalidDifficulty {
        /// The difficulty supplied.
        difficulty: i32,
        /// Lowest accepted difficulty.
        min: i32,
        /// Highest accepted difficulty, if bounded.
        max: Option<i32>,
    },

    /// An explain step could not be converted to its wire form.
    #[error("cannot encode explain step {code}: {reason}")]
    Encoding {
        /// Code of the step that failed.
        code: String,
        /// What could not be represented.
        reason: String,
    },

    /// The dice roller did not return exactly one Hope and one Fear face.
    #[error("expected one Hope and one Fear face, dice roller returned {faces:?}")]
    MalformedRoll {
        /// Every face the roller returned, in draw order.
        faces: Vec<u32>,
    },

    /// Rolling or seed resolution failed.
    #[error(transparent)]
    Dice(#[from] DiceError),
}

impl DualityError {
    /// Classify this error for status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDualityDie { .. } | Self::InvalidDifficulty { .. } => {
                ErrorKind::Validation
            }
            Self::Encoding { .. } | Self::MalformedRoll { .. } => ErrorKind::Internal,
            Self::Dice(e) => e.kind(),
        }
    }

    /// Returns true if the caller can correct the request and try again.
    pub fn is_client_error(&self) -> bool {
        self.kind().is_client_error()
    }
}

struct Bounds<'a>(&'a i32, &'a Option<i32>);

impl fmt::Display for Bounds<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.1 {
            Some(max) => write!(f, "between {} and {max}", self.0),
            None => write!(f, "at least {}", self.0),
        }
    }
}

/// Convenience result type for duality operations.
pub type DualityResult<T> = Result<T, DualityError>;
