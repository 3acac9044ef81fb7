//! Die specifications.
//!
//! A [`DieSpec`] names how many dice of a given size to roll. The textual
//! form follows the usual `NdS` notation: `"2d6"`, `"1d12"`, or `"d20"` as
//! shorthand for a single die.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// One entry of a roll request: `count` dice with `sides` faces each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DieSpec {
    /// Number of faces on each die.
    pub sides: u32,
    /// Number of dice to roll.
    pub count: u32,
}

impl DieSpec {
    /// Create a spec for `count` dice with `sides` faces.
    pub fn new(sides: u32, count: u32) -> Self {
        Self { sides, count }
    }

    /// A spec for a single die.
    pub fn single(sides: u32) -> Self {
        Self::new(sides, 1)
    }

    /// Returns true if both sides and count are positive.
    pub fn is_valid(&self) -> bool {
        self.sides > 0 && self.count > 0
    }
}

impl FromStr for DieSpec {
    type Err = DiceError;

    /// Parse `NdS` notation. Zero values parse; they are rejected when rolled.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim().to_lowercase();
        let invalid = || DiceError::InvalidNotation(s.trim().to_string());

        let (count, sides) = notation.split_once('d').ok_or_else(invalid)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid())?
        };
        let sides = sides.parse::<u32>().map_err(|_| invalid())?;

        Ok(Self { sides, count })
    }
}

impl fmt::Display for DieSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_notation() {
        assert_eq!("2d6".parse::<DieSpec>().unwrap(), DieSpec::new(6, 2));
        assert_eq!("1D12".parse::<DieSpec>().unwrap(), DieSpec::new(12, 1));
        assert_eq!(" d20 ".parse::<DieSpec>().unwrap(), DieSpec::single(20));
    }

    #[test]
    fn parse_keeps_zero_values_for_validation() {
        let spec: DieSpec = "0d6".parse().unwrap();
        assert!(!spec.is_valid());
        let spec: DieSpec = "3d0".parse().unwrap();
        assert!(!spec.is_valid());
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "d", "2d", "six", "2x6", "-1d6", "2d6+1"] {
            let err = bad.parse::<DieSpec>().unwrap_err();
            assert!(matches!(err, DiceError::InvalidNotation(_)), "{bad}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(DieSpec::new(8, 1).to_string(), "1d8");
        assert_eq!(DieSpec::new(12, 2).to_string(), "2d12");
    }

    #[test]
    fn validity() {
        assert!(DieSpec::new(6, 2).is_valid());
        assert!(!DieSpec::new(0, 1).is_valid());
        assert!(!DieSpec::new(6, 0).is_valid());
    }
}
