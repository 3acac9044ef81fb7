//! Outcome classification for duality rolls.
//!
//! Classification follows a fixed priority, first match wins:
//! 1. Hope and Fear tie: critical success, whatever the difficulty.
//! 2. No difficulty: roll with Hope or with Fear, by the higher die.
//! 3. Total meets the difficulty: success with Hope or with Fear.
//! 4. Otherwise: failure with Hope or with Fear.
//!
//! Because ties are taken by rule 1, rules 2-4 only ever compare unequal
//! dice.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::error::{DualityError, DualityResult};

/// Faces on each duality die.
pub const DUALITY_DIE_SIDES: u32 = 12;

const DIE_RANGE: RangeInclusive<i32> = 1..=12;

/// One of the two duality dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DualityDie {
    /// The Hope die.
    Hope,
    /// The Fear die.
    Fear,
}

impl fmt::Display for DualityDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hope => write!(f, "hope"),
            Self::Fear => write!(f, "fear"),
        }
    }
}

/// The classified result of a duality roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// No difficulty; Hope rolled higher.
    RollWithHope,
    /// No difficulty; Fear rolled higher.
    RollWithFear,
    /// Met the difficulty; Hope rolled higher.
    SuccessWithHope,
    /// Met the difficulty; Fear rolled higher.
    SuccessWithFear,
    /// Missed the difficulty; Hope rolled higher.
    FailureWithHope,
    /// Missed the difficulty; Fear rolled higher.
    FailureWithFear,
    /// Hope and Fear tied.
    CriticalSuccess,
}

impl Outcome {
    /// Every outcome in canonical order.
    pub const ALL: [Outcome; 7] = [
        Self::RollWithHope,
        Self::RollWithFear,
        Self::SuccessWithHope,
        Self::SuccessWithFear,
        Self::FailureWithHope,
        Self::FailureWithFear,
        Self::CriticalSuccess,
    ];

    /// Stable code used on the wire and in explain traces.
    pub fn code(self) -> &'static str {
        match self {
            Self::RollWithHope => "ROLL_WITH_HOPE",
            Self::RollWithFear => "ROLL_WITH_FEAR",
            Self::SuccessWithHope => "SUCCESS_WITH_HOPE",
            Self::SuccessWithFear => "SUCCESS_WITH_FEAR",
            Self::FailureWithHope => "FAILURE_WITH_HOPE",
            Self::FailureWithFear => "FAILURE_WITH_FEAR",
            Self::CriticalSuccess => "CRITICAL_SUCCESS",
        }
    }

    /// Returns true for the critical and success variants.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::CriticalSuccess | Self::SuccessWithHope | Self::SuccessWithFear
        )
    }

    /// Returns true for the two failure variants.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::FailureWithHope | Self::FailureWithFear)
    }

    /// Returns true for a critical success.
    pub fn is_critical(self) -> bool {
        self == Self::CriticalSuccess
    }

    /// Returns true if Hope rolled strictly higher.
    pub fn with_hope(self) -> bool {
        matches!(
            self,
            Self::RollWithHope | Self::SuccessWithHope | Self::FailureWithHope
        )
    }

    /// Returns true if Fear rolled strictly higher.
    pub fn with_fear(self) -> bool {
        matches!(
            self,
            Self::RollWithFear | Self::SuccessWithFear | Self::FailureWithFear
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RollWithHope => write!(f, "Roll with Hope"),
            Self::RollWithFear => write!(f, "Roll with Fear"),
            Self::SuccessWithHope => write!(f, "Success with Hope"),
            Self::SuccessWithFear => write!(f, "Success with Fear"),
            Self::FailureWithHope => write!(f, "Failure with Hope"),
            Self::FailureWithFear => write!(f, "Failure with Fear"),
            Self::CriticalSuccess => write!(f, "Critical Success"),
        }
    }
}

/// Known dice values to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRequest {
    /// Hope die, 1-12.
    pub hope: i32,
    /// Fear die, 1-12.
    pub fear: i32,
    /// Added to the dice total.
    #[serde(default)]
    pub modifier: i32,
    /// Target the total must meet or exceed.
    #[serde(default)]
    pub difficulty: Option<i32>,
}

impl OutcomeRequest {
    /// A request with no modifier or difficulty.
    pub fn new(hope: i32, fear: i32) -> Self {
        Self {
            hope,
            fear,
            modifier: 0,
            difficulty: None,
        }
    }

    /// Set the modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

/// A classified duality roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeResult {
    /// Hope die.
    pub hope: i32,
    /// Fear die.
    pub fear: i32,
    /// Modifier applied.
    pub modifier: i32,
    /// Difficulty compared against, if any.
    pub difficulty: Option<i32>,
    /// `hope + fear + modifier`.
    pub total: i64,
    /// Hope and Fear tied.
    pub is_crit: bool,
    /// Whether `total >= difficulty`; present only with a difficulty.
    ///
    /// Computed independently of the crit rule, so a critical success can
    /// still report `Some(false)`.
    pub meets_difficulty: Option<bool>,
    /// The classification.
    pub outcome: Outcome,
}

/// Validates and classifies duality rolls under a [`RulesConfig`].
#[derive(Debug, Clone, Default)]
pub struct DualityRules {
    config: RulesConfig,
}

impl DualityRules {
    /// Create rules with the given configuration.
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Classify known dice values.
    pub fn evaluate(&self, request: &OutcomeRequest) -> DualityResult<OutcomeResult> {
        check_die(DualityDie::Hope, request.hope)?;
        check_die(DualityDie::Fear, request.fear)?;
        if let Some(difficulty) = request.difficulty {
            self.check_difficulty(difficulty)?;
        }

        let total = i64::from(request.hope) + i64::from(request.fear) + i64::from(request.modifier);
        let is_crit = request.hope == request.fear;
        let meets_difficulty = request.difficulty.map(|d| total >= i64::from(d));
        let hope_leads = request.hope > request.fear;

        let outcome = if is_crit {
            Outcome::CriticalSuccess
        } else {
            match meets_difficulty {
                None if hope_leads => Outcome::RollWithHope,
                None => Outcome::RollWithFear,
                Some(true) if hope_leads => Outcome::SuccessWithHope,
                Some(true) => Outcome::SuccessWithFear,
                Some(false) if hope_leads => Outcome::FailureWithHope,
                Some(false) => Outcome::FailureWithFear,
            }
        };

        Ok(OutcomeResult {
            hope: request.hope,
            fear: request.fear,
            modifier: request.modifier,
            difficulty: request.difficulty,
            total,
            is_crit,
            meets_difficulty,
            outcome,
        })
    }

    /// Fail unless `difficulty` lies within the configured bounds.
    pub fn check_difficulty(&self, difficulty: i32) -> DualityResult<()> {
        if self.config.accepts_difficulty(difficulty) {
            Ok(())
        } else {
            Err(DualityError::InvalidDifficulty {
                difficulty,
                min: self.config.min_difficulty,
                max: self.config.max_difficulty,
            })
        }
    }
}

fn check_die(die: DualityDie, value: i32) -> DualityResult<()> {
    if DIE_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(DualityError::InvalidDualityDie { die, value })
    }
}

/// Classify known dice values under the default rules.
pub fn evaluate_outcome(request: &OutcomeRequest) -> DualityResult<OutcomeResult> {
    DualityRules::default().evaluate(request)
}
