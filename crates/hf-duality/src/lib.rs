//! Hope/Fear duality dice resolution.
//!
//! A duality roll throws two d12s, Hope and Fear, adds a modifier and
//! optionally compares the total to a difficulty. This crate classifies the
//! result into one of seven [`Outcome`]s, rolls the dice through
//! [`hf_dice`], explains each classification as an ordered step trace, and
//! tabulates the outcome distribution over all 144 dice combinations.
//!
//! Every entry point classifies through [`DualityRules::evaluate`], so the
//! roll, evaluate, explain and probability paths cannot disagree.

pub mod action;
pub mod config;
pub mod error;
pub mod explain;
pub mod outcome;
pub mod probability;

pub use action::{DualityRollRequest, DualityRollResult, DualityRoller};
pub use config::RulesConfig;
pub use error::{DualityError, DualityResult};
pub use explain::{
    ExplainResult, ExplainStep, Intermediates, RULES_VERSION, StepData, StepValue,
    explain_outcome,
};
pub use outcome::{
    DUALITY_DIE_SIDES, DualityDie, DualityRules, Outcome, OutcomeRequest, OutcomeResult,
    evaluate_outcome,
};
pub use probability::{
    OutcomeCount, ProbabilityRequest, ProbabilityResult, SAMPLE_SPACE, compute_probability,
};
