//! Seeded rolling of die specifications.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::RngAlgorithm;
use crate::error::{DiceError, DiceResult};
use crate::spec::DieSpec;

/// A request to roll an ordered list of die specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollRequest {
    /// Dice to roll, in order.
    pub dice: Vec<DieSpec>,
    /// Seed for the generator.
    pub seed: i64,
    /// Algorithm that turns the seed into faces.
    #[serde(default)]
    pub algorithm: RngAlgorithm,
}

impl DiceRollRequest {
    /// Create a request using the default algorithm.
    pub fn new(dice: Vec<DieSpec>, seed: i64) -> Self {
        Self {
            dice,
            seed,
            algorithm: RngAlgorithm::default(),
        }
    }

    /// Use a specific algorithm.
    pub fn with_algorithm(mut self, algorithm: RngAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// The faces rolled for one [`DieSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// Number of faces on each die.
    pub sides: u32,
    /// Individual faces in the order they were drawn.
    pub results: Vec<u32>,
    /// Sum of `results`.
    pub total: u64,
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.results.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{}d{} [{}] = {}",
            self.results.len(),
            self.sides,
            values.join(", "),
            self.total
        )
    }
}

/// The outcome of a [`DiceRollRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResult {
    /// One roll per requested spec, in request order.
    pub rolls: Vec<Roll>,
    /// Sum of every roll's total.
    pub total: u64,
    /// Seed the rolls were drawn from.
    pub seed: i64,
    /// Algorithm the rolls were drawn with.
    pub algorithm: RngAlgorithm,
}

/// Roll every spec in `request` from one generator seeded with `request.seed`.
///
/// All specs are validated before anything is drawn, so a failed request
/// never produces a partial result.
pub fn roll_dice(request: &DiceRollRequest) -> DiceResult<DiceRollResult> {
    if request.dice.is_empty() {
        return Err(DiceError::MissingDice);
    }
    if let Some((index, spec)) = request
        .dice
        .iter()
        .enumerate()
        .find(|(_, spec)| !spec.is_valid())
    {
        return Err(DiceError::InvalidDiceSpec {
            index,
            sides: spec.sides,
            count: spec.count,
        });
    }

    let mut rng = request.algorithm.seeded(request.seed);
    let rolls: Vec<Roll> = request
        .dice
        .iter()
        .map(|spec| {
            let results: Vec<u32> = (0..spec.count).map(|_| rng.roll_die(spec.sides)).collect();
            let total = results.iter().map(|&v| u64::from(v)).sum();
            Roll {
                sides: spec.sides,
                results,
                total,
            }
        })
        .collect();
    let total = rolls.iter().map(|r| r.total).sum();

    tracing::trace!(
        seed = request.seed,
        algorithm = %request.algorithm,
        specs = request.dice.len(),
        total,
        "rolled dice"
    );

    Ok(DiceRollResult {
        rolls,
        total,
        seed: request.seed,
        algorithm: request.algorithm,
    })
}
