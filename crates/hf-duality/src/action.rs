//! Rolling the duality dice.

use hf_dice::{
    DiceRollRequest, DiceRollResult, DieSpec, ResolvedSeed, SeedDirective, SeedResolver, roll_dice,
};
use serde::{Deserialize, Serialize};

use crate::error::{DualityError, DualityResult};
use crate::outcome::{DUALITY_DIE_SIDES, DualityRules, OutcomeRequest, OutcomeResult};

/// A request to roll Hope and Fear.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DualityRollRequest {
    /// Added to the dice total.
    #[serde(default)]
    pub modifier: i32,
    /// Target the total must meet or exceed.
    #[serde(default)]
    pub difficulty: Option<i32>,
    /// How to pick the seed.
    #[serde(default)]
    pub seed: SeedDirective,
}

/// A rolled and classified duality roll, with the seed that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualityRollResult {
    /// The classified dice.
    pub outcome: OutcomeResult,
    /// Seed and algorithm needed to replay the roll.
    pub seed: ResolvedSeed,
}

/// Rolls duality dice: resolves a seed, draws Hope then Fear, classifies.
#[derive(Debug)]
pub struct DualityRoller {
    rules: DualityRules,
    resolver: SeedResolver,
}

impl DualityRoller {
    /// Create a roller.
    ///
    /// The rules configuration owns the default RNG algorithm: any algorithm
    /// already set on `resolver` is replaced by `rules.config().rng_algorithm`.
    /// Directives that name an algorithm still take precedence per roll.
    pub fn new(rules: DualityRules, resolver: SeedResolver) -> Self {
        let resolver = resolver.algorithm(rules.config().rng_algorithm);
        Self { rules, resolver }
    }

    /// The rules used for classification.
    pub fn rules(&self) -> &DualityRules {
        &self.rules
    }

    /// Roll and classify.
    ///
    /// The difficulty is checked before a seed is resolved, so an invalid
    /// request never consumes a fresh seed.
    pub fn roll(&self, request: &DualityRollRequest) -> DualityResult<DualityRollResult> {
        if let Some(difficulty) = request.difficulty {
            self.rules.check_difficulty(difficulty)?;
        }
        let seed = self.resolver.resolve(&request.seed)?;
        let result = self.roll_with_seed(request.modifier, request.difficulty, &seed)?;

        tracing::debug!(
            seed = seed.seed,
            hope = result.outcome.hope,
            fear = result.outcome.fear,
            outcome = %result.outcome.outcome,
            "duality roll"
        );
        Ok(result)
    }

    /// Roll with an already resolved seed. Identical inputs always produce
    /// identical dice.
    pub fn roll_with_seed(
        &self,
        modifier: i32,
        difficulty: Option<i32>,
        seed: &ResolvedSeed,
    ) -> DualityResult<DualityRollResult> {
        let dice = roll_dice(
            &DiceRollRequest::new(
                vec![
                    DieSpec::single(DUALITY_DIE_SIDES),
                    DieSpec::single(DUALITY_DIE_SIDES),
                ],
                seed.seed,
            )
            .with_algorithm(seed.rng_algorithm),
        )?;
        let (hope, fear) = duality_faces(&dice)?;

        let outcome = self.rules.evaluate(&OutcomeRequest {
            hope,
            fear,
            modifier,
            difficulty,
        })?;

        Ok(DualityRollResult {
            outcome,
            seed: *seed,
        })
    }
}

/// Extract the Hope and Fear faces, in draw order.
fn duality_faces(dice: &DiceRollResult) -> DualityResult<(i32, i32)> {
    let malformed = || DualityError::MalformedRoll {
        faces: dice
            .rolls
            .iter()
            .flat_map(|roll| roll.results.iter().copied())
            .collect(),
    };
    let [hope, fear] = dice.rolls.as_slice() else {
        return Err(malformed());
    };
    let (&[hope], &[fear]) = (hope.results.as_slice(), fear.results.as_slice()) else {
        return Err(malformed());
    };
    Ok((
        i32::try_from(hope).map_err(|_| malformed())?,
        i32::try_from(fear).map_err(|_| malformed())?,
    ))
}
