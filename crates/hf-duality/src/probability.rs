//! Outcome distribution over every Hope/Fear combination.
//!
//! Walks the full 12x12 sample space through [`DualityRules::evaluate`] and
//! counts outcomes. With a mandatory difficulty the table only ever holds
//! critical, success and failure variants.

use serde::{Deserialize, Serialize};

use crate::error::DualityResult;
use crate::outcome::{DualityRules, Outcome, OutcomeRequest};

/// Number of ordered (Hope, Fear) pairs.
pub const SAMPLE_SPACE: u32 = 144;

/// Fixed modifier and difficulty to tabulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityRequest {
    /// Added to every dice total.
    #[serde(default)]
    pub modifier: i32,
    /// Target every total is compared against.
    pub difficulty: i32,
}

/// How often one outcome occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCount {
    /// The outcome.
    pub outcome: Outcome,
    /// Number of (Hope, Fear) pairs producing it.
    pub count: u32,
}

impl OutcomeCount {
    /// Fraction of the sample space.
    pub fn probability(&self) -> f64 {
        f64::from(self.count) / f64::from(SAMPLE_SPACE)
    }
}

/// The outcome distribution for one modifier/difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    /// Always [`SAMPLE_SPACE`].
    pub total_outcomes: u32,
    /// Ties; always 12.
    pub crit_count: u32,
    /// Critical and success outcomes.
    pub success_count: u32,
    /// Failure outcomes.
    pub failure_count: u32,
    /// Non-zero counts in canonical outcome order.
    pub outcome_counts: Vec<OutcomeCount>,
}

impl ProbabilityResult {
    /// Count for one outcome, zero if it never occurs.
    pub fn count_of(&self, outcome: Outcome) -> u32 {
        self.outcome_counts
            .iter()
            .find(|c| c.outcome == outcome)
            .map_or(0, |c| c.count)
    }

    /// Chance that a roll succeeds, crits included.
    pub fn success_chance(&self) -> f64 {
        f64::from(self.success_count) / f64::from(self.total_outcomes)
    }
}

impl DualityRules {
    /// Tabulate outcomes over all 144 dice combinations.
    pub fn probability(&self, request: &ProbabilityRequest) -> DualityResult<ProbabilityResult> {
        self.check_difficulty(request.difficulty)?;

        let mut counts = [0u32; Outcome::ALL.len()];
        for hope in 1..=12 {
            for fear in 1..=12 {
                let result = self.evaluate(&OutcomeRequest {
                    hope,
                    fear,
                    modifier: request.modifier,
                    difficulty: Some(request.difficulty),
                })?;
                if let Some(slot) = Outcome::ALL.iter().position(|o| *o == result.outcome) {
                    counts[slot] += 1;
                }
            }
        }

        let outcome_counts: Vec<OutcomeCount> = Outcome::ALL
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(&outcome, count)| OutcomeCount { outcome, count })
            .collect();
        let sum_where = |pred: fn(Outcome) -> bool| {
            outcome_counts
                .iter()
                .filter(|c| pred(c.outcome))
                .map(|c| c.count)
                .sum::<u32>()
        };

        Ok(ProbabilityResult {
            total_outcomes: outcome_counts.iter().map(|c| c.count).sum(),
            crit_count: sum_where(Outcome::is_critical),
            success_count: sum_where(Outcome::is_success),
            failure_count: sum_where(Outcome::is_failure),
            outcome_counts,
        })
    }
}

/// Tabulate outcomes under the default rules.
pub fn compute_probability(request: &ProbabilityRequest) -> DualityResult<ProbabilityResult> {
    DualityRules::default().probability(request)
}
