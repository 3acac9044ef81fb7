pub mod duality;
pub mod odds;
pub mod outcome;
pub mod roll;

use colored::{ColoredString, Colorize};
use hf_dice::{DiceError, ErrorKind, ResolvedSeed};
use hf_duality::{DualityError, DualityRules, Outcome, RulesConfig};
use serde::Serialize;

/// Failure of a single command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error(transparent)]
    Duality(#[from] DualityError),

    #[error("cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// 1 for requests the user can fix, 2 for everything else.
    pub fn exit_code(&self) -> i32 {
        let kind = match self {
            Self::Dice(e) => e.kind(),
            Self::Duality(e) => e.kind(),
            Self::Json(_) => ErrorKind::Internal,
        };
        if kind.is_client_error() { 1 } else { 2 }
    }
}

/// Settings shared by every subcommand.
pub struct Context {
    pub json: bool,
    pub config: RulesConfig,
}

impl Context {
    pub fn new(json: bool, min_difficulty: i32, max_difficulty: Option<i32>) -> Self {
        Self {
            json,
            config: RulesConfig::default()
                .with_min_difficulty(min_difficulty)
                .with_max_difficulty(max_difficulty),
        }
    }

    pub fn rules(&self) -> DualityRules {
        DualityRules::new(self.config.clone())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn colorize_outcome(outcome: Outcome) -> ColoredString {
    let label = outcome.to_string();
    if outcome.is_critical() {
        label.green().bold()
    } else if outcome.is_success() {
        label.green()
    } else if outcome.is_failure() {
        label.red()
    } else if outcome.with_hope() {
        label.cyan()
    } else {
        label.magenta()
    }
}

fn seed_line(seed: &ResolvedSeed) -> String {
    format!(
        "seed {} ({}, {}, {})",
        seed.seed, seed.rng_algorithm, seed.seed_source, seed.roll_mode
    )
}

fn signed(n: i32) -> String {
    if n < 0 {
        format!("- {}", n.unsigned_abs())
    } else {
        format!("+ {n}")
    }
}
