use colored::Colorize;
use hf_dice::{
    DiceRollRequest, DiceRollResult, DieSpec, OsSeedSource, ResolvedSeed, SeedDirective,
    SeedResolver, roll_dice,
};
use serde::Serialize;

use super::{CliError, Context, print_json, seed_line};

/// A roll together with the seed metadata needed to replay it.
#[derive(Serialize)]
struct RollReport<'a> {
    result: &'a DiceRollResult,
    seed: &'a ResolvedSeed,
}

pub fn run(
    ctx: &Context,
    dice: &[String],
    seed: Option<u64>,
    algorithm: Option<&str>,
) -> Result<(), CliError> {
    let specs = dice
        .iter()
        .map(|notation| notation.parse::<DieSpec>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut directive = seed.map_or_else(SeedDirective::random, SeedDirective::replay);
    if let Some(id) = algorithm {
        directive = directive.with_algorithm(id);
    }
    let resolved = SeedResolver::with_source(OsSeedSource)
        .algorithm(ctx.config.rng_algorithm)
        .resolve(&directive)?;

    let result = roll_dice(
        &DiceRollRequest::new(specs, resolved.seed).with_algorithm(resolved.rng_algorithm),
    )?;

    if ctx.json {
        return print_json(&RollReport {
            result: &result,
            seed: &resolved,
        });
    }

    for roll in &result.rolls {
        println!("  {roll}");
    }
    println!("  {} {}", "Total:".bold(), result.total.to_string().bold());
    println!("  {}", seed_line(&resolved).dimmed());
    Ok(())
}
