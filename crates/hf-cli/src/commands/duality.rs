use colored::Colorize;
use hf_dice::{OsSeedSource, SeedDirective, SeedResolver};
use hf_duality::{DualityRollRequest, DualityRoller};

use super::{CliError, Context, colorize_outcome, print_json, seed_line, signed};

pub fn run(
    ctx: &Context,
    modifier: i32,
    difficulty: Option<i32>,
    seed: Option<u64>,
    algorithm: Option<&str>,
) -> Result<(), CliError> {
    let mut directive = seed.map_or_else(SeedDirective::random, SeedDirective::replay);
    if let Some(id) = algorithm {
        directive = directive.with_algorithm(id);
    }

    let roller = DualityRoller::new(ctx.rules(), SeedResolver::with_source(OsSeedSource));
    let result = roller.roll(&DualityRollRequest {
        modifier,
        difficulty,
        seed: directive,
    })?;

    if ctx.json {
        return print_json(&result);
    }

    let r = &result.outcome;
    println!(
        "  {} {}  {} {}  {} = {}",
        "Hope".cyan().bold(),
        r.hope,
        "Fear".magenta().bold(),
        r.fear,
        signed(r.modifier),
        r.total.to_string().bold()
    );
    if let (Some(difficulty), Some(meets)) = (r.difficulty, r.meets_difficulty) {
        let verdict = if meets { "meets" } else { "misses" };
        println!("  {verdict} difficulty {difficulty}");
    }
    println!("  {}", colorize_outcome(r.outcome));
    println!(
        "  {}",
        format!("{} (replay with --seed {})", seed_line(&result.seed), result.seed.seed).dimmed()
    );
    Ok(())
}
