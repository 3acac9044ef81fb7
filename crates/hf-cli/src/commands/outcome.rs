use colored::Colorize;
use hf_duality::{OutcomeRequest, OutcomeResult};

use super::{CliError, Context, colorize_outcome, print_json, signed};

pub fn run(
    ctx: &Context,
    hope: i32,
    fear: i32,
    modifier: i32,
    difficulty: Option<i32>,
    explain: bool,
) -> Result<(), CliError> {
    let request = OutcomeRequest {
        hope,
        fear,
        modifier,
        difficulty,
    };
    let rules = ctx.rules();

    if explain {
        let explained = rules.explain(&request)?;
        if ctx.json {
            return print_json(&explained);
        }
        print_summary(&explained.result);
        println!();
        println!(
            "  {} {}",
            "Steps".bold().underline(),
            format!("(rules {})", explained.rules_version).dimmed()
        );
        for (i, step) in explained.steps.iter().enumerate() {
            println!(
                "  {}. {} {}",
                i + 1,
                step.message,
                format!("[{}]", step.code).dimmed()
            );
        }
        return Ok(());
    }

    let result = rules.evaluate(&request)?;
    if ctx.json {
        return print_json(&result);
    }
    print_summary(&result);
    Ok(())
}

fn print_summary(r: &OutcomeResult) {
    println!(
        "  Hope {} + Fear {} {} = {}",
        r.hope,
        r.fear,
        signed(r.modifier),
        r.total.to_string().bold()
    );
    println!("  {}", colorize_outcome(r.outcome));
}
