use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hf_duality::{ProbabilityRequest, SAMPLE_SPACE};

use super::{CliError, Context, print_json, signed};

pub fn run(ctx: &Context, modifier: i32, difficulty: i32) -> Result<(), CliError> {
    let result = ctx.rules().probability(&ProbabilityRequest {
        modifier,
        difficulty,
    })?;

    if ctx.json {
        return print_json(&result);
    }

    println!(
        "  {} {}",
        "Odds".bold(),
        format!("(2d12 {} vs difficulty {difficulty})", signed(modifier)).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Outcome", "Count", "Chance"]);
    for entry in &result.outcome_counts {
        table.add_row(vec![
            entry.outcome.to_string(),
            format!("{}/{SAMPLE_SPACE}", entry.count),
            format!("{:.1}%", entry.probability() * 100.0),
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  Success {}/{}  Failure {}/{}  ({:.1}% to succeed)",
        result.success_count,
        result.total_outcomes,
        result.failure_count,
        result.total_outcomes,
        result.success_chance() * 100.0
    );
    Ok(())
}
