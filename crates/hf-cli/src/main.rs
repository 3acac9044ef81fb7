//! CLI frontend for the Hope/Fear duality dice engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use commands::Context;
use hf_duality::config::DEFAULT_MIN_DIFFICULTY;

#[derive(Parser)]
#[command(
    name = "hf",
    about = "Roll, explain, and tabulate Hope/Fear duality dice",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print results as pretty JSON
    #[arg(long, global = true)]
    json: bool,

    /// Lowest accepted difficulty
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MIN_DIFFICULTY,
        allow_negative_numbers = true
    )]
    min_difficulty: i32,

    /// Highest accepted difficulty (unbounded if omitted)
    #[arg(long, global = true, allow_negative_numbers = true)]
    max_difficulty: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll arbitrary dice, e.g. `hf roll 2d6 1d8`
    Roll {
        /// Dice in NdS notation (`d20` means one die)
        #[arg(required = true)]
        dice: Vec<String>,

        /// Replay with this seed instead of drawing a fresh one
        #[arg(short, long)]
        seed: Option<u64>,

        /// RNG algorithm identifier
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Roll the Hope and Fear dice and classify the result
    Duality {
        /// Added to the dice total
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,

        /// Target the total must meet or exceed
        #[arg(short, long, allow_negative_numbers = true)]
        difficulty: Option<i32>,

        /// Replay with this seed instead of drawing a fresh one
        #[arg(short, long)]
        seed: Option<u64>,

        /// RNG algorithm identifier
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Classify Hope and Fear values you already rolled
    Outcome {
        /// Value shown on the Hope die
        #[arg(allow_negative_numbers = true)]
        hope: i32,

        /// Value shown on the Fear die
        #[arg(allow_negative_numbers = true)]
        fear: i32,

        /// Added to the dice total
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,

        /// Target the total must meet or exceed
        #[arg(short, long, allow_negative_numbers = true)]
        difficulty: Option<i32>,

        /// Show each step of the classification
        #[arg(short, long)]
        explain: bool,
    },

    /// Show the outcome distribution for a modifier and difficulty
    Odds {
        /// Target the total must meet or exceed
        #[arg(short, long, allow_negative_numbers = true)]
        difficulty: i32,

        /// Added to the dice total
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let ctx = Context::new(cli.json, cli.min_difficulty, cli.max_difficulty);

    let result = match cli.command {
        Commands::Roll {
            dice,
            seed,
            algorithm,
        } => commands::roll::run(&ctx, &dice, seed, algorithm.as_deref()),
        Commands::Duality {
            modifier,
            difficulty,
            seed,
            algorithm,
        } => commands::duality::run(&ctx, modifier, difficulty, seed, algorithm.as_deref()),
        Commands::Outcome {
            hope,
            fear,
            modifier,
            difficulty,
            explain,
        } => commands::outcome::run(&ctx, hope, fear, modifier, difficulty, explain),
        Commands::Odds {
            difficulty,
            modifier,
        } => commands::odds::run(&ctx, modifier, difficulty),
    };

    if let Err(e) = result {
        let code = e.exit_code();
        tracing::debug!(code, error = ?e, "command failed");
        eprintln!("error: {e}");
        process::exit(code);
    }
}
