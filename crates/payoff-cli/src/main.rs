mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::plan::{InsightsArgs, PlanArgs};

/// Debt payoff planning with avalanche and snowball strategies
#[derive(Parser)]
#[command(
    name = "payoff",
    version,
    about = "Debt payoff planning with avalanche and snowball strategies",
    long_about = "A CLI that simulates month-by-month debt payoff with decimal precision. \
                  Computes months to debt-free, total interest, per-debt payoff dates, \
                  interest saved against minimum payments, and strategy comparisons."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a payoff plan month by month
    Simulate(PlanArgs),
    /// Compare the plan against paying only the minimums
    Compare(PlanArgs),
    /// Run the same debts under avalanche and snowball
    Strategies(PlanArgs),
    /// Closing dates, extra-payment streak and payoff milestones
    Insights(InsightsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::plan::run_simulate(args),
        Commands::Compare(args) => commands::plan::run_compare(args),
        Commands::Strategies(args) => commands::plan::run_strategies(args),
        Commands::Insights(args) => commands::plan::run_insights(args),
        Commands::Version => {
            println!("payoff {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
