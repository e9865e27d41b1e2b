mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::cashflow::ScenarioArgs;
use commands::firm::{BookArgs, FirmAnalyticsArgs};
use commands::portfolio::{DecomposeArgs, ImpactArgs};

/// Portfolio market-impact and cash-flow scenario analytics for adviser practices
#[derive(Parser)]
#[command(
    name = "plannetic",
    version,
    about = "Portfolio market-impact and cash-flow scenario analytics",
    long_about = "Classifies client portfolios against current market conditions \
                  (Bank Rate, inflation, FTSE 100), ranks clients needing review, \
                  and derives cash-flow projection parameters from client profiles."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a client's equities/bonds/cash breakdown
    Decompose(DecomposeArgs),
    /// Classify one client's exposure to rates, inflation and equities
    Impact(ImpactArgs),
    /// Firm-wide dashboard: AUM, distributions, clients needing review
    FirmAnalytics(FirmAnalyticsArgs),
    /// Ranked list of clients needing review
    ReviewFlags(BookArgs),
    /// Per-client impact rows for the heat map
    Heatmap(BookArgs),
    /// Derive cash-flow scenario parameters for a client
    Scenario(ScenarioArgs),
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
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Decompose(args) => commands::portfolio::run_decompose(args),
        Commands::Impact(args) => commands::portfolio::run_impact(args),
        Commands::FirmAnalytics(args) => commands::firm::run_firm_analytics(args),
        Commands::ReviewFlags(args) => commands::firm::run_review_flags(args),
        Commands::Heatmap(args) => commands::firm::run_heatmap(args),
        Commands::Scenario(args) => commands::cashflow::run_scenario(args),
        Commands::Version => {
            println!("plannetic {}", env!("CARGO_PKG_VERSION"));
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
