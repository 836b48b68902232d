mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agrimind", about = "On-device farm analytics")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the normalized series, trend signals and advice
    Trends(commands::trends::TrendsArgs),
    /// Train the yield regressor and forecast the next periods
    Forecast(commands::forecast::ForecastArgs),
    /// Split a field image into vigor zones
    Zones(commands::zones::ZonesArgs),
    /// Run live detection over a directory of frames
    Detect(commands::detect::DetectArgs),
    /// Run every analysis and print one combined report
    Report(commands::report::ReportArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Trends(args) => commands::trends::run(args),
        Commands::Forecast(args) => commands::forecast::run(args),
        Commands::Zones(args) => commands::zones::run(args),
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
