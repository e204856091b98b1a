mod calendarific;
mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::build::BuildArgs;

#[derive(Parser)]
#[command(name = "calcomp")]
#[command(about = "Compile holidays and events from many sources into one calendar dataset")]
struct Cli {
    /// Log filter, e.g. "debug" or "calcomp_core=trace". Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full holiday dataset and export it
    Build(BuildArgs),

    /// Show the rule-based holidays computed for one country
    Rules {
        /// ISO 3166 alpha-2 country code
        country: String,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long, default_value = "config")]
        config_dir: PathBuf,
    },

    /// Show Western and Orthodox Easter and the feasts that follow them
    Easter {
        #[arg(long)]
        year: Option<i32>,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Rules {
            country,
            year,
            config_dir,
        } => commands::rules::run(&country, year, &config_dir),
        Commands::Easter { year } => commands::easter::run(year),
    }
}
