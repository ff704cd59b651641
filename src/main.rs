//! Yield Simulator CLI
//!
//! Command-line interface for running yield projections

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use yield_simulator::report::{
    format_breakdown_table, format_catalog, format_comparison, format_summary, write_breakdown_csv,
};
use yield_simulator::catalog::DEFAULT_CATALOG_PATH;
use yield_simulator::simulation::DEFAULT_FALLBACK_ANNUAL_YIELD;
use yield_simulator::validation::{parse_amount, parse_timeframe, SimulationForm};
use yield_simulator::{EngineConfig, StrategyCatalog, StrategyComparison, YieldSimulationEngine};

#[derive(Parser)]
#[command(name = "yield-sim")]
#[command(about = "Project compounding returns for DeFi yield strategies", long_about = None)]
struct Cli {
    /// Strategy catalog CSV (defaults to data/strategies.csv, then the built-in Sui table)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Annual yield (percent) for strategies missing from the catalog
    #[arg(long, global = true, default_value_t = DEFAULT_FALLBACK_ANNUAL_YIELD)]
    fallback_apy: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation
    Simulate {
        /// Investment amount
        #[arg(short, long)]
        amount: String,

        /// Strategy name (e.g. "Cetus Finance")
        #[arg(short, long)]
        strategy: String,

        /// Horizon in months
        #[arg(short, long, default_value = "12")]
        months: String,

        /// Turn the auto-compound toggle off
        #[arg(long)]
        no_compound: bool,

        /// Write the monthly breakdown to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available strategies
    Strategies {
        #[arg(long)]
        json: bool,
    },
    /// Compare every strategy for the same amount and horizon
    Compare {
        #[arg(short, long)]
        amount: String,

        #[arg(short, long, default_value = "12")]
        months: String,

        #[arg(long)]
        json: bool,
    },
}

fn load_catalog(path: Option<&Path>) -> Result<StrategyCatalog> {
    let shown = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));
    StrategyCatalog::load_or_default(path)
        .with_context(|| format!("loading catalog from {}", shown.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let engine = YieldSimulationEngine::new(
        catalog,
        EngineConfig { fallback_annual_yield: cli.fallback_apy },
    );

    match cli.command {
        Commands::Simulate { amount, strategy, months, no_compound, csv, json } => {
            let form = SimulationForm::new(&amount, &months, &strategy, !no_compound);
            let request = form.validate()?;

            let result = engine.simulate(&request);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_summary(&result));
                println!();
                print!("{}", format_breakdown_table(&result));
            }

            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                write_breakdown_csv(BufWriter::new(file), &result)?;
                eprintln!("Monthly breakdown written to: {}", path.display());
            }
        }
        Commands::Strategies { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(engine.catalog().entries())?);
            } else {
                print!("{}", format_catalog(engine.catalog()));
            }
        }
        Commands::Compare { amount, months, json } => {
            let principal = parse_amount(&amount)?;
            let months = parse_timeframe(&months)?;
            let rows = StrategyComparison::new(&engine).run(principal, months, true);

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("Comparing ${:.2} over {} months\n", principal, months);
                print!("{}", format_comparison(&rows));
            }
        }
    }

    Ok(())
}
