mod locate;
mod spin;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lunchwheel_core::SearchRadius;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lunchwheel")]
#[command(about = "Spin a wheel of nearby restaurants to decide where to eat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List locations matching an address or keyword
    Search {
        /// Address, station or landmark to look up
        query: String,
    },
    /// Pick a location, gather restaurants around it and spin the wheel
    Spin {
        /// Address, station or landmark to search around
        query: String,
        /// Which location result to use (1-based)
        #[arg(long, default_value = "1")]
        pick: usize,
        /// Walking radius in metres: 400, 800 or 1200
        #[arg(long, value_parser = parse_radius)]
        radius: Option<SearchRadius>,
        /// Seed for a reproducible draw and spin
        #[arg(long)]
        seed: Option<u64>,
        /// Write the final wheel as SVG to this path
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Show the restaurant pool for a location and one sampled wheel
    Candidates {
        /// Address, station or landmark to search around
        query: String,
        /// Which location result to use (1-based)
        #[arg(long, default_value = "1")]
        pick: usize,
        /// Walking radius in metres: 400, 800 or 1200
        #[arg(long, value_parser = parse_radius)]
        radius: Option<SearchRadius>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_radius(value: &str) -> Result<SearchRadius, String> {
    let meters: u32 = value
        .trim()
        .trim_end_matches('m')
        .parse()
        .map_err(|_| format!("'{value}' is not a number of metres"))?;
    SearchRadius::from_meters(meters)
        .ok_or_else(|| format!("radius must be 400, 800 or 1200 (got {meters})"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = lunchwheel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let source = locate::place_source(&config);

    match cli.command {
        Some(Commands::Search { query }) => {
            locate::run_search(&config, source.as_ref(), &query).await?;
        }
        Some(Commands::Spin {
            query,
            pick,
            radius,
            seed,
            svg,
        }) => {
            let radius = radius.unwrap_or(config.search_radius);
            spin::run_spin(
                &config,
                source.as_ref(),
                &spin::SpinArgs {
                    query,
                    pick,
                    radius,
                    seed,
                    svg,
                },
            )
            .await?;
        }
        Some(Commands::Candidates {
            query,
            pick,
            radius,
            seed,
        }) => {
            let radius = radius.unwrap_or(config.search_radius);
            spin::run_candidates(&config, source.as_ref(), &query, pick, radius, seed).await?;
        }
        None => println!("nothing to do; try `lunchwheel spin <place>`"),
    }

    Ok(())
}
