//! ==============================================================================
//! main.rs - weather station entry point
//! ==============================================================================
//!
//! subcommands:
//!     generate  simulate readings and write the csv file
//!     serve     expose the latest reading at GET /latest
//!     plot      render the csv file to an svg chart
//!
//! configuration comes from station.toml (see config.rs); command line
//! flags override it.
//!
//! ==============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use weather_station::config::StationConfig;
use weather_station::server::{self, AppState};
use weather_station::{plot, simulator, store};

#[derive(Parser, Debug)]
#[command(name = "weather-station", version, about = "Synthetic IoT weather sensor data")]
struct Cli {
    /// Path to a station.toml (default: config/station.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate sensor readings and write them to a CSV file
    Generate {
        /// Duration of simulation in minutes
        #[arg(long)]
        duration: Option<u64>,
        /// Interval between readings in seconds
        #[arg(long)]
        interval: Option<u64>,
        /// Path to output CSV file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the latest reading over HTTP
    Serve {
        /// CSV file to read
        #[arg(long)]
        data: Option<PathBuf>,
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
    /// Plot readings to an SVG chart
    Plot {
        /// CSV readings file
        #[arg(long)]
        input: Option<PathBuf>,
        /// Path to save the output plot
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(StationConfig::find);
    let config = match &config_path {
        Some(path) => StationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StationConfig::default(),
    };

    // the log level lives in the config, so logging starts after it loads
    init_logging(&config.logging.level);
    match &config_path {
        Some(path) => tracing::info!("[CONFIG] Loaded from {}", path.display()),
        None => tracing::info!("[CONFIG] No config file found - using defaults"),
    }
    config.log_summary();

    match cli.command {
        Command::Generate { duration, interval, output, seed } => {
            let mut params = config.simulation.params();
            if let Some(d) = duration {
                params.duration_minutes = d;
            }
            if let Some(i) = interval {
                params.interval_seconds = i;
            }
            if seed.is_some() {
                params.seed = seed;
            }
            let output = output.unwrap_or(config.data.path);

            let readings = simulator::simulate(&params)?;
            simulator::write_csv(&readings, &output)?;
            tracing::info!("[GENERATE] Generated {} readings to {}", readings.len(), output.display());
        }
        Command::Serve { data, bind } => {
            let state = AppState::new(data.unwrap_or(config.data.path));
            let bind = bind.unwrap_or(config.server.bind);
            tracing::info!("[SERVER] Serving {}", state.data_path.display());
            server::run_server(&bind, state).await?;
        }
        Command::Plot { input, output } => {
            let input = input.unwrap_or(config.data.path);
            let output = output.unwrap_or(config.plot.output);
            let readings = store::load_readings(&input)?;
            plot::render_chart(&readings, &output, (config.plot.width, config.plot.height))
                .with_context(|| format!("plotting {}", input.display()))?;
        }
    }

    Ok(())
}
