//! # accrual-chart
//!
//! Compare accrual frequencies of a simulated lending market.
//!
//! ```bash
//! # Show compounds.json in a window
//! accrual-chart
//!
//! # Write PNG and CSV instead
//! accrual-chart plot runs.json --png out/runs.png --csv out/runs.csv
//!
//! # Regenerate the runs document
//! accrual-chart simulate compounds.json --weeks 10 --initial-rate 2
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use accrual_chart::config::Config;
use accrual_chart::simulate::simulate;
use accrual_chart::{CsvFile, PngFile, Present};

/// Render accrual simulation runs as a comparison chart
#[derive(Parser)]
#[command(name = "accrual-chart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Defaults to `plot compounds.json`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot a runs document
    Plot(PlotArgs),

    /// Simulate accrual runs and write the runs document
    Simulate {
        /// Output JSON path
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Simulated duration in weeks
        #[arg(long)]
        weeks: Option<u64>,

        /// Initial yearly rate at target (2 = 200%)
        #[arg(long)]
        initial_rate: Option<f64>,
    },
}

#[derive(Args, Default)]
struct PlotArgs {
    /// Runs document (JSON)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write the chart as PNG
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Write the plotted points as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Theme preset (light, dark)
    #[arg(long)]
    theme: Option<String>,

    /// Surface width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Do not open the interactive window
    #[arg(long)]
    no_window: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command.unwrap_or_else(|| Commands::Plot(PlotArgs::default())) {
        Commands::Plot(args) => run_plot(args, &config),
        Commands::Simulate { output, weeks, initial_rate } => {
            run_simulate(output, weeks, initial_rate, &config)
        }
    }
}

fn run_plot(args: PlotArgs, config: &Config) -> Result<()> {
    let opts = config.chart.render_options(args.theme.as_deref(), args.width, args.height)?;
    let targets = config.plot.targets(args.input, args.png, args.csv, args.no_window);

    let mut presenters: Vec<Box<dyn Present>> = Vec::new();
    if let Some(path) = targets.csv {
        presenters.push(Box::new(CsvFile::new(path)));
    }
    if let Some(path) = targets.png {
        presenters.push(Box::new(PngFile::new(path)));
    }
    if targets.window {
        push_window(&mut presenters);
    }
    if presenters.is_empty() {
        warn!("no output selected; nothing will be shown");
    }

    accrual_chart::render(&targets.input, &opts, &mut presenters)?;
    Ok(())
}

#[cfg(feature = "window")]
fn push_window(targets: &mut Vec<Box<dyn Present>>) {
    targets.push(Box::new(accrual_chart::Window::default()));
}

#[cfg(not(feature = "window"))]
fn push_window(targets: &mut Vec<Box<dyn Present>>) {
    let fallback = PathBuf::from("target/out/compounds.png");
    warn!("built without the `window` feature; writing {} instead", fallback.display());
    targets.push(Box::new(PngFile::new(fallback)));
}

fn run_simulate(
    output: Option<PathBuf>,
    weeks: Option<u64>,
    initial_rate: Option<f64>,
    config: &Config,
) -> Result<()> {
    let (params, output) = config.simulate.resolve(output, weeks, initial_rate);
    let doc = simulate(&params)?;
    std::fs::write(&output, doc.to_json()?)?;
    info!("Wrote {} run(s) to {}", doc.runs.len(), output.display());
    Ok(())
}
