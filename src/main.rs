//! Command-line entry point for the Test P verification harness.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use testp_rs::{harness, ExactPTool, TestPConfig};

/// Test P: verification of PISM's '-hydrology distributed' model against
/// the radially symmetric exact solution.
#[derive(Parser)]
#[command(name = "testp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verification of '-hydrology distributed'", long_about = None)]
struct Cli {
    /// Horizontal grid size; the default corresponds to a 1 km grid
    #[arg(long = "Mx", default_value_t = 51)]
    mx: usize,

    /// Directory containing the pismr executable
    #[arg(long = "pism_path", default_value = ".")]
    pism_path: PathBuf,

    /// MPI launcher prefix for parallel runs, e.g. "mpiexec -n 4"
    #[arg(long)]
    mpiexec: Option<String>,

    /// Path to the exactP evaluator
    #[arg(long = "exact_path", default_value = "./exactP")]
    exact_path: PathBuf,

    /// Keep the generated input, config, and output files
    #[arg(long)]
    keep: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TestPConfig {
        mx: cli.mx,
        pism_path: cli.pism_path,
        mpiexec: cli.mpiexec,
        exact_path: cli.exact_path,
        keep: cli.keep,
        ..TestPConfig::default()
    };
    config.validate().context("bad grid parameters")?;

    let command_line = env::args().collect::<Vec<_>>().join(" ");
    let exact = ExactPTool::new(config.exact_path.clone());

    let drift = harness::run(&config, &exact, &command_line)
        .context("Test P verification run failed")?;

    for entry in &drift {
        println!("{entry}");
    }

    Ok(())
}
