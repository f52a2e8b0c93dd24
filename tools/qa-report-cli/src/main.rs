//! Smart Generation QA command-line driver.

mod commands;

use clap::{Parser, Subcommand};
use qa_common::logging::init_logging;
use qa_common::AppConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qa-report", version, about = "Camera-animation quality analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full scenario corpus through the metric and gate pipeline.
    Report {
        /// Path to the scenario manifest.
        #[arg(long)]
        manifest: PathBuf,

        /// Path to the gate configuration.
        #[arg(long)]
        gates: PathBuf,

        /// Camera sampling rate in Hz.
        #[arg(long, default_value_t = 60.0)]
        sample_rate: f64,

        /// Restrict the run to specific scenario ids (repeatable).
        #[arg(long = "scenario")]
        scenario: Vec<String>,

        /// Write the structured JSON report to this path.
        #[arg(long = "output-json")]
        output_json: Option<PathBuf>,

        /// Write the Markdown report to this path.
        #[arg(long = "output-md")]
        output_md: Option<PathBuf>,

        /// Exit with status 2 if any evaluated scenario's overall verdict is fail.
        #[arg(long)]
        enforce_gates: bool,
    },
    /// Print the resolved default configuration.
    Info,
    /// Write the default configuration to its standard location.
    Init,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose > 0 {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging);

    match cli.command {
        Commands::Report {
            manifest,
            gates,
            sample_rate,
            scenario,
            output_json,
            output_md,
            enforce_gates,
        } => {
            tracing::info!(manifest = %manifest.display(), gates = %gates.display(), "starting report run");
            let outcome = commands::report::run(commands::report::ReportArgs {
                manifest,
                gates,
                sample_rate_hz: sample_rate,
                scenario_filter: scenario,
                output_json,
                output_md,
                enforce_gates,
            })?;
            if outcome.gate_enforced_failure {
                std::process::exit(2);
            }
        }
        Commands::Info => commands::info::run(&config),
        Commands::Init => commands::init::run(&config)?,
    }

    Ok(())
}
