//! switchboard - run widget scenarios headlessly

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use switchboard_app::{run_loaded_scenario, AppConfig, HeadlessScenario};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(about = "Run declarative widget scenarios against a headless document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario and print its report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Configuration file (switchboard.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
    /// Parse a scenario and validate its selectors without running it
    Check {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Configuration file (switchboard.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            scenario,
            config,
            report,
        } => {
            let passed = run(&scenario, config.as_deref(), report.as_deref())?;
            if !passed {
                std::process::exit(1);
            }
        }
        Command::Check { scenario, config } => check(&scenario, config.as_deref())?,
    }
    Ok(())
}

fn run(scenario_path: &Path, config: Option<&Path>, report_path: Option<&Path>) -> Result<bool> {
    let config = AppConfig::load_or_default(config)?;
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    scenario.validate()?;

    let outcome = run_loaded_scenario(&scenario, &config)?;
    let report = outcome.report();
    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(path)?;
        info!(path = %path.display(), "report written");
    }
    if outcome.is_failed() {
        warn!(
            step = report.failed_step_index,
            message = report.message.as_deref().unwrap_or_default(),
            "scenario failed"
        );
    }
    Ok(!outcome.is_failed())
}

fn check(scenario_path: &Path, config: Option<&Path>) -> Result<()> {
    AppConfig::load_or_default(config)?;
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    scenario.validate()?;
    println!(
        "{}: {} elements, {} steps ok",
        scenario_path.display(),
        scenario.document.len(),
        scenario.steps.len()
    );
    Ok(())
}
