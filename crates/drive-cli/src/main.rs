//! `driveflow`: recorre los asistentes de la app desde la terminal.
//!
//! - `driveflow list`
//! - `driveflow run <flow> --script <actions.json> [--draft-dir DIR] [--submit-url URL]`
//!
//! Sin `--submit-url` (ni `DRIVEFLOW_SUBMIT_URL`) el envío queda en memoria.
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use drive_adapters::flows::{by_name, FLOW_NAMES};
use drive_adapters::{open_flow, submitter_for, AppConfig};
use drive_core::{CollectingNotifier, FlowStatus, StepDefinition};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "driveflow", about = "Run the app's step-by-step flows from a script")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lista los flujos disponibles y sus steps.
    List,
    /// Ejecuta un guion de acciones sobre un flujo.
    Run {
        flow: String,
        #[arg(long)]
        script: PathBuf,
        /// Directorio de borradores; por defecto `DRIVEFLOW_STORAGE_DIR`.
        #[arg(long)]
        draft_dir: Option<PathBuf>,
        /// Endpoint de envío; por defecto `DRIVEFLOW_SUBMIT_URL`.
        #[arg(long)]
        submit_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .init();
    let cli = Cli::parse();
    match cli.command {
        Command::List => list(),
        Command::Run { flow,
                       script,
                       draft_dir,
                       submit_url, } => run(&flow, script, draft_dir, submit_url).await,
    }
}

fn list() -> anyhow::Result<()> {
    for name in FLOW_NAMES {
        let def = by_name(name)?;
        let short: String = def.definition_hash().chars().take(12).collect();
        println!("{name} ({short})");
        for (i, step) in def.steps().iter().enumerate() {
            println!("  {}. {} [{}]", i + 1, step.title(), step.id());
        }
    }
    Ok(())
}

async fn run(flow: &str,
             script: PathBuf,
             draft_dir: Option<PathBuf>,
             submit_url: Option<String>)
             -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let actions = script::load_script(&script)?;

    let notifier = Arc::new(CollectingNotifier::new());
    let mut ctl = open_flow(flow, &config, draft_dir).context("opening flow")?
                                                     .with_notifier(notifier.clone());
    if ctl.is_restored() {
        println!("restored draft at '{}'", ctl.state().current_step_id());
    }
    let submitter = submitter_for(&config, submit_url)?;

    for line in script::run_actions(&mut ctl, &actions, submitter.as_ref(), &notifier).await {
        println!("{line}");
    }

    println!("step: {} ({:.0}%)",
             ctl.state().current_step_id(),
             ctl.progress_fraction() * 100.0);
    match ctl.status() {
        FlowStatus::Completed(ack) => println!("status: completed ({})", ack.reference),
        FlowStatus::InProgress => println!("status: in progress, next action {:?}", ctl.primary_action()),
    }
    println!("events: {}", ctl.event_variants().join(""));
    Ok(())
}
