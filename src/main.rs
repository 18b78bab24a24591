//! # RosterClaw — Recurring-Occurrence Auto-Scheduler
//!
//! Materializes calendar occurrences for eligible groups over a forward
//! window, hands them to the configured assignment webhook in bounded
//! batches, and promotes ambiguous attendance to confirmed.
//!
//! Usage:
//!   rosterclaw run                    # One scheduling pass
//!   rosterclaw daemon                 # Re-run on the configured interval
//!   rosterclaw history                # Recent run summaries
//!   rosterclaw seed catalog.toml      # Load a catalog seed file

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use rosterclaw_core::config::RosterConfig;
use rosterclaw_scheduler::{AutoScheduler, CatalogSeed, SchedulerDb, WebhookAssigner, spawn_autoschedule};

#[derive(Parser)]
#[command(
    name = "rosterclaw",
    version,
    about = "📅 RosterClaw — recurring-occurrence auto-scheduler"
)]
struct Cli {
    /// Config file (default: ~/.rosterclaw/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Database path (overrides config)
    #[arg(long)]
    db: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one scheduling pass and exit.
    Run,
    /// Run scheduling passes on the configured interval.
    Daemon,
    /// Show recent run summaries.
    History {
        /// How many runs to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Load a catalog seed file (TOML) into the database.
    Seed { file: String },
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "rosterclaw=debug,rosterclaw_scheduler=debug,rosterclaw_core=debug"
    } else {
        "rosterclaw=info,rosterclaw_scheduler=info,rosterclaw_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => RosterConfig::load_from(&expand_path(path))?,
        None => RosterConfig::load()?,
    };
    let db_path = cli
        .db
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| config.db_path.clone());
    let mut db = SchedulerDb::open(&db_path)?;

    match cli.command {
        Command::Run => {
            let mut scheduler = build_scheduler(db, &config)?;
            let summary = scheduler.run().await;
            println!("{summary}");
            if !summary.succeeded() {
                std::process::exit(1);
            }
        }
        Command::Daemon => {
            let interval = config.autoschedule.run_interval_secs;
            let scheduler = build_scheduler(db, &config)?;
            spawn_autoschedule(Arc::new(Mutex::new(scheduler)), interval).await;
        }
        Command::History { limit } => {
            for run in db.recent_runs(limit)? {
                println!("{run}");
            }
        }
        Command::Seed { file } => {
            let content = std::fs::read_to_string(expand_path(&file))?;
            let seed: CatalogSeed = toml::from_str(&content)?;
            db.apply_seed(&seed)?;
        }
    }
    Ok(())
}

fn build_scheduler(
    db: SchedulerDb,
    config: &RosterConfig,
) -> Result<AutoScheduler<SchedulerDb, WebhookAssigner>> {
    let url = config
        .autoschedule
        .assign_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("autoschedule.assign_url is not configured"))?;
    Ok(AutoScheduler::new(
        db,
        WebhookAssigner::new(url),
        config.autoschedule.clone(),
    ))
}
