//! Portfolio Pulse CLI
//!
//! Runs the headless portfolio dashboard:
//! - `run`: refresh on a timer and serve snapshots over HTTP
//! - `once`: run a single cycle and print the resulting snapshot
//! - `init-config`: print the default configuration

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use portfolio_pulse::analytics::HttpAnalyticsClient;
use portfolio_pulse::animation::TickerClock;
use portfolio_pulse::api::{self, AppState};
use portfolio_pulse::charts::ChartRegistry;
use portfolio_pulse::config::{generate_default_config, Config};
use portfolio_pulse::dashboard::{CycleOutcome, DashboardController};
use portfolio_pulse::logging;
use portfolio_pulse::notify::ToastBoard;
use portfolio_pulse::scheduler::RefreshScheduler;
use portfolio_pulse::view::MemoryDocument;

#[derive(Parser)]
#[command(name = "portfolio-pulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless portfolio analytics dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the portfolio server, overrides the config file
    #[arg(long, global = true)]
    source_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh on a timer until interrupted
    Run {
        /// Do not start the snapshot server
        #[arg(long)]
        no_api: bool,
    },

    /// Run one cycle and print the dashboard snapshot as JSON
    Once,

    /// Print the default config file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = logging::during_startup(|| load_config(cli.config.as_deref()))?;
    if let Some(url) = cli.source_url {
        config.source.base_url = url;
    }

    logging::init(&config.logging);
    tracing::info!("Portfolio Pulse v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Analytics endpoint: {}", config.analytics().endpoint());

    let state = build_state(&config)?;

    match cli.command {
        Commands::Run { no_api } => run(config, state, no_api).await,
        Commands::Once => once(state).await,
        Commands::InitConfig => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(Config::load_default()),
    }
}

/// Wire the controller to in-memory document, charts and toasts
fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let source = HttpAnalyticsClient::new(config.analytics())
        .context("building analytics client")?;

    let document = Arc::new(MemoryDocument::dashboard());
    let charts = Arc::new(ChartRegistry::new());
    let toasts = Arc::new(ToastBoard::new(config.toast_display()));

    let controller = Arc::new(DashboardController::new(
        Arc::new(source),
        document.clone(),
        charts.clone(),
        toasts.clone(),
        Arc::new(TickerClock::new(config.frame_interval())),
        config.animation(),
    ));

    Ok(AppState::new(
        document,
        charts,
        toasts,
        controller,
        config.api.clone(),
    ))
}

async fn run(config: Config, state: AppState, no_api: bool) -> anyhow::Result<()> {
    let scheduler = Arc::new(RefreshScheduler::new(
        state.controller.clone(),
        config.schedule(),
    ));
    let handle = scheduler.clone().start();

    if config.api.enabled && !no_api {
        api::serve(state.with_scheduler(scheduler.clone()), &config.api).await?;
    } else {
        api::shutdown_signal().await;
    }

    scheduler.stop();
    handle.abort();

    tracing::info!("Portfolio Pulse shutdown complete");
    Ok(())
}

async fn once(state: AppState) -> anyhow::Result<()> {
    match state.controller.refresh().await? {
        CycleOutcome::Refreshed { animations } => {
            for animation in animations {
                animation.wait().await?;
            }
        }
        CycleOutcome::FetchFailed => {
            tracing::warn!("Fetch failed, printing the unchanged dashboard");
        }
    }

    let snapshot = state.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
