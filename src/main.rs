//! Matched Betting Tracker - Entry Point
//!
//! Initializes configuration and logging, restores the ledger, and
//! serves the bet API until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (or the path given as first argument) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the file repository and restore the ledger snapshot
//! 4. Create the result feed when enabled
//! 5. Spawn the reminder scheduler when enabled
//! 6. Serve the HTTP API
//! 7. Wait for SIGINT, then broadcast shutdown and drain tasks

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use matched_betting_tracker::adapters::api::{ApiServer, AppState};
use matched_betting_tracker::adapters::notify::LogNotifier;
use matched_betting_tracker::adapters::persistence::RepositoryImpl;
use matched_betting_tracker::adapters::results::HttpResultFeed;
use matched_betting_tracker::config;
use matched_betting_tracker::usecases::bet_tracker::BetTracker;
use matched_betting_tracker::usecases::reminder_scheduler::ReminderScheduler;
use matched_betting_tracker::usecases::result_sync::ResultSync;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.tracker.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.tracker.name,
        version = env!("CARGO_PKG_VERSION"),
        currency = %config.ledger.currency,
        "Starting matched betting tracker"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Restore the ledger ───────────────────────────────
    let repo = Arc::new(
        RepositoryImpl::from_data_dir(&config.persistence.data_dir)
            .await
            .context("Failed to open data directory")?,
    );
    let tracker = Arc::new(
        BetTracker::restore(
            repo,
            config.ledger.initial_balance,
            config.reminders.default_lead_minutes,
        )
        .await?,
    );

    // ── 5. Result feed (optional) ───────────────────────────
    let results = if config.results.enabled {
        let feed = HttpResultFeed::new(
            &config.results.base_url,
            Duration::from_secs(config.results.timeout_seconds),
        )?;
        info!(base_url = %config.results.base_url, "Result feed enabled");
        Some(Arc::new(ResultSync::new(Arc::clone(&tracker), Arc::new(feed))))
    } else {
        None
    };

    // ── 6. Reminder scheduler (optional) ────────────────────
    let scheduler_handle = if config.reminders.enabled {
        let scheduler = ReminderScheduler::new(
            Arc::clone(&tracker),
            Arc::new(LogNotifier::new(true)),
            Duration::from_secs(config.reminders.check_interval_seconds),
        );
        let scheduler_shutdown = shutdown_tx.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = scheduler.run(scheduler_shutdown).await {
                error!(error = %e, "Reminder scheduler failed");
            }
        }))
    } else {
        info!("Reminders disabled");
        None
    };

    // ── 7. HTTP API ─────────────────────────────────────────
    let server = ApiServer::new(AppState {
        tracker: Arc::clone(&tracker),
        results,
        currency: Arc::from(config.ledger.currency.as_str()),
    });
    let bind_address = config.server.bind_address.clone();
    let api_shutdown = shutdown_tx.subscribe();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = server.serve(&bind_address, api_shutdown).await {
            error!(error = %e, "Bet API failed");
        }
    });

    info!("All tasks spawned, tracker is running");

    // ── 8. Wait for SIGINT ──────────────────────────────────
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for SIGINT");
    }
    info!("SIGINT received, initiating graceful shutdown");

    let _ = shutdown_tx.send(());

    let _ = tokio::time::timeout(Duration::from_secs(10), api_handle).await;
    if let Some(handle) = scheduler_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    let summary = tracker.summary().await;
    info!(
        balance = %summary.balance,
        pending = summary.pending_bets,
        completed = summary.completed_bets,
        "Shutdown complete"
    );
    Ok(())
}
