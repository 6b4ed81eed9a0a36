//! HTTP API - Bet Ledger, Calculator and Health Endpoints
//!
//! Exposes the tracker over JSON via axum 0.7. All mutations go through
//! `BetTracker`, so HTTP requests share the same single-writer ledger as
//! the reminder scheduler. `/live` and `/ready` serve orchestrator probes.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::usecases::bet_tracker::BetTracker;
use crate::usecases::result_sync::ResultSync;

pub use error::ApiError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<BetTracker>,
    /// `None` when the result feed is disabled.
    pub results: Option<Arc<ResultSync>>,
    /// Currency label reported with the summary.
    pub currency: Arc<str>,
}

pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    #[must_use]
    pub const fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/calculate", post(handlers::calculate))
            .route("/bets", get(handlers::list_bets).post(handlers::open_bet))
            .route("/bets/:id", get(handlers::get_bet).delete(handlers::delete_bet))
            .route("/bets/:id/settle", post(handlers::settle_bet))
            .route("/bets/:id/fetch-result", post(handlers::fetch_result))
            .route("/results/sync", post(handlers::sync_results))
            .route("/summary", get(handlers::summary))
            .route("/reminders", get(handlers::list_reminders))
            .route("/events", get(handlers::list_events))
            .route("/live", get(handlers::liveness))
            .route("/ready", get(handlers::readiness))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve until a shutdown signal arrives.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind or serve.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self,
        addr: &str,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(address = %addr, "Bet API listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}
